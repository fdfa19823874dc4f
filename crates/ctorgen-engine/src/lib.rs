//! Constructor-synthesis refactoring engine.
//!
//! Given a type declaration and a selected subset of its writable instance
//! members, this crate decides which constructors can be generated, builds
//! their symbolic descriptions, and packages them as user-selectable
//! refactoring actions:
//! - Member selection (explicit span or picker candidates)
//! - Generation state (derived parameters, matching/delegatable constructors)
//! - Constructor synthesis (field-delegating, constructor-delegating,
//!   optional null-check guards)
//! - Action packaging and the host-facing `compute_refactorings` entry point
//!
//! The engine never mutates source text. It emits constructor descriptions
//! that a host code-generation backend renders into the document, and it is
//! wired to its host exclusively through the traits in [`host`].

pub mod document;
pub use document::Document;

pub mod selection;
pub use selection::{MemberSelector, SelectedMemberInfo};

pub mod state;
pub use state::GenerationState;

pub mod synthesis;
pub use synthesis::{
    BodyStatement, ConstructorSynthesizer, DelegationCall, GenerationStrategy,
    SynthesizedConstructor, SynthesizedParameter, ThrowForm,
};

pub mod actions;
pub use actions::{
    AppliedEdit, GenerateConstructorAction, GenerateWithPickerAction, RefactorAction,
    compute_refactorings, generate_constructor_from_members,
};

pub mod host;
pub use host::{
    ADD_NULL_CHECKS_ID, CodeGenerationBackend, EditedDocument, GenerateDefaultConstructorsService,
    LanguageAdapter, OptionsStore, PickMembersService, PickedMembers, PickerOption, PickerOutcome,
    RefactorContext,
};

#[cfg(test)]
pub(crate) mod test_support;
