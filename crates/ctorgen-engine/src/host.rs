//! Host collaborator traits and the invocation context.
//!
//! The engine is host-editor-agnostic: everything language- or
//! editor-specific is reached through the traits here, injected per
//! invocation via [`RefactorContext`] rather than wired up as ambient
//! singletons. Hosts implement:
//! - [`LanguageAdapter`] — language-specific capability queries
//! - [`OptionsStore`] — persisted picker option defaults
//! - [`PickMembersService`] — the interactive member picker dialog
//! - [`CodeGenerationBackend`] — renders a synthesized constructor into text
//! - [`GenerateDefaultConstructorsService`] — the sibling generator for
//!   base-type forwarding constructors

use crate::actions::GenerateConstructorAction;
use crate::document::Document;
use crate::synthesis::SynthesizedConstructor;
use ctorgen_symbols::{Accessibility, CancelResult, CancelToken, MemberId, Span, TypeId, TypeKind};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Stable id of the null-check toggle shown in the member picker.
pub const ADD_NULL_CHECKS_ID: &str = "add_null_checks";

/// Language-specific capability queries the core depends on.
///
/// One implementation exists per supported source language; the core never
/// branches on a language name itself.
pub trait LanguageAdapter {
    /// Identifier of the language this adapter serves (e.g. `"csharp"`).
    /// Used as the key for persisted options.
    fn language_id(&self) -> &str;

    /// Render a parameter type for display and generation. The default
    /// rendering is the type's simple name from the graph.
    fn render_parameter_type(&self, document: &Document, ty: TypeId) -> String {
        document.graph().type_def(ty).name.clone()
    }

    /// Whether the language has an unsafe modifier that must be propagated
    /// from the containing type onto the generated constructor.
    fn supports_unsafe_modifier(&self) -> bool;

    /// Whether null-check guards should use the throw-expression form
    /// (`x ?? throw ...`) rather than a separate guard statement.
    fn prefers_throw_expression(&self, document: &Document) -> bool;

    /// Accessibility to use when the caller did not request one.
    fn default_constructor_accessibility(&self, kind: TypeKind) -> Accessibility {
        let _ = kind;
        Accessibility::Public
    }
}

/// Read access to persisted user options. The picker dialog owns writes on
/// confirmation; the engine only reads the defaults it seeds the dialog with.
pub trait OptionsStore {
    /// The last-used value of the "add null checks" toggle for a language.
    fn null_check_default(&self, language_id: &str) -> bool;
}

/// A boolean toggle shown in the member picker, seeded with its persisted
/// default.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerOption {
    pub id: String,
    pub label: String,
    pub default_value: bool,
}

/// What the user confirmed in the picker dialog.
#[derive(Debug, Clone)]
pub struct PickedMembers {
    /// The chosen member subset, in the order the user arranged them.
    pub members: Vec<MemberId>,
    /// Final value of each toggle, keyed by option id.
    pub options: FxHashMap<String, bool>,
}

/// Result of showing the picker dialog.
#[derive(Debug, Clone)]
pub enum PickerOutcome {
    /// The user dismissed the dialog; produce no edit.
    Cancelled,
    Picked(PickedMembers),
}

/// The interactive "pick members" dialog.
pub trait PickMembersService {
    fn pick_members(
        &self,
        document: &Document,
        candidates: &[MemberId],
        options: &[PickerOption],
    ) -> PickerOutcome;
}

/// An updated document produced by the code-generation backend.
#[derive(Debug, Clone)]
pub struct EditedDocument {
    /// Full updated source text.
    pub text: String,
    /// Span of the inserted constructor within the updated text.
    pub inserted_span: Span,
}

/// Renders a synthesized constructor into the target type's source text.
/// The engine emits symbol descriptions only; this collaborator owns all
/// text production.
pub trait CodeGenerationBackend {
    fn insert_constructor(
        &self,
        document: &Document,
        target: TypeId,
        constructor: &SynthesizedConstructor,
        cancel: &CancelToken,
    ) -> CancelResult<EditedDocument>;
}

/// Sibling generator for constructors that forward to base-type
/// constructors. Invoked after the core's own candidates are computed; its
/// results are merged into the same outbound set without further
/// interaction.
pub trait GenerateDefaultConstructorsService {
    fn generate_default_constructors(
        &self,
        document: &Document,
        span: Span,
        cancel: &CancelToken,
    ) -> CancelResult<Vec<GenerateConstructorAction>>;
}

/// Everything one refactoring invocation needs, bundled explicitly.
/// Optional collaborators degrade features softly: a missing picker or
/// options store withholds the dialog-based action, a missing sibling
/// service just skips forwarding constructors.
pub struct RefactorContext<'a> {
    pub document: &'a Document,
    pub adapter: &'a dyn LanguageAdapter,
    pub options: Option<&'a dyn OptionsStore>,
    pub picker: Option<&'a dyn PickMembersService>,
    pub default_constructors: Option<&'a dyn GenerateDefaultConstructorsService>,
    pub cancel: CancelToken,
}
