//! Action packaging and the host-facing entry point.
//!
//! `compute_refactorings` mirrors the editor contract: explicit-selection
//! candidates first (field-delegating, then constructor-delegating), the
//! picker-dialog composite when nothing was selected, and finally the
//! sibling default-constructor candidates merged into the same set.
//!
//! Applying an action is the only point where text materializes: the
//! code-generation backend renders the synthesized constructor, and the
//! packager locates the new parameter list's closing parenthesis so the
//! caller can land the caret there.

use crate::document::Document;
use crate::host::{
    ADD_NULL_CHECKS_ID, CodeGenerationBackend, PickerOption, PickerOutcome, RefactorContext,
};
use crate::selection::MemberSelector;
use crate::state::GenerationState;
use crate::synthesis::{ConstructorSynthesizer, GenerationStrategy, SynthesizedConstructor};
use ctorgen_symbols::{Accessibility, CancelResult, CancelToken, MemberId, Span, TypeId};
use serde::Serialize;
use tracing::debug;

/// An independently-triggerable "generate this constructor" edit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConstructorAction {
    /// Display label, e.g. `Generate constructor 'Point(int x, int y)'`.
    pub title: String,
    pub target_type: TypeId,
    pub constructor: SynthesizedConstructor,
}

impl GenerateConstructorAction {
    pub fn new(target_type: TypeId, constructor: SynthesizedConstructor) -> Self {
        let title = match constructor.strategy {
            GenerationStrategy::FieldDelegating => {
                format!("Generate constructor '{}'", constructor.display_signature())
            }
            GenerationStrategy::ConstructorDelegating => format!(
                "Generate delegating constructor '{}'",
                constructor.display_signature()
            ),
        };
        Self {
            title,
            target_type,
            constructor,
        }
    }

    /// Render the constructor into the document and report where the caret
    /// should land.
    pub fn apply(
        &self,
        document: &Document,
        backend: &dyn CodeGenerationBackend,
        cancel: &CancelToken,
    ) -> CancelResult<AppliedEdit> {
        cancel.check()?;
        let edited =
            backend.insert_constructor(document, self.target_type, &self.constructor, cancel)?;
        let caret = caret_after_parameter_list(&edited.text, edited.inserted_span);
        Ok(AppliedEdit {
            text: edited.text,
            caret,
        })
    }
}

/// The composite picker-mode action: show the dialog, then synthesize for
/// the subset the user confirmed.
#[derive(Debug, Clone)]
pub struct GenerateWithPickerAction {
    pub title: String,
    pub target_type: TypeId,
    pub desired_accessibility: Option<Accessibility>,
    /// All eligible members, pre-seeded into the dialog.
    pub candidates: Vec<MemberId>,
    /// Toggles shown in the dialog (currently at most the null-check one).
    pub options: Vec<PickerOption>,
    /// The span this action is applicable to (the type declaration).
    pub applicable_span: Span,
}

impl GenerateWithPickerAction {
    /// Show the picker and, on confirmation, synthesize and apply. Returns
    /// `None` when the dialog is unavailable or cancelled, or when the
    /// chosen combination already has a matching constructor (a no-op).
    pub fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        backend: &dyn CodeGenerationBackend,
    ) -> CancelResult<Option<AppliedEdit>> {
        ctx.cancel.check()?;

        let Some(picker) = ctx.picker else {
            return Ok(None);
        };
        let picked = match picker.pick_members(ctx.document, &self.candidates, &self.options) {
            PickerOutcome::Cancelled => return Ok(None),
            PickerOutcome::Picked(picked) => picked,
        };
        ctx.cancel.check()?;

        let add_null_checks = picked
            .options
            .get(ADD_NULL_CHECKS_ID)
            .copied()
            .unwrap_or(false);

        let Some(state) = GenerationState::try_build(
            ctx.document,
            self.target_type,
            self.desired_accessibility,
            picked.members,
            &ctx.cancel,
        )?
        else {
            return Ok(None);
        };
        if state.matching_constructor.is_some() {
            debug!("picked combination already has a matching constructor");
            return Ok(None);
        }

        // Delegate when possible, otherwise assign every field directly.
        let strategy = if state.delegated_constructor.is_some() {
            GenerationStrategy::ConstructorDelegating
        } else {
            GenerationStrategy::FieldDelegating
        };
        let synthesizer = ConstructorSynthesizer::new(ctx.document, ctx.adapter);
        let constructor = synthesizer.synthesize(&state, strategy, add_null_checks, &ctx.cancel)?;

        let action = GenerateConstructorAction::new(self.target_type, constructor);
        action.apply(ctx.document, backend, &ctx.cancel).map(Some)
    }
}

/// A candidate refactoring offered to the user.
#[derive(Debug, Clone)]
pub enum RefactorAction {
    Generate(GenerateConstructorAction),
    WithPicker(GenerateWithPickerAction),
}

impl RefactorAction {
    pub fn title(&self) -> &str {
        match self {
            RefactorAction::Generate(action) => &action.title,
            RefactorAction::WithPicker(action) => &action.title,
        }
    }
}

/// The result of applying an action: the updated document text and an
/// optional caret landing span at the end of the inserted constructor's
/// parameter list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedEdit {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caret: Option<Span>,
}

/// Compute all candidate actions for a selection, in presentation order:
/// explicit-selection candidates, then the picker composite, then the
/// sibling default-constructor candidates.
pub fn compute_refactorings(
    ctx: &RefactorContext<'_>,
    span: Span,
    desired_accessibility: Option<Accessibility>,
) -> CancelResult<Vec<RefactorAction>> {
    ctx.cancel.check()?;

    let mut actions: Vec<RefactorAction> =
        generate_constructor_from_members(ctx, span, false, desired_accessibility)?
            .into_iter()
            .map(RefactorAction::Generate)
            .collect();

    // Only when nothing was explicitly selected do we fall back to the
    // dialog-based flow.
    if actions.is_empty() && span.is_empty() {
        if let Some(action) = handle_non_selection(ctx, span.start, desired_accessibility)? {
            actions.push(RefactorAction::WithPicker(action));
        }
    }

    if let Some(service) = ctx.default_constructors {
        let forwarded = service.generate_default_constructors(ctx.document, span, &ctx.cancel)?;
        actions.extend(forwarded.into_iter().map(RefactorAction::Generate));
    }

    debug!(count = actions.len(), "packaged refactoring candidates");
    Ok(actions)
}

/// Explicit-selection path: select members under the span, build the state,
/// and package one action per viable strategy. Empty when the selection is
/// not applicable or an identical constructor already exists.
pub fn generate_constructor_from_members(
    ctx: &RefactorContext<'_>,
    span: Span,
    add_null_checks: bool,
    desired_accessibility: Option<Accessibility>,
) -> CancelResult<Vec<GenerateConstructorAction>> {
    let selector = MemberSelector::new(ctx.document);
    let Some(info) = selector.select_members(span, &ctx.cancel)? else {
        return Ok(Vec::new());
    };

    let Some(state) = GenerationState::try_build(
        ctx.document,
        info.containing_type,
        desired_accessibility,
        info.selected,
        &ctx.cancel,
    )?
    else {
        return Ok(Vec::new());
    };
    if state.matching_constructor.is_some() {
        return Ok(Vec::new());
    }

    let synthesizer = ConstructorSynthesizer::new(ctx.document, ctx.adapter);
    let mut actions = Vec::new();
    for strategy in synthesizer.strategies(&state) {
        let constructor = synthesizer.synthesize(&state, strategy, add_null_checks, &ctx.cancel)?;
        actions.push(GenerateConstructorAction::new(
            info.containing_type,
            constructor,
        ));
    }
    Ok(actions)
}

/// Picker-mode path: gate the caret position and package the composite
/// dialog action. The null-check toggle is seeded from the options store;
/// when null checks are relevant but no store is available the whole action
/// is withheld.
fn handle_non_selection(
    ctx: &RefactorContext<'_>,
    offset: u32,
    desired_accessibility: Option<Accessibility>,
) -> CancelResult<Option<GenerateWithPickerAction>> {
    ctx.cancel.check()?;

    let selector = MemberSelector::new(ctx.document);
    let Some(info) = selector.picker_candidates(offset) else {
        return Ok(None);
    };

    let graph = ctx.document.graph();
    let can_add_null_check = info
        .selected
        .iter()
        .any(|&id| graph.can_add_null_check(graph.member(id).ty));

    let mut options = Vec::new();
    if can_add_null_check {
        let Some(store) = ctx.options else {
            debug!("no options store while null checks are relevant, withholding dialog");
            return Ok(None);
        };
        options.push(PickerOption {
            id: ADD_NULL_CHECKS_ID.to_string(),
            label: "Add null checks".to_string(),
            default_value: store.null_check_default(ctx.adapter.language_id()),
        });
    }

    Ok(Some(GenerateWithPickerAction {
        title: "Generate constructor...".to_string(),
        target_type: info.containing_type,
        desired_accessibility,
        candidates: info.selected,
        options,
        applicable_span: graph.type_def(info.containing_type).decl_span(),
    }))
}

/// Find the caret landing span: an empty span just after the closing
/// parenthesis of the inserted constructor's parameter list.
fn caret_after_parameter_list(text: &str, inserted: Span) -> Option<Span> {
    let slice = text.get(inserted.start as usize..inserted.end as usize)?;
    let open = slice.find('(')?;

    let mut depth = 0u32;
    for (i, c) in slice[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let offset = inserted.start + (open + i) as u32 + 1;
                    return Some(Span::empty(offset));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/actions_tests.rs"]
mod actions_tests;
