//! Member selection: which members does a refactoring invocation act on.
//!
//! Two independent modes:
//! - **Explicit selection**: the user highlighted (or has the caret inside)
//!   one or more member declarations; partial overlap counts.
//! - **Picker mode**: the selection is empty and sits on a type header or a
//!   blank line between members; all eligible members become picker
//!   candidates.
//!
//! Every "not applicable" outcome is `None`, never an error: the caller
//! simply does not offer the refactoring there.

use crate::document::Document;
use ctorgen_symbols::{CancelResult, CancelToken, MemberId, Span, TypeId, TypeKind};
use tracing::debug;

/// The containing type and the members an invocation will generate for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMemberInfo {
    pub containing_type: TypeId,
    /// Selected members in declaration order.
    pub selected: Vec<MemberId>,
}

/// Computes the candidate member set for a selection or caret position.
pub struct MemberSelector<'a> {
    document: &'a Document,
}

impl<'a> MemberSelector<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Explicit-selection mode: members whose declarations intersect the
    /// selection span. Partial selection of a declaration counts as
    /// selecting it.
    ///
    /// Returns `None` when the selection is not over a non-static
    /// class/struct or touches no eligible member.
    pub fn select_members(
        &self,
        span: Span,
        cancel: &CancelToken,
    ) -> CancelResult<Option<SelectedMemberInfo>> {
        cancel.check()?;

        let graph = self.document.graph();
        let Some(type_id) = self.document.containing_type_of_span(span) else {
            return Ok(None);
        };
        if !Self::supports_constructors(self.document, type_id) {
            return Ok(None);
        }

        let def = graph.type_def(type_id);
        let selected: Vec<MemberId> = def
            .members
            .iter()
            .copied()
            .filter(|&id| {
                let member = graph.member(id);
                member.span.intersects(span) && member.is_writable_instance_member()
            })
            .collect();

        if selected.is_empty() {
            return Ok(None);
        }

        debug!(
            type_name = %def.name,
            count = selected.len(),
            "explicit member selection"
        );
        Ok(Some(SelectedMemberInfo {
            containing_type: type_id,
            selected,
        }))
    }

    /// Picker mode: classify the caret and compute the full eligible member
    /// set as picker candidates.
    ///
    /// Returns `None` when the caret is not on a type header or blank
    /// inter-member line, the type is static or not a class/struct, no
    /// member is eligible, or the compilation has no null-check exception
    /// type (null-check synthesis would have nothing to reference later).
    pub fn picker_candidates(&self, offset: u32) -> Option<SelectedMemberInfo> {
        let type_id = self.document.type_for_empty_selection(offset)?;
        if !Self::supports_constructors(self.document, type_id) {
            return None;
        }

        let selected = self.writable_instance_members(type_id);
        if selected.is_empty() {
            return None;
        }

        if self.document.graph().null_check_exception().is_none() {
            debug!("no null-check exception type in compilation, withholding picker");
            return None;
        }

        Some(SelectedMemberInfo {
            containing_type: type_id,
            selected,
        })
    }

    /// All writable, non-static instance members of a type, in declaration
    /// order.
    pub fn writable_instance_members(&self, type_id: TypeId) -> Vec<MemberId> {
        let graph = self.document.graph();
        graph
            .type_def(type_id)
            .members
            .iter()
            .copied()
            .filter(|&id| graph.member(id).is_writable_instance_member())
            .collect()
    }

    /// Constructors can only be generated on non-static classes and structs.
    fn supports_constructors(document: &Document, type_id: TypeId) -> bool {
        let def = document.graph().type_def(type_id);
        matches!(def.kind, TypeKind::Class | TypeKind::Struct) && !def.is_static
    }
}

#[cfg(test)]
#[path = "../tests/selection_tests.rs"]
mod selection_tests;
