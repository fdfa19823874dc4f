//! Generation state: the analytical core of the refactoring.
//!
//! `GenerationState::try_build` derives one parameter per selected member
//! (preserving selection order), then reconciles the derived signature
//! against the constructors already declared on the type:
//! - an existing constructor with a structurally identical parameter list
//!   (types and order; names are irrelevant) short-circuits generation, and
//! - the best existing constructor whose parameter types form an ordered
//!   subset of the derived list becomes the delegation target.

use crate::document::Document;
use ctorgen_symbols::{
    Accessibility, CancelResult, CancelToken, CtorId, MemberId, Parameter, TypeId, naming,
};
use smallvec::SmallVec;
use tracing::debug;

/// Everything strategy selection and synthesis need, computed once per
/// member combination. Owned exclusively by one invocation.
#[derive(Debug, Clone)]
pub struct GenerationState {
    pub containing_type: TypeId,
    pub desired_accessibility: Option<Accessibility>,
    /// Selected members, in selection order.
    pub selected_members: Vec<MemberId>,
    /// Derived parameters: one per member, same order.
    pub parameters: SmallVec<[Parameter; 4]>,
    /// An existing constructor whose signature already matches the derived
    /// parameter list. When set, generation is a no-op for this combination.
    pub matching_constructor: Option<CtorId>,
    /// An existing constructor whose parameters are an ordered type-subset
    /// of the derived list, usable via delegation.
    pub delegated_constructor: Option<CtorId>,
    /// For each delegated parameter (in the delegated constructor's own
    /// order), the index of the derived parameter that covers it.
    pub delegated_coverage: SmallVec<[usize; 4]>,
}

impl GenerationState {
    /// Build the state for a selection. Returns `None` only when the
    /// selection is empty; "already matching" is reported through
    /// [`GenerationState::matching_constructor`], not by failing.
    pub fn try_build(
        document: &Document,
        containing_type: TypeId,
        desired_accessibility: Option<Accessibility>,
        selected_members: Vec<MemberId>,
        cancel: &CancelToken,
    ) -> CancelResult<Option<GenerationState>> {
        cancel.check()?;

        if selected_members.is_empty() {
            return Ok(None);
        }

        let graph = document.graph();
        let names = naming::ensure_unique(
            selected_members
                .iter()
                .map(|&id| naming::parameter_name(&graph.member(id).name))
                .collect(),
        );
        let parameters: SmallVec<[Parameter; 4]> = selected_members
            .iter()
            .zip(names)
            .map(|(&id, name)| Parameter::new(name, graph.member(id).ty))
            .collect();

        let mut state = GenerationState {
            containing_type,
            desired_accessibility,
            selected_members,
            parameters,
            matching_constructor: None,
            delegated_constructor: None,
            delegated_coverage: SmallVec::new(),
        };

        let ctors = &graph.type_def(containing_type).constructors;

        if let Some(&matching) = ctors
            .iter()
            .find(|&&id| state.signature_matches(document, id))
        {
            debug!(?matching, "existing constructor already matches selection");
            state.matching_constructor = Some(matching);
            return Ok(Some(state));
        }

        cancel.check()?;

        // Best delegation target: maximize covered parameters, earliest
        // declared wins ties. A parameterless constructor covers nothing
        // and is never worth delegating to.
        let mut best: Option<(CtorId, SmallVec<[usize; 4]>)> = None;
        for &id in ctors {
            let Some(coverage) = state.ordered_type_subset(document, id) else {
                continue;
            };
            if coverage.is_empty() {
                continue;
            }
            let beats = best
                .as_ref()
                .map(|(_, b)| coverage.len() > b.len())
                .unwrap_or(true);
            if beats {
                best = Some((id, coverage));
            }
        }
        if let Some((id, coverage)) = best {
            debug!(delegated = ?id, covered = coverage.len(), "found delegatable constructor");
            state.delegated_constructor = Some(id);
            state.delegated_coverage = coverage;
        }

        Ok(Some(state))
    }

    /// Whether an existing constructor's parameter types equal the derived
    /// list, position for position.
    fn signature_matches(&self, document: &Document, ctor: CtorId) -> bool {
        let existing = &document.graph().constructor(ctor).parameters;
        existing.len() == self.parameters.len()
            && existing
                .iter()
                .zip(&self.parameters)
                .all(|(a, b)| a.ty == b.ty)
    }

    /// If the constructor's parameter types form an ordered subset of the
    /// derived list, return the covered derived-parameter indices (in the
    /// constructor's own order). Greedy left-to-right matching keeps the
    /// indices strictly increasing.
    fn ordered_type_subset(
        &self,
        document: &Document,
        ctor: CtorId,
    ) -> Option<SmallVec<[usize; 4]>> {
        let existing = &document.graph().constructor(ctor).parameters;
        if existing.len() > self.parameters.len() {
            return None;
        }

        let mut coverage = SmallVec::new();
        let mut next = 0usize;
        for param in existing {
            let found = self.parameters[next..]
                .iter()
                .position(|p| p.ty == param.ty)?;
            coverage.push(next + found);
            next += found + 1;
        }
        Some(coverage)
    }

    /// Indices of derived parameters not covered by the delegated
    /// constructor, in selection order. With no delegation target this is
    /// every parameter.
    pub fn remaining_parameter_indices(&self) -> Vec<usize> {
        (0..self.parameters.len())
            .filter(|i| !self.delegated_coverage.contains(i))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod state_tests;
