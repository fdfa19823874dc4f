//! Strategy selection and constructor synthesis.
//!
//! Given a built `GenerationState` with no matching constructor, the
//! synthesizer produces symbolic constructor descriptions:
//! - **Field-delegating**: every parameter is assigned straight to its
//!   member, in selection order.
//! - **Constructor-delegating**: the covered parameters are forwarded to the
//!   delegated constructor and only the remainder is assigned.
//!
//! Null-check guards are injected on request for reference-like parameters
//! that are directly assigned; parameters forwarded through delegation are
//! assumed already validated. The guard form (separate throw statement vs.
//! `?? throw` expression) is a single policy query on the language adapter.
//!
//! Nothing here touches text: the output is a description the host's
//! code-generation backend renders.

use crate::document::Document;
use crate::host::LanguageAdapter;
use crate::state::GenerationState;
use ctorgen_symbols::{Accessibility, CancelResult, CancelToken};
use serde::Serialize;

/// How a viable constructor is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationStrategy {
    /// Assign each parameter directly to its member.
    FieldDelegating,
    /// Forward covered parameters to an existing constructor, assign the
    /// rest.
    ConstructorDelegating,
}

/// The shape of a null-check guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThrowForm {
    /// A guard statement before the assignment:
    /// `if (x is null) throw new ArgumentNullException(nameof(x));`
    Statement,
    /// A throw expression folded into the assignment:
    /// `this.x = x ?? throw new ArgumentNullException(nameof(x));`
    Expression,
}

/// One statement of a synthesized constructor body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum BodyStatement {
    /// A standalone null-check guard for a parameter, placed immediately
    /// before that parameter's assignment.
    NullGuard {
        parameter: String,
        exception_type: String,
    },
    /// Assignment of a parameter to its member. When `coalesce_throw` names
    /// an exception type, the backend renders the throw-expression guard
    /// inside the assignment.
    Assign {
        member: String,
        parameter: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        coalesce_throw: Option<String>,
    },
}

/// The delegation call of a constructor-delegating constructor
/// (`: this(x, y)`), argument names in the delegated constructor's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationCall {
    pub arguments: Vec<String>,
}

/// A parameter of a synthesized constructor, with its rendered type text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedParameter {
    pub name: String,
    pub type_text: String,
}

/// The full symbolic description of a constructor to generate. This is the
/// engine's outbound payload to the code-generation backend; no text edits
/// happen until a backend renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedConstructor {
    /// Name of the containing type (constructors share the type's name).
    pub type_name: String,
    pub accessibility: Accessibility,
    pub is_unsafe: bool,
    pub parameters: Vec<SynthesizedParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<DelegationCall>,
    pub body: Vec<BodyStatement>,
    pub strategy: GenerationStrategy,
}

impl SynthesizedConstructor {
    /// Display form of the signature, e.g. `Point(int x, int y)`.
    pub fn display_signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_text, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params})", self.type_name)
    }
}

/// Turns a generation state and a chosen strategy into a constructor
/// description.
pub struct ConstructorSynthesizer<'a> {
    document: &'a Document,
    adapter: &'a dyn LanguageAdapter,
}

impl<'a> ConstructorSynthesizer<'a> {
    pub fn new(document: &'a Document, adapter: &'a dyn LanguageAdapter) -> Self {
        Self { document, adapter }
    }

    /// Which strategies apply to this state. Empty when an identical
    /// constructor already exists; otherwise field-delegating always, plus
    /// constructor-delegating when a delegation target was found.
    pub fn strategies(&self, state: &GenerationState) -> Vec<GenerationStrategy> {
        if state.matching_constructor.is_some() {
            return Vec::new();
        }
        let mut strategies = vec![GenerationStrategy::FieldDelegating];
        if state.delegated_constructor.is_some() {
            strategies.push(GenerationStrategy::ConstructorDelegating);
        }
        strategies
    }

    /// Synthesize the constructor for one strategy.
    pub fn synthesize(
        &self,
        state: &GenerationState,
        strategy: GenerationStrategy,
        add_null_checks: bool,
        cancel: &CancelToken,
    ) -> CancelResult<SynthesizedConstructor> {
        cancel.check()?;

        let graph = self.document.graph();
        let type_def = graph.type_def(state.containing_type);

        let parameters = state
            .parameters
            .iter()
            .map(|p| SynthesizedParameter {
                name: p.name.clone(),
                type_text: self.adapter.render_parameter_type(self.document, p.ty),
            })
            .collect();

        let delegating = strategy == GenerationStrategy::ConstructorDelegating
            && state.delegated_constructor.is_some();

        let delegation = delegating.then(|| DelegationCall {
            arguments: state
                .delegated_coverage
                .iter()
                .map(|&i| state.parameters[i].name.clone())
                .collect(),
        });

        let assigned_indices: Vec<usize> = if delegating {
            state.remaining_parameter_indices()
        } else {
            (0..state.parameters.len()).collect()
        };

        let exception_type = graph
            .null_check_exception()
            .map(|id| graph.type_def(id).name.clone());
        let throw_form = if self.adapter.prefers_throw_expression(self.document) {
            ThrowForm::Expression
        } else {
            ThrowForm::Statement
        };

        let mut body = Vec::with_capacity(assigned_indices.len());
        for i in assigned_indices {
            let member = graph.member(state.selected_members[i]);
            let parameter = &state.parameters[i];

            let guard = if add_null_checks && graph.can_add_null_check(parameter.ty) {
                exception_type.clone()
            } else {
                None
            };

            match (guard, throw_form) {
                (Some(exception), ThrowForm::Statement) => {
                    body.push(BodyStatement::NullGuard {
                        parameter: parameter.name.clone(),
                        exception_type: exception,
                    });
                    body.push(BodyStatement::Assign {
                        member: member.name.clone(),
                        parameter: parameter.name.clone(),
                        coalesce_throw: None,
                    });
                }
                (guard, _) => {
                    body.push(BodyStatement::Assign {
                        member: member.name.clone(),
                        parameter: parameter.name.clone(),
                        coalesce_throw: guard,
                    });
                }
            }
        }

        let accessibility = state
            .desired_accessibility
            .unwrap_or_else(|| self.adapter.default_constructor_accessibility(type_def.kind));

        Ok(SynthesizedConstructor {
            type_name: type_def.name.clone(),
            accessibility,
            is_unsafe: self.adapter.supports_unsafe_modifier() && type_def.has_unsafe_context,
            parameters,
            delegation,
            body,
            strategy,
        })
    }
}

#[cfg(test)]
#[path = "../tests/synthesis_tests.rs"]
mod synthesis_tests;
