//! Symbol graph model for the ctorgen refactoring engine.
//!
//! This crate provides the foundational types shared by the engine and its
//! hosts:
//! - Source spans and line maps (`Span`, `LineMap`)
//! - The symbol graph snapshot (`SymbolGraph`, `TypeDef`, `Member`, `Constructor`)
//! - Accessibility and member modifier flags
//! - Cooperative cancellation (`CancelToken`, `CancelResult`)
//! - Parameter naming helpers

// Span - source location tracking (byte offsets) and line maps
pub mod span;
pub use span::{LineMap, Span};

// Symbol graph snapshot: types, members, constructors
pub mod graph;
pub use graph::{Constructor, CtorId, MemberId, Parameter, SymbolGraph, TypeDef, TypeId, TypeKind};

// Member attributes and modifier flags
pub mod member;
pub use member::{Accessibility, Member, MemberFlags, MemberKind};

// Cooperative cancellation
pub mod cancel;
pub use cancel::{CancelResult, CancelToken, Cancelled};

// Parameter naming helpers
pub mod naming;
