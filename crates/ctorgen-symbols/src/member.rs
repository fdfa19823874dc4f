//! Members (fields and properties) of a type, with their modifier flags.

use crate::graph::TypeId;
use crate::span::Span;
use bitflags::bitflags;
use serde::Serialize;

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    Private,
}

/// Whether a member is a field or a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Field,
    Property,
}

bitflags! {
    /// Modifier flags on a member declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemberFlags: u16 {
        const STATIC = 1 << 0;
        const CONST = 1 << 1;
        const READONLY = 1 << 2;
        /// Property has a setter (only meaningful for properties).
        const HAS_SETTER = 1 << 3;
        /// Some existing constructor already assigns this member.
        const ASSIGNED_IN_CONSTRUCTOR = 1 << 4;
    }
}

/// A field or property declared on a type.
#[derive(Debug, Clone)]
pub struct Member {
    /// Declared name, as written in source.
    pub name: String,
    /// Declared type.
    pub ty: TypeId,
    pub kind: MemberKind,
    pub flags: MemberFlags,
    pub accessibility: Accessibility,
    /// Span of the full member declaration.
    pub span: Span,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeId, kind: MemberKind, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            kind,
            flags: MemberFlags::empty(),
            accessibility: Accessibility::Private,
            span,
        }
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Whether a constructor body can assign this member.
    ///
    /// Const fields are never assignable. Readonly fields are assignable
    /// from a constructor, so they stay eligible. Properties need a setter.
    pub fn is_writable_from_constructor(&self) -> bool {
        match self.kind {
            MemberKind::Field => !self.flags.contains(MemberFlags::CONST),
            MemberKind::Property => self.flags.contains(MemberFlags::HAS_SETTER),
        }
    }

    /// Whether this member is eligible for constructor generation:
    /// a writable, non-static instance field or property.
    pub fn is_writable_instance_member(&self) -> bool {
        !self.flags.contains(MemberFlags::STATIC) && self.is_writable_from_constructor()
    }

    /// Whether some pre-existing constructor already assigns this member.
    pub fn is_assigned_in_constructor(&self) -> bool {
        self.flags.contains(MemberFlags::ASSIGNED_IN_CONSTRUCTOR)
    }
}
