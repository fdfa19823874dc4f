//! The symbol graph snapshot the engine reasons over.
//!
//! Hosts lower their own semantic model into this arena-style graph once per
//! refactoring invocation: types, members, and constructors live in flat
//! vectors and are addressed by index newtypes (`TypeId`, `MemberId`,
//! `CtorId`). The graph is immutable once handed to the engine; concurrent
//! invocations each get their own snapshot.

use crate::member::{Accessibility, Member};
use crate::span::Span;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Index of a type in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub u32);

/// Index of a member in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemberId(pub u32);

/// Index of a constructor in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CtorId(pub u32);

/// The kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// A parameter of a declared or synthesized constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub ty: TypeId,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A constructor already declared on a type.
#[derive(Debug, Clone)]
pub struct Constructor {
    pub accessibility: Accessibility,
    pub parameters: Vec<Parameter>,
    /// Span of the constructor declaration.
    pub span: Span,
}

impl Constructor {
    pub fn new(accessibility: Accessibility, parameters: Vec<Parameter>, span: Span) -> Self {
        Self {
            accessibility,
            parameters,
            span,
        }
    }
}

/// A type declaration in the graph.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Simple name of the type.
    pub name: String,
    pub kind: TypeKind,
    pub is_static: bool,
    /// Whether values of this type can be null-checked (reference types and
    /// nullable value types).
    pub is_reference_like: bool,
    /// Whether the type or one of its containing types carries an unsafe
    /// modifier.
    pub has_unsafe_context: bool,
    /// Span of the declaration header (modifiers through the type name and
    /// any base list, before the opening brace).
    pub header_span: Span,
    /// Span between the braces of the type body.
    pub body_span: Span,
    /// Declared members, in declaration order.
    pub members: Vec<MemberId>,
    /// Declared constructors, in declaration order.
    pub constructors: Vec<CtorId>,
    /// Base type, if any.
    pub base: Option<TypeId>,
}

impl TypeDef {
    /// The full declaration span, header through closing brace.
    pub fn decl_span(&self) -> Span {
        Span::new(self.header_span.start, self.body_span.end)
    }

    /// Whether this type is declared in the current document. Types that
    /// only come from referenced metadata carry empty spans.
    pub fn has_declaration(&self) -> bool {
        !self.decl_span().is_empty()
    }
}

/// An immutable snapshot of the symbols the engine needs: every type with
/// its members and constructors, plus the well-known exception type used by
/// null-check synthesis.
#[derive(Debug, Default, Clone)]
pub struct SymbolGraph {
    types: Vec<TypeDef>,
    members: Vec<Member>,
    constructors: Vec<Constructor>,
    types_by_name: FxHashMap<String, TypeId>,
    /// The `ArgumentNullException`-style type thrown by null-check guards,
    /// if the compilation has one.
    null_check_exception: Option<TypeId>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type declaration and return its id.
    pub fn add_type(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types_by_name.insert(def.name.clone(), id);
        self.types.push(def);
        id
    }

    /// Add a member to a type, preserving declaration order.
    pub fn add_member(&mut self, owner: TypeId, member: Member) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(member);
        self.types[owner.0 as usize].members.push(id);
        id
    }

    /// Add a constructor to a type, preserving declaration order.
    pub fn add_constructor(&mut self, owner: TypeId, ctor: Constructor) -> CtorId {
        let id = CtorId(self.constructors.len() as u32);
        self.constructors.push(ctor);
        self.types[owner.0 as usize].constructors.push(id);
        id
    }

    /// Register the exception type that null-check guards throw.
    pub fn set_null_check_exception(&mut self, ty: TypeId) {
        self.null_check_exception = Some(ty);
    }

    /// The exception type used by null-check guards, if present in the
    /// compilation.
    pub fn null_check_exception(&self) -> Option<TypeId> {
        self.null_check_exception
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0 as usize]
    }

    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0 as usize]
    }

    pub fn constructor(&self, id: CtorId) -> &Constructor {
        &self.constructors[id.0 as usize]
    }

    /// Look up a type by its simple name.
    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        self.types_by_name.get(name).copied()
    }

    /// Iterate all type ids in the graph.
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    /// Whether a parameter of the given type can have a null-check guard.
    pub fn can_add_null_check(&self, ty: TypeId) -> bool {
        self.type_def(ty).is_reference_like
    }
}
