//! Shared helpers for engine tests: symbol-graph fixtures over small
//! hand-written sources, fake host collaborators, and a minimal text
//! renderer used to assert on generated constructors.

use crate::document::Document;
use crate::host::{
    ADD_NULL_CHECKS_ID, CodeGenerationBackend, EditedDocument, LanguageAdapter, OptionsStore,
    PickMembersService, PickedMembers, PickerOption, PickerOutcome,
};
use crate::synthesis::{BodyStatement, SynthesizedConstructor};
use ctorgen_symbols::{
    Accessibility, CancelResult, CancelToken, Constructor, CtorId, Member, MemberFlags, MemberId,
    MemberKind, Parameter, Span, SymbolGraph, TypeDef, TypeId, TypeKind,
};
use std::cell::RefCell;

/// Span of the first occurrence of `needle` in `text`.
pub fn find(text: &str, needle: &str) -> Span {
    let start = text
        .find(needle)
        .unwrap_or_else(|| panic!("fixture text does not contain {needle:?}"));
    Span::new(start as u32, (start + needle.len()) as u32)
}

/// Caret (empty span) at the first occurrence of `needle`.
pub fn caret_at(text: &str, needle: &str) -> Span {
    Span::empty(find(text, needle).start)
}

/// A graph pre-seeded with the builtin types fixtures use.
pub struct GraphFixture {
    pub graph: SymbolGraph,
    pub int_ty: TypeId,
    pub string_ty: TypeId,
}

fn builtin_type(name: &str, reference_like: bool) -> TypeDef {
    TypeDef {
        name: name.to_string(),
        kind: if reference_like {
            TypeKind::Class
        } else {
            TypeKind::Struct
        },
        is_static: false,
        is_reference_like: reference_like,
        has_unsafe_context: false,
        header_span: Span::empty(0),
        body_span: Span::empty(0),
        members: Vec::new(),
        constructors: Vec::new(),
        base: None,
    }
}

impl GraphFixture {
    /// `int`, `string`, and a registered `ArgumentNullException`.
    pub fn new() -> Self {
        let mut fixture = Self::without_exception_type();
        let exception = fixture
            .graph
            .add_type(builtin_type("ArgumentNullException", true));
        fixture.graph.set_null_check_exception(exception);
        fixture
    }

    /// Same builtins but no null-check exception type in the compilation.
    pub fn without_exception_type() -> Self {
        let mut graph = SymbolGraph::new();
        let int_ty = graph.add_type(builtin_type("int", false));
        let string_ty = graph.add_type(builtin_type("string", true));
        Self {
            graph,
            int_ty,
            string_ty,
        }
    }

    /// Add a class/struct whose header and body spans are derived from the
    /// fixture source: the header runs from the declaration keyword to the
    /// opening brace, the body between the braces.
    pub fn add_type(&mut self, text: &str, name: &str, kind: TypeKind, is_static: bool) -> TypeId {
        let keyword = match kind {
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            _ => "class",
        };
        let header_start = if is_static {
            find(text, "static").start
        } else {
            find(text, keyword).start
        };
        let open = text.find('{').expect("fixture type has no body") as u32;
        let close = text.rfind('}').expect("fixture type has no closing brace") as u32;

        self.graph.add_type(TypeDef {
            name: name.to_string(),
            kind,
            is_static,
            is_reference_like: kind == TypeKind::Class,
            has_unsafe_context: false,
            header_span: Span::new(header_start, open),
            body_span: Span::new(open + 1, close),
            members: Vec::new(),
            constructors: Vec::new(),
            base: None,
        })
    }

    /// Like [`GraphFixture::add_type`] for a class inside an unsafe context.
    pub fn add_unsafe_class(&mut self, text: &str, name: &str) -> TypeId {
        let open = text.find('{').expect("fixture type has no body") as u32;
        let close = text.rfind('}').expect("fixture type has no closing brace") as u32;
        self.graph.add_type(TypeDef {
            name: name.to_string(),
            kind: TypeKind::Class,
            is_static: false,
            is_reference_like: true,
            has_unsafe_context: true,
            header_span: Span::new(find(text, "class").start, open),
            body_span: Span::new(open + 1, close),
            members: Vec::new(),
            constructors: Vec::new(),
            base: None,
        })
    }

    pub fn add_field(
        &mut self,
        owner: TypeId,
        text: &str,
        decl: &str,
        name: &str,
        ty: TypeId,
    ) -> MemberId {
        self.add_field_with_flags(owner, text, decl, name, ty, MemberFlags::empty())
    }

    pub fn add_field_with_flags(
        &mut self,
        owner: TypeId,
        text: &str,
        decl: &str,
        name: &str,
        ty: TypeId,
        flags: MemberFlags,
    ) -> MemberId {
        let member = Member::new(name, ty, MemberKind::Field, find(text, decl)).with_flags(flags);
        self.graph.add_member(owner, member)
    }

    pub fn add_ctor(
        &mut self,
        owner: TypeId,
        text: &str,
        decl: &str,
        parameters: Vec<Parameter>,
    ) -> CtorId {
        let ctor = Constructor::new(Accessibility::Public, parameters, find(text, decl));
        self.graph.add_constructor(owner, ctor)
    }
}

/// The standard `Point { int x; int y; }` fixture. Returns the document,
/// the type id, and the ids of `x` and `y`.
pub fn point_document() -> (Document, TypeId, MemberId, MemberId) {
    let text = "class Point {\n    int x;\n    int y;\n}\n";
    let mut fixture = GraphFixture::new();
    let point = fixture.add_type(text, "Point", TypeKind::Class, false);
    let x = fixture.add_field(point, text, "int x;", "x", fixture.int_ty);
    let y = fixture.add_field(point, text, "int y;", "y", fixture.int_ty);
    (Document::new(text, fixture.graph), point, x, y)
}

/// Test language adapter with tunable policy answers.
#[derive(Default)]
pub struct TestAdapter {
    pub throw_expression: bool,
    pub unsafe_supported: bool,
}

impl LanguageAdapter for TestAdapter {
    fn language_id(&self) -> &str {
        "csharp"
    }

    fn supports_unsafe_modifier(&self) -> bool {
        self.unsafe_supported
    }

    fn prefers_throw_expression(&self, _document: &Document) -> bool {
        self.throw_expression
    }
}

/// Options store returning a fixed null-check default.
pub struct TestOptions(pub bool);

impl OptionsStore for TestOptions {
    fn null_check_default(&self, _language_id: &str) -> bool {
        self.0
    }
}

/// Picker fake: either cancels or returns a fixed member subset, and
/// records the options it was shown.
pub struct TestPicker {
    pub pick: Vec<MemberId>,
    pub null_checks: Option<bool>,
    pub cancel: bool,
    pub seen_options: RefCell<Vec<PickerOption>>,
}

impl TestPicker {
    pub fn picking(pick: Vec<MemberId>) -> Self {
        Self {
            pick,
            null_checks: None,
            cancel: false,
            seen_options: RefCell::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            pick: Vec::new(),
            null_checks: None,
            cancel: true,
            seen_options: RefCell::new(Vec::new()),
        }
    }
}

impl PickMembersService for TestPicker {
    fn pick_members(
        &self,
        _document: &Document,
        _candidates: &[MemberId],
        options: &[PickerOption],
    ) -> PickerOutcome {
        self.seen_options.borrow_mut().extend_from_slice(options);
        if self.cancel {
            return PickerOutcome::Cancelled;
        }
        let mut chosen = rustc_hash::FxHashMap::default();
        if let Some(value) = self.null_checks {
            chosen.insert(ADD_NULL_CHECKS_ID.to_string(), value);
        }
        PickerOutcome::Picked(PickedMembers {
            members: self.pick.clone(),
            options: chosen,
        })
    }
}

/// Backend fake: renders the constructor with `render_constructor` and
/// appends it to the document text.
pub struct TestBackend;

impl CodeGenerationBackend for TestBackend {
    fn insert_constructor(
        &self,
        document: &Document,
        _target: TypeId,
        constructor: &SynthesizedConstructor,
        cancel: &CancelToken,
    ) -> CancelResult<EditedDocument> {
        cancel.check()?;
        let rendered = render_constructor(constructor);
        let start = document.text().len() as u32;
        let text = format!("{}{}\n", document.text(), rendered);
        Ok(EditedDocument {
            text,
            inserted_span: Span::new(start, start + rendered.len() as u32),
        })
    }
}

/// Minimal single-line rendering used for assertions, e.g.
/// `public Point(int x, int y) : this(x) { this.y = y; }`.
pub fn render_constructor(ctor: &SynthesizedConstructor) -> String {
    let access = match ctor.accessibility {
        Accessibility::Public => "public",
        Accessibility::Internal => "internal",
        Accessibility::Protected => "protected",
        Accessibility::Private => "private",
    };
    let unsafe_kw = if ctor.is_unsafe { "unsafe " } else { "" };
    let params = ctor
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_text, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let delegation = ctor
        .delegation
        .as_ref()
        .map(|d| format!(" : this({})", d.arguments.join(", ")))
        .unwrap_or_default();
    let body = ctor
        .body
        .iter()
        .map(|statement| match statement {
            BodyStatement::NullGuard {
                parameter,
                exception_type,
            } => format!("if ({parameter} is null) throw new {exception_type}(nameof({parameter}));"),
            BodyStatement::Assign {
                member,
                parameter,
                coalesce_throw: Some(exception_type),
            } => format!("this.{member} = {parameter} ?? throw new {exception_type}(nameof({parameter}));"),
            BodyStatement::Assign {
                member,
                parameter,
                coalesce_throw: None,
            } => format!("this.{member} = {parameter};"),
        })
        .collect::<Vec<_>>()
        .join(" ");

    if body.is_empty() {
        format!("{access} {unsafe_kw}{}({params}){delegation} {{ }}", ctor.type_name)
    } else {
        format!(
            "{access} {unsafe_kw}{}({params}){delegation} {{ {body} }}",
            ctor.type_name
        )
    }
}
