//! Document snapshot and caret classification.
//!
//! A `Document` pairs the source text of a single file with the symbol graph
//! the host lowered from it. Caret classification is span arithmetic over
//! the declaration spans recorded in the graph; no parsing happens here.

use ctorgen_symbols::{LineMap, Span, SymbolGraph, TypeId};

/// An immutable snapshot of one document: its text and its symbol graph.
/// Built fresh per refactoring invocation and discarded afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    graph: SymbolGraph,
    line_map: LineMap,
}

impl Document {
    pub fn new(text: impl Into<String>, graph: SymbolGraph) -> Self {
        let text = text.into();
        let line_map = LineMap::build(&text);
        Self {
            text,
            graph,
            line_map,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// The type whose declaration header contains the caret, if any.
    /// A caret sitting just past the end of the header still counts.
    pub fn type_at_header(&self, offset: u32) -> Option<TypeId> {
        self.graph.type_ids().find(|&id| {
            let def = self.graph.type_def(id);
            def.has_declaration()
                && def.header_span.start <= offset
                && offset <= def.header_span.end
        })
    }

    /// The type whose body contains the caret on a blank line between
    /// member declarations, if any.
    pub fn type_between_members(&self, offset: u32) -> Option<TypeId> {
        if !self.line_map.is_blank_line(&self.text, offset) {
            return None;
        }

        self.graph.type_ids().find(|&id| {
            let def = self.graph.type_def(id);
            if !def.has_declaration() {
                return false;
            }
            if !(def.body_span.start <= offset && offset <= def.body_span.end) {
                return false;
            }
            let inside_member = def
                .members
                .iter()
                .any(|&m| self.graph.member(m).span.contains(offset));
            let inside_ctor = def
                .constructors
                .iter()
                .any(|&c| self.graph.constructor(c).span.contains(offset));
            !inside_member && !inside_ctor
        })
    }

    /// Classify an empty selection for picker mode: the caret must be on a
    /// type's header or on a blank line between its members.
    pub fn type_for_empty_selection(&self, offset: u32) -> Option<TypeId> {
        self.type_at_header(offset)
            .or_else(|| self.type_between_members(offset))
    }

    /// The type whose declaration intersects the given selection. When
    /// declarations nest, the smallest intersecting declaration wins.
    pub fn containing_type_of_span(&self, span: Span) -> Option<TypeId> {
        self.graph
            .type_ids()
            .filter(|&id| {
                let def = self.graph.type_def(id);
                def.has_declaration() && def.decl_span().intersects(span)
            })
            .min_by_key(|&id| self.graph.type_def(id).decl_span().len())
    }
}
