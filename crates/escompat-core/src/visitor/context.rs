//! Visitor context providing file information during AST traversal.

use swc_common::Span;

use crate::parser::ParsedFile;
use crate::records::{SourceLocation, SourceRange};
use crate::syntax::{NodeKind, SyntaxNode};

pub struct VisitorContext<'a> {
    file: &'a ParsedFile,
}

impl<'a> VisitorContext<'a> {
    pub fn new(file: &'a ParsedFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &ParsedFile {
        self.file
    }

    pub fn span_to_range(&self, span: Span) -> SourceRange {
        SourceRange::new(self.file.offset_of(span.lo), self.file.offset_of(span.hi))
    }

    pub fn span_to_location(&self, span: Span) -> SourceLocation {
        SourceLocation {
            start: self.file.position_of(self.file.offset_of(span.lo)),
            end: self.file.position_of(self.file.offset_of(span.hi)),
        }
    }

    /// Lowers a node kind observed at `span` into a [`SyntaxNode`].
    pub fn node(&self, kind: NodeKind, span: Span) -> SyntaxNode {
        SyntaxNode::new(kind, self.span_to_range(span), self.span_to_location(span))
    }

    pub fn get_source_text(&self, span: Span) -> Option<&str> {
        let source = self.file.source();
        let lo = self.file.offset_of(span.lo);
        let hi = self.file.offset_of(span.hi);

        source.get(lo..hi)
    }
}
