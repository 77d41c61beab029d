//! Block-scoped declarations and destructuring.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{DeclarationKind, NodeKind, SyntaxNode};

fn is_pattern(node: &SyntaxNode) -> bool {
    matches!(node.kind, NodeKind::ObjectPattern | NodeKind::ArrayPattern)
}

declare_feature!(
    Let,
    id = "let",
    edition = Es6,
    family = "blockBindings",
    description = "Block-scoped variable declarations",
    example = "let count = 0;"
);

impl Detector for Let {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::VariableDeclaration {
                kind: DeclarationKind::Let
            }
        )
    }
}

declare_feature!(
    Const,
    id = "const",
    edition = Es6,
    family = "blockBindings",
    description = "Block-scoped constant declarations",
    example = "const limit = 10;"
);

impl Detector for Const {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::VariableDeclaration {
                kind: DeclarationKind::Const
            }
        )
    }
}

declare_feature!(
    DestructuringDeclarations,
    id = "destructuringDeclarations",
    edition = Es6,
    family = "destructuring",
    description = "Destructuring patterns in declarations and catch clauses",
    example = "const { a, b } = obj;"
);

impl Detector for DestructuringDeclarations {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        is_pattern(node)
            && parent.is_some_and(|p| {
                matches!(
                    p.kind,
                    NodeKind::VariableDeclarator | NodeKind::CatchClause { .. }
                )
            })
    }
}

declare_feature!(
    DestructuringParameters,
    id = "destructuringParameters",
    edition = Es6,
    family = "destructuring",
    description = "Destructuring patterns as function parameters",
    example = "function f({ a, b }) {}"
);

impl Detector for DestructuringParameters {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        is_pattern(node) && parent.is_some_and(SyntaxNode::is_function_like)
    }
}

declare_feature!(
    DestructuringAssignment,
    id = "destructuringAssignment",
    edition = Es6,
    family = "destructuring",
    description = "Destructuring patterns as assignment targets",
    example = "[a, b] = [b, a];"
);

impl Detector for DestructuringAssignment {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        is_pattern(node)
            && parent.is_some_and(|p| {
                matches!(
                    p.kind,
                    NodeKind::Assignment { .. } | NodeKind::ForOf { .. } | NodeKind::ForIn
                )
            })
    }
}
