//! Class syntax.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{NodeKind, SyntaxNode};

declare_feature!(
    ClassDeclarations,
    id = "classDeclarations",
    edition = Es6,
    family = "classes",
    description = "Class declarations",
    example = "class Point {}"
);

impl Detector for ClassDeclarations {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::Class { declaration: true })
    }
}

declare_feature!(
    ClassExpressions,
    id = "classExpressions",
    edition = Es6,
    family = "classes",
    description = "Class expressions",
    example = "const Point = class {};"
);

impl Detector for ClassExpressions {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::Class { declaration: false })
    }
}
