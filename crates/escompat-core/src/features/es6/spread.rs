//! Spread in calls and array literals.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{NodeKind, SyntaxNode};

declare_feature!(
    SpreadCalls,
    id = "spreadCalls",
    edition = Es6,
    family = "spread",
    description = "Spread arguments in calls and constructor calls",
    example = "Math.max(...values);"
);

impl Detector for SpreadCalls {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::SpreadElement)
            && parent.is_some_and(|p| matches!(p.kind, NodeKind::Call { .. } | NodeKind::New))
    }
}

declare_feature!(
    SpreadArrays,
    id = "spreadArrays",
    edition = Es6,
    family = "spread",
    description = "Spread elements in array literals",
    example = "const all = [...head, ...tail];"
);

impl Detector for SpreadArrays {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::SpreadElement)
            && parent.is_some_and(|p| matches!(p.kind, NodeKind::ArrayLiteral))
    }
}
