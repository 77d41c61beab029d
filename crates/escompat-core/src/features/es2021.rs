//! Features introduced by ECMAScript 2021.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{AssignmentOperator, NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(LogicalAssignment::new()));
}

declare_feature!(
    LogicalAssignment,
    id = "logicalAssignment",
    edition = Es2021,
    family = "logicalAssignment",
    description = "The ||=, &&= and ??= operators",
    example = "options.retries ??= 3;"
);

impl Detector for LogicalAssignment {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Assignment {
                operator: AssignmentOperator::Logical
            }
        )
    }
}
