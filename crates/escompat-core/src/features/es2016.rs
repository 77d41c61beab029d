//! Features introduced by ECMAScript 2016.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{AssignmentOperator, BinaryOperator, NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(ExponentiationOperator::new()));
    registry.register(Box::new(ExponentiationAssignment::new()));
}

declare_feature!(
    ExponentiationOperator,
    id = "exponentiationOperator",
    edition = Es2016,
    family = "exponentiation",
    description = "The ** operator",
    example = "const area = side ** 2;"
);

impl Detector for ExponentiationOperator {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Binary {
                operator: BinaryOperator::Exponent
            }
        )
    }
}

declare_feature!(
    ExponentiationAssignment,
    id = "exponentiationAssignment",
    edition = Es2016,
    family = "exponentiation",
    description = "The **= assignment operator",
    example = "value **= 2;"
);

impl Detector for ExponentiationAssignment {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Assignment {
                operator: AssignmentOperator::Exponent
            }
        )
    }
}
