//! Generators and `for...of` loops.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{NodeKind, SyntaxNode};

declare_feature!(
    Generators,
    id = "generators",
    edition = Es6,
    family = "generators",
    description = "Generator functions and methods",
    example = "function* ids() { yield 1; }"
);

impl Detector for Generators {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Function {
                is_async: false,
                is_generator: true
            }
        )
    }
}

declare_feature!(
    ForOfLoops,
    id = "forOfLoops",
    edition = Es6,
    family = "iteration",
    description = "for...of loops over iterables",
    example = "for (const item of items) {}"
);

impl Detector for ForOfLoops {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ForOf { is_await: false })
    }
}
