//! Features introduced by ECMAScript 2017.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(AsyncFunctions::new()));
    registry.register(Box::new(AsyncArrowFunctions::new()));
}

declare_feature!(
    AsyncFunctions,
    id = "asyncFunctions",
    edition = Es2017,
    family = "asyncFunctions",
    description = "Async functions and methods",
    example = "async function load() { await fetch(url); }"
);

impl Detector for AsyncFunctions {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Function {
                is_async: true,
                is_generator: false
            }
        )
    }
}

declare_feature!(
    AsyncArrowFunctions,
    id = "asyncArrowFunctions",
    edition = Es2017,
    family = "asyncFunctions",
    description = "Async arrow functions",
    example = "const load = async () => await fetch(url);"
);

impl Detector for AsyncArrowFunctions {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ArrowFunction { is_async: true })
    }
}
