//! Features introduced by ECMAScript 2022.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(PublicClassFields::new()));
    registry.register(Box::new(PrivateClassFields::new()));
    registry.register(Box::new(ClassStaticBlocks::new()));
}

declare_feature!(
    PublicClassFields,
    id = "publicClassFields",
    edition = Es2022,
    family = "classFields",
    description = "Public instance and static class fields",
    example = "class Counter { count = 0; }"
);

impl Detector for PublicClassFields {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ClassField { private: false, .. })
    }
}

declare_feature!(
    PrivateClassFields,
    id = "privateClassFields",
    edition = Es2022,
    family = "classFields",
    description = "Private class fields",
    example = "class Counter { #count = 0; }"
);

impl Detector for PrivateClassFields {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ClassField { private: true, .. })
    }
}

declare_feature!(
    ClassStaticBlocks,
    id = "classStaticBlocks",
    edition = Es2022,
    family = "classFields",
    description = "Static initialization blocks in classes",
    example = "class Config { static { Config.load(); } }"
);

impl Detector for ClassStaticBlocks {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::StaticBlock)
    }
}
