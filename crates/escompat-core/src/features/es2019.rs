//! Features introduced by ECMAScript 2019.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(OptionalCatchBinding::new()));
}

declare_feature!(
    OptionalCatchBinding,
    id = "optionalCatchBinding",
    edition = Es2019,
    family = "optionalCatchBinding",
    description = "catch clauses without a binding",
    example = "try { run(); } catch { recover(); }"
);

impl Detector for OptionalCatchBinding {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::CatchClause { has_binding: false })
    }
}
