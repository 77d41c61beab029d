//! Features introduced by ECMAScript 2020.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{BinaryOperator, MetaProperty, NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(OptionalChaining::new()));
    registry.register(Box::new(NullishCoalescing::new()));
    registry.register(Box::new(Bigint::new()));
    registry.register(Box::new(DynamicImport::new()));
    registry.register(Box::new(ImportMeta::new()));
}

declare_feature!(
    OptionalChaining,
    id = "optionalChaining",
    edition = Es2020,
    family = "optionalChaining",
    description = "Optional member access and calls",
    example = "const city = user?.address?.city;"
);

impl Detector for OptionalChaining {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        // One match per chain.
        matches!(node.kind, NodeKind::OptionalChain)
            && !parent.is_some_and(|p| matches!(p.kind, NodeKind::OptionalChain))
    }
}

declare_feature!(
    NullishCoalescing,
    id = "nullishCoalescing",
    edition = Es2020,
    family = "nullishCoalescing",
    description = "The ?? operator",
    example = "const port = options.port ?? 8080;"
);

impl Detector for NullishCoalescing {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Binary {
                operator: BinaryOperator::NullishCoalescing
            }
        )
    }
}

declare_feature!(
    Bigint,
    id = "bigint",
    edition = Es2020,
    family = "bigint",
    description = "BigInt literals",
    example = "const big = 9007199254740993n;"
);

impl Detector for Bigint {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::BigIntLiteral)
    }
}

declare_feature!(
    DynamicImport,
    id = "dynamicImport",
    edition = Es2020,
    family = "modules",
    description = "import() expressions",
    example = "const module = await import('./module.js');"
);

impl Detector for DynamicImport {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Call {
                dynamic_import: true
            }
        )
    }
}

declare_feature!(
    ImportMeta,
    id = "importMeta",
    edition = Es2020,
    family = "modules",
    description = "The import.meta meta property",
    example = "const here = import.meta.url;"
);

impl Detector for ImportMeta {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::MetaProperty(MetaProperty::ImportMeta))
    }
}
