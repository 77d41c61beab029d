//! Object literal extensions: shorthand members and computed keys.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{NodeKind, Property, PropertyKey, PropertyKind, SyntaxNode};

fn property(node: &SyntaxNode) -> Option<&Property> {
    match &node.kind {
        NodeKind::Property(property) if !property.shorthand => Some(property),
        _ => None,
    }
}

declare_feature!(
    ComputedAccessors,
    id = "computedAccessors",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Getters and setters with computed names",
    example = "({ get [name]() { return 1; } })"
);

impl Detector for ComputedAccessors {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        property(node).is_some_and(|p| {
            p.computed && matches!(p.kind, PropertyKind::Get | PropertyKind::Set)
        })
    }
}

declare_feature!(
    ComputedProperties,
    id = "computedProperties",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Object properties with computed keys",
    example = "({ [name]: value })"
);

impl Detector for ComputedProperties {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        property(node)
            .is_some_and(|p| p.computed && !p.method && p.kind == PropertyKind::Init)
    }
}

declare_feature!(
    ComputedShorthandMethods,
    id = "computedShorthandMethods",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Shorthand methods whose name is a computed identifier",
    example = "({ [name]() {} })"
);

impl Detector for ComputedShorthandMethods {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        property(node).is_some_and(|p| {
            p.key == PropertyKey::Identifier
                && p.method
                && p.computed
                && p.kind == PropertyKind::Init
        })
    }
}

declare_feature!(
    ShorthandMethods,
    id = "shorthandMethods",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Method definitions in object literals",
    example = "({ run() {} })"
);

impl Detector for ShorthandMethods {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        property(node).is_some_and(|p| {
            p.key == PropertyKey::Identifier
                && p.method
                && !p.computed
                && p.kind == PropertyKind::Init
        })
    }
}

declare_feature!(
    ShorthandProperties,
    id = "shorthandProperties",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Properties named by a variable of the same name",
    example = "({ name, value })"
);

impl Detector for ShorthandProperties {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            &node.kind,
            NodeKind::Property(p) if p.shorthand && !p.computed && !p.method
        )
    }
}

declare_feature!(
    StringKeyedShorthandMethods,
    id = "stringKeyedShorthandMethods",
    edition = Es6,
    family = "objectLiteralExtensions",
    description = "Method definitions named by a string literal",
    example = "({ \"do it\"() {} })"
);

impl Detector for StringKeyedShorthandMethods {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        property(node).is_some_and(|p| {
            p.key == PropertyKey::StringLiteral
                && p.method
                && !p.computed
                && p.kind == PropertyKind::Init
        })
    }
}
