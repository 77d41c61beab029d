//! Template literals and number literal notations.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{NodeKind, NumberNotation, SyntaxNode};

declare_feature!(
    TemplateLiterals,
    id = "templateLiterals",
    edition = Es6,
    family = "templateLiterals",
    description = "Untagged template literals",
    example = "`Hello, ${name}!`"
);

impl Detector for TemplateLiterals {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        // The quasi of a tagged template is reported as the tagged template.
        matches!(node.kind, NodeKind::TemplateLiteral)
            && !parent.is_some_and(|p| matches!(p.kind, NodeKind::TaggedTemplate))
    }
}

declare_feature!(
    TaggedTemplates,
    id = "taggedTemplates",
    edition = Es6,
    family = "templateLiterals",
    description = "Template literals with a tag function",
    example = "html`<p>${text}</p>`"
);

impl Detector for TaggedTemplates {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::TaggedTemplate)
    }
}

declare_feature!(
    BinaryLiterals,
    id = "binaryLiterals",
    edition = Es6,
    family = "literals",
    description = "Binary number literals",
    example = "const mask = 0b1010;"
);

impl Detector for BinaryLiterals {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::NumericLiteral {
                notation: NumberNotation::Binary
            }
        )
    }
}

declare_feature!(
    OctalLiterals,
    id = "octalLiterals",
    edition = Es6,
    family = "literals",
    description = "Octal number literals with the 0o prefix",
    example = "const mode = 0o755;"
);

impl Detector for OctalLiterals {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::NumericLiteral {
                notation: NumberNotation::Octal
            }
        )
    }
}
