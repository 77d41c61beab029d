//! Arrow functions, parameter extensions and `new.target`.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata};
use crate::syntax::{MetaProperty, NodeKind, SyntaxNode};

declare_feature!(
    ArrowFunctions,
    id = "arrowFunctions",
    edition = Es6,
    family = "arrowFunctions",
    description = "Arrow function expressions",
    example = "items.map((item) => item.id);"
);

impl Detector for ArrowFunctions {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ArrowFunction { is_async: false })
    }
}

declare_feature!(
    DefaultParameters,
    id = "defaultParameters",
    edition = Es6,
    family = "functionParameters",
    description = "Parameters with default values",
    example = "function greet(name = 'world') {}"
);

impl Detector for DefaultParameters {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::AssignmentPattern)
            && parent.is_some_and(SyntaxNode::is_function_like)
    }
}

declare_feature!(
    RestParameters,
    id = "restParameters",
    edition = Es6,
    family = "functionParameters",
    description = "Rest parameters collecting remaining arguments",
    example = "function sum(...values) {}"
);

impl Detector for RestParameters {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::RestElement)
            && parent.is_some_and(SyntaxNode::is_function_like)
    }
}

declare_feature!(
    NewTarget,
    id = "newTarget",
    edition = Es6,
    family = "metaProperties",
    description = "The new.target meta property",
    example = "function Shape() { if (!new.target) throw new Error(); }"
);

impl Detector for NewTarget {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::MetaProperty(MetaProperty::NewTarget))
    }
}

#[cfg(test)]
mod tests {
    use crate::features::testing::{count, ids};

    #[test]
    fn detects_arrow_functions() {
        let code = "var f = (a) => a;\nvar g = () => { return 1; };";
        assert_eq!(ids(code), vec!["arrowFunctions"]);
        assert_eq!(count(code, "arrowFunctions"), 2);
    }

    #[test]
    fn async_arrow_is_not_a_plain_arrow() {
        assert_eq!(count("var f = async () => 1;", "arrowFunctions"), 0);
    }

    #[test]
    fn detects_default_parameters() {
        let code = "function f(a, b = 1) {}\nvar g = (c = 2) => c;";
        assert_eq!(count(code, "defaultParameters"), 2);
    }

    #[test]
    fn defaults_inside_patterns_are_not_parameters() {
        let code = "var { a = 1 } = obj;";
        assert_eq!(count(code, "defaultParameters"), 0);
    }

    #[test]
    fn detects_rest_parameters() {
        let code = "function f(a, ...rest) {}\nvar g = (...xs) => xs;";
        assert_eq!(count(code, "restParameters"), 2);
    }

    #[test]
    fn array_rest_is_not_a_parameter() {
        assert_eq!(count("var [a, ...rest] = list;", "restParameters"), 0);
    }

    #[test]
    fn detects_constructor_parameters() {
        let code = "class A { constructor(a = 1, ...rest) {} }";
        assert_eq!(count(code, "defaultParameters"), 1);
        assert_eq!(count(code, "restParameters"), 1);
    }

    #[test]
    fn detects_new_target() {
        let code = "function Shape() { if (!new.target) { throw new Error(); } }";
        assert_eq!(ids(code), vec!["newTarget"]);
    }
}
