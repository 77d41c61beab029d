//! Features introduced by ECMAScript 2018.

use crate::declare_feature;
use crate::features::{Detector, FeatureMetadata, FeatureRegistry};
use crate::syntax::{NodeKind, SyntaxNode};

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(ObjectSpreadProperties::new()));
    registry.register(Box::new(ObjectRestProperties::new()));
    registry.register(Box::new(AsyncGenerators::new()));
    registry.register(Box::new(ForAwaitOf::new()));
}

declare_feature!(
    ObjectSpreadProperties,
    id = "objectSpreadProperties",
    edition = Es2018,
    family = "objectRestSpread",
    description = "Spread properties in object literals",
    example = "const copy = { ...original };"
);

impl Detector for ObjectSpreadProperties {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::SpreadElement)
            && parent.is_some_and(|p| matches!(p.kind, NodeKind::ObjectLiteral))
    }
}

declare_feature!(
    ObjectRestProperties,
    id = "objectRestProperties",
    edition = Es2018,
    family = "objectRestSpread",
    description = "Rest properties in object destructuring",
    example = "const { id, ...rest } = record;"
);

impl Detector for ObjectRestProperties {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::RestElement)
            && parent.is_some_and(|p| matches!(p.kind, NodeKind::ObjectPattern))
    }
}

declare_feature!(
    AsyncGenerators,
    id = "asyncGenerators",
    edition = Es2018,
    family = "asyncIteration",
    description = "Async generator functions and methods",
    example = "async function* pages() { yield await next(); }"
);

impl Detector for AsyncGenerators {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(
            node.kind,
            NodeKind::Function {
                is_async: true,
                is_generator: true
            }
        )
    }
}

declare_feature!(
    ForAwaitOf,
    id = "forAwaitOf",
    edition = Es2018,
    family = "asyncIteration",
    description = "for await...of loops over async iterables",
    example = "for await (const page of pages()) {}"
);

impl Detector for ForAwaitOf {
    fn metadata(&self) -> &FeatureMetadata {
        &self.metadata
    }

    fn matches(&self, node: &SyntaxNode, _parent: Option<&SyntaxNode>) -> bool {
        matches!(node.kind, NodeKind::ForOf { is_await: true })
    }
}

#[cfg(test)]
mod tests {
    use crate::features::testing::{count, ids};

    #[test]
    fn detects_object_spread() {
        let code = "var copy = { ...original, extra: 1 };";
        assert_eq!(ids(code), vec!["objectSpreadProperties"]);
    }

    #[test]
    fn detects_object_rest() {
        let code = "var { id, ...rest } = record;";
        assert_eq!(count(code, "objectRestProperties"), 1);
        assert_eq!(count(code, "restParameters"), 0);
    }

    #[test]
    fn object_rest_in_parameters_is_object_rest() {
        let code = "function f({ a, ...others }) {}";
        assert_eq!(count(code, "objectRestProperties"), 1);
        assert_eq!(count(code, "destructuringParameters"), 1);
    }

    #[test]
    fn detects_async_generators() {
        let code = "async function* a() {}\nclass B { async *c() {} }";
        assert_eq!(ids(code), vec!["asyncGenerators", "classDeclarations"]);
        assert_eq!(count(code, "asyncGenerators"), 2);
    }

    #[test]
    fn detects_for_await_of() {
        let code = "async function f(list) { for await (const x of list) {} }";
        assert_eq!(count(code, "forAwaitOf"), 1);
        assert_eq!(count(code, "forOfLoops"), 0);
    }
}
