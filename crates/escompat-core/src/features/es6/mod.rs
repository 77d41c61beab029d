//! Features introduced by ECMAScript 2015.

pub mod bindings;
pub mod classes;
pub mod functions;
pub mod iteration;
pub mod literals;
pub mod object_literal_extensions;
pub mod spread;

pub use bindings::{
    Const, DestructuringAssignment, DestructuringDeclarations, DestructuringParameters, Let,
};
pub use classes::{ClassDeclarations, ClassExpressions};
pub use functions::{ArrowFunctions, DefaultParameters, NewTarget, RestParameters};
pub use iteration::{ForOfLoops, Generators};
pub use literals::{BinaryLiterals, OctalLiterals, TaggedTemplates, TemplateLiterals};
pub use object_literal_extensions::{
    ComputedAccessors, ComputedProperties, ComputedShorthandMethods, ShorthandMethods,
    ShorthandProperties, StringKeyedShorthandMethods,
};
pub use spread::{SpreadArrays, SpreadCalls};

use super::FeatureRegistry;

pub fn register(registry: &mut FeatureRegistry) {
    registry.register(Box::new(ComputedAccessors::new()));
    registry.register(Box::new(ComputedProperties::new()));
    registry.register(Box::new(ComputedShorthandMethods::new()));
    registry.register(Box::new(ShorthandMethods::new()));
    registry.register(Box::new(ShorthandProperties::new()));
    registry.register(Box::new(StringKeyedShorthandMethods::new()));
    registry.register(Box::new(ArrowFunctions::new()));
    registry.register(Box::new(Let::new()));
    registry.register(Box::new(Const::new()));
    registry.register(Box::new(TemplateLiterals::new()));
    registry.register(Box::new(TaggedTemplates::new()));
    registry.register(Box::new(DestructuringDeclarations::new()));
    registry.register(Box::new(DestructuringParameters::new()));
    registry.register(Box::new(DestructuringAssignment::new()));
    registry.register(Box::new(SpreadCalls::new()));
    registry.register(Box::new(SpreadArrays::new()));
    registry.register(Box::new(DefaultParameters::new()));
    registry.register(Box::new(RestParameters::new()));
    registry.register(Box::new(ClassDeclarations::new()));
    registry.register(Box::new(ClassExpressions::new()));
    registry.register(Box::new(Generators::new()));
    registry.register(Box::new(ForOfLoops::new()));
    registry.register(Box::new(BinaryLiterals::new()));
    registry.register(Box::new(OctalLiterals::new()));
    registry.register(Box::new(NewTarget::new()));
}
