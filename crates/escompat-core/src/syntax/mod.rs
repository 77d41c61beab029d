//! Lowered syntax nodes inspected by feature detectors.
//!
//! Each SWC node the traversal models is lowered into a [`SyntaxNode`]: a
//! closed set of kinds, each carrying only the facts detectors look at, plus
//! the node's source range and location. Detectors never see SWC types.

mod lower;

pub(crate) use lower::{
    lower_assignment_operator, lower_binary_operator, lower_declaration_kind,
    lower_number_notation, lower_property,
};

use crate::records::{SourceLocation, SourceRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub range: SourceRange,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A member of an object literal.
    Property(Property),
    ObjectLiteral,
    ArrayLiteral,
    Call { dynamic_import: bool },
    New,
    /// `...expr` in a call, array or object literal.
    SpreadElement,
    ArrowFunction { is_async: bool },
    /// Function declarations and expressions, methods, accessors and
    /// constructors.
    Function { is_async: bool, is_generator: bool },
    Class { declaration: bool },
    ClassField { private: bool, is_static: bool },
    StaticBlock,
    VariableDeclaration { kind: DeclarationKind },
    VariableDeclarator,
    ObjectPattern,
    ArrayPattern,
    /// `...rest` in a parameter list or a destructuring pattern.
    RestElement,
    /// `target = default` in a parameter list or a destructuring pattern.
    AssignmentPattern,
    TemplateLiteral,
    TaggedTemplate,
    ForOf { is_await: bool },
    ForIn,
    CatchClause { has_binding: bool },
    MetaProperty(MetaProperty),
    NumericLiteral { notation: NumberNotation },
    BigIntLiteral,
    Binary { operator: BinaryOperator },
    Assignment { operator: AssignmentOperator },
    /// The outermost node of an `a?.b` chain, or a nested one.
    OptionalChain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub key: PropertyKey,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
    pub kind: PropertyKind,
}

/// Shape of a property key. For computed keys this describes the expression
/// inside the brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Identifier,
    StringLiteral,
    NumericLiteral,
    Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaProperty {
    NewTarget,
    ImportMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberNotation {
    Decimal,
    Hex,
    Binary,
    Octal,
    /// `0755`, valid in sloppy scripts since ES3. No detector reports it.
    LegacyOctal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Exponent,
    NullishCoalescing,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Plain,
    Exponent,
    Logical,
    Other,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, range: SourceRange, location: SourceLocation) -> Self {
        Self {
            kind,
            range,
            location,
        }
    }

    pub fn is_function_like(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Function { .. } | NodeKind::ArrowFunction { .. }
        )
    }
}
