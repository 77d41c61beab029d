//! Conversions from SWC node facts to lowered node kinds.

use swc_ecma_ast::{AssignOp, BinaryOp, Expr, Lit, Prop, PropName, VarDeclKind};

use super::{
    AssignmentOperator, BinaryOperator, DeclarationKind, NumberNotation, Property, PropertyKey,
    PropertyKind,
};

pub(crate) fn lower_property(prop: &Prop) -> Property {
    let plain = |key: &PropName, kind: PropertyKind, method: bool| {
        let (key, computed) = lower_property_key(key);
        Property {
            key,
            computed,
            method,
            shorthand: false,
            kind,
        }
    };

    match prop {
        // `{ a = 1 }` only survives parsing as an assignment target, where it
        // is still written as a shorthand.
        Prop::Shorthand(_) | Prop::Assign(_) => Property {
            key: PropertyKey::Identifier,
            computed: false,
            method: false,
            shorthand: true,
            kind: PropertyKind::Init,
        },
        Prop::KeyValue(kv) => plain(&kv.key, PropertyKind::Init, false),
        Prop::Getter(getter) => plain(&getter.key, PropertyKind::Get, false),
        Prop::Setter(setter) => plain(&setter.key, PropertyKind::Set, false),
        Prop::Method(method) => plain(&method.key, PropertyKind::Init, true),
    }
}

/// Returns the key shape and whether the key is computed.
pub(crate) fn lower_property_key(key: &PropName) -> (PropertyKey, bool) {
    match key {
        PropName::Ident(_) => (PropertyKey::Identifier, false),
        PropName::Str(_) => (PropertyKey::StringLiteral, false),
        PropName::Num(_) | PropName::BigInt(_) => (PropertyKey::NumericLiteral, false),
        PropName::Computed(computed) => {
            let key = match computed.expr.as_ref() {
                Expr::Ident(_) => PropertyKey::Identifier,
                Expr::Lit(Lit::Str(_)) => PropertyKey::StringLiteral,
                Expr::Lit(Lit::Num(_)) => PropertyKey::NumericLiteral,
                _ => PropertyKey::Expression,
            };
            (key, true)
        }
    }
}

pub(crate) fn lower_number_notation(raw: Option<&str>) -> NumberNotation {
    let Some(raw) = raw else {
        return NumberNotation::Decimal;
    };
    let bytes = raw.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return NumberNotation::Decimal;
    }

    match bytes[1] {
        b'x' | b'X' => NumberNotation::Hex,
        b'b' | b'B' => NumberNotation::Binary,
        b'o' | b'O' => NumberNotation::Octal,
        b'0'..=b'7' if bytes.iter().all(u8::is_ascii_digit) => NumberNotation::LegacyOctal,
        _ => NumberNotation::Decimal,
    }
}

pub(crate) fn lower_binary_operator(op: BinaryOp) -> BinaryOperator {
    match op {
        BinaryOp::Exp => BinaryOperator::Exponent,
        BinaryOp::NullishCoalescing => BinaryOperator::NullishCoalescing,
        _ => BinaryOperator::Other,
    }
}

pub(crate) fn lower_assignment_operator(op: AssignOp) -> AssignmentOperator {
    match op {
        AssignOp::Assign => AssignmentOperator::Plain,
        AssignOp::ExpAssign => AssignmentOperator::Exponent,
        AssignOp::AndAssign | AssignOp::OrAssign | AssignOp::NullishAssign => {
            AssignmentOperator::Logical
        }
        _ => AssignmentOperator::Other,
    }
}

pub(crate) fn lower_declaration_kind(kind: VarDeclKind) -> DeclarationKind {
    match kind {
        VarDeclKind::Var => DeclarationKind::Var,
        VarDeclKind::Let => DeclarationKind::Let,
        VarDeclKind::Const => DeclarationKind::Const,
    }
}
