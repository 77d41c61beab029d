//! Traversal driver.
//!
//! Walks a parsed module once, lowers each modeled node into a
//! [`SyntaxNode`] and hands it, with its nearest lowered ancestor, to every
//! enabled detector.

mod context;

pub use context::VisitorContext;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrayLit, ArrayPat, ArrowExpr, AssignExpr, AssignPat, BigInt, BinExpr, CallExpr, Callee,
    CatchClause, ClassDecl, ClassExpr, ClassProp, Constructor, ExprOrSpread, ForInStmt, ForOfStmt,
    Function, GetterProp, MetaPropExpr, MetaPropKind, NewExpr, Number, ObjectLit, ObjectPat,
    OptCall, OptChainExpr, PrivateProp, Prop, RestPat, SetterProp, SpreadElement, StaticBlock,
    TaggedTpl, Tpl, VarDecl, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::features::{Detector, FeatureRegistry};
use crate::parser::ParsedFile;
use crate::records::FeatureReport;
use crate::syntax::{
    MetaProperty, NodeKind, SyntaxNode, lower_assignment_operator, lower_binary_operator,
    lower_declaration_kind, lower_number_notation, lower_property,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionOutcome {
    Report(FeatureReport),
    /// The file had at least one parse diagnostic; carries the first message.
    ParseFailed(String),
}

/// Runs every enabled detector of `registry` over `file`.
pub fn detect_features(file: &ParsedFile, registry: &FeatureRegistry) -> DetectionOutcome {
    if let Some(error) = file.errors().first() {
        return DetectionOutcome::ParseFailed(error.to_string());
    }
    let Some(module) = file.module() else {
        return DetectionOutcome::ParseFailed("no module was produced".to_string());
    };

    let mut walker = FeatureWalker {
        ctx: VisitorContext::new(file),
        detectors: registry.enabled().collect(),
        ancestors: Vec::new(),
        report: FeatureReport::new(),
    };
    module.visit_with(&mut walker);

    tracing::debug!(
        file = %file.metadata().filename,
        features = walker.report.len(),
        "detected features"
    );
    DetectionOutcome::Report(walker.report)
}

struct FeatureWalker<'a> {
    ctx: VisitorContext<'a>,
    detectors: Vec<&'a dyn Detector>,
    ancestors: Vec<SyntaxNode>,
    report: FeatureReport,
}

impl FeatureWalker<'_> {
    fn enter(&mut self, kind: NodeKind, span: Span) {
        let node = self.ctx.node(kind, span);
        let parent = self.ancestors.last();

        for detector in &self.detectors {
            if let Some(record) = detector.detect(&node, parent) {
                self.report
                    .entry(record.feature.clone())
                    .or_default()
                    .push(record);
            }
        }

        self.ancestors.push(node);
    }

    fn leave(&mut self) {
        self.ancestors.pop();
    }

    fn within<N>(&mut self, kind: NodeKind, span: Span, node: &N)
    where
        N: VisitWith<Self> + ?Sized,
    {
        self.enter(kind, span);
        node.visit_children_with(self);
        self.leave();
    }
}

fn prop_span(prop: &Prop) -> Span {
    match prop {
        Prop::Shorthand(ident) => ident.span,
        Prop::KeyValue(kv) => kv.key.span().with_hi(kv.value.span().hi),
        Prop::Assign(assign) => assign.key.span.with_hi(assign.value.span().hi),
        Prop::Getter(getter) => getter.span,
        Prop::Setter(setter) => setter.span,
        Prop::Method(method) => method.key.span().with_hi(method.function.span.hi),
    }
}

const PLAIN_FUNCTION: NodeKind = NodeKind::Function {
    is_async: false,
    is_generator: false,
};

impl Visit for FeatureWalker<'_> {
    fn visit_prop(&mut self, node: &Prop) {
        self.within(NodeKind::Property(lower_property(node)), prop_span(node), node);
    }

    // Accessor and constructor bodies are functions to their parameters.
    fn visit_getter_prop(&mut self, node: &GetterProp) {
        self.within(PLAIN_FUNCTION, node.span, node);
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.within(PLAIN_FUNCTION, node.span, node);
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        self.within(PLAIN_FUNCTION, node.span, node);
    }

    fn visit_function(&mut self, node: &Function) {
        let kind = NodeKind::Function {
            is_async: node.is_async,
            is_generator: node.is_generator,
        };
        self.within(kind, node.span, node);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        let kind = NodeKind::ArrowFunction {
            is_async: node.is_async,
        };
        self.within(kind, node.span, node);
    }

    fn visit_object_lit(&mut self, node: &ObjectLit) {
        self.within(NodeKind::ObjectLiteral, node.span, node);
    }

    fn visit_array_lit(&mut self, node: &ArrayLit) {
        self.within(NodeKind::ArrayLiteral, node.span, node);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let kind = NodeKind::Call {
            dynamic_import: matches!(node.callee, Callee::Import(_)),
        };
        self.within(kind, node.span, node);
    }

    fn visit_opt_call(&mut self, node: &OptCall) {
        let kind = NodeKind::Call {
            dynamic_import: false,
        };
        self.within(kind, node.span, node);
    }

    fn visit_new_expr(&mut self, node: &NewExpr) {
        self.within(NodeKind::New, node.span, node);
    }

    fn visit_expr_or_spread(&mut self, node: &ExprOrSpread) {
        match node.spread {
            Some(dot3) => {
                let span = dot3.with_hi(node.expr.span().hi);
                self.within(NodeKind::SpreadElement, span, node);
            }
            None => node.visit_children_with(self),
        }
    }

    fn visit_spread_element(&mut self, node: &SpreadElement) {
        let span = node.dot3_token.with_hi(node.expr.span().hi);
        self.within(NodeKind::SpreadElement, span, node);
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.within(NodeKind::Class { declaration: true }, node.class.span, node);
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        self.within(NodeKind::Class { declaration: false }, node.class.span, node);
    }

    fn visit_class_prop(&mut self, node: &ClassProp) {
        let kind = NodeKind::ClassField {
            private: false,
            is_static: node.is_static,
        };
        self.within(kind, node.span, node);
    }

    fn visit_private_prop(&mut self, node: &PrivateProp) {
        let kind = NodeKind::ClassField {
            private: true,
            is_static: node.is_static,
        };
        self.within(kind, node.span, node);
    }

    fn visit_static_block(&mut self, node: &StaticBlock) {
        self.within(NodeKind::StaticBlock, node.span, node);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        let kind = NodeKind::VariableDeclaration {
            kind: lower_declaration_kind(node.kind),
        };
        self.within(kind, node.span, node);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.within(NodeKind::VariableDeclarator, node.span, node);
    }

    fn visit_object_pat(&mut self, node: &ObjectPat) {
        self.within(NodeKind::ObjectPattern, node.span, node);
    }

    fn visit_array_pat(&mut self, node: &ArrayPat) {
        self.within(NodeKind::ArrayPattern, node.span, node);
    }

    fn visit_rest_pat(&mut self, node: &RestPat) {
        self.within(NodeKind::RestElement, node.span, node);
    }

    fn visit_assign_pat(&mut self, node: &AssignPat) {
        self.within(NodeKind::AssignmentPattern, node.span, node);
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        self.within(NodeKind::TemplateLiteral, node.span, node);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        self.within(NodeKind::TaggedTemplate, node.span, node);
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        let kind = NodeKind::ForOf {
            is_await: node.is_await,
        };
        self.within(kind, node.span, node);
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.within(NodeKind::ForIn, node.span, node);
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        let kind = NodeKind::CatchClause {
            has_binding: node.param.is_some(),
        };
        self.within(kind, node.span, node);
    }

    fn visit_meta_prop_expr(&mut self, node: &MetaPropExpr) {
        let meta = match node.kind {
            MetaPropKind::NewTarget => MetaProperty::NewTarget,
            MetaPropKind::ImportMeta => MetaProperty::ImportMeta,
        };
        self.within(NodeKind::MetaProperty(meta), node.span, node);
    }

    fn visit_number(&mut self, node: &Number) {
        let kind = NodeKind::NumericLiteral {
            notation: lower_number_notation(node.raw.as_deref()),
        };
        self.within(kind, node.span, node);
    }

    fn visit_big_int(&mut self, node: &BigInt) {
        self.within(NodeKind::BigIntLiteral, node.span, node);
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        let kind = NodeKind::Binary {
            operator: lower_binary_operator(node.op),
        };
        self.within(kind, node.span, node);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        let kind = NodeKind::Assignment {
            operator: lower_assignment_operator(node.op),
        };
        self.within(kind, node.span, node);
    }

    fn visit_opt_chain_expr(&mut self, node: &OptChainExpr) {
        self.within(NodeKind::OptionalChain, node.span, node);
    }
}
