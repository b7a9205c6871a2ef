//! Per-expression transformation.
//!
//! Transforms one source expression into a target expression plus zero or
//! more preceding statements, and runs the per-position loop over an
//! expression list: each position is transformed in an isolated
//! preceding-statement scope, except adapter-triggering arguments, which
//! lower to a runtime wrap call whose operands recurse through the
//! ordered-list path so the receiver argument gets the same ordering
//! guarantees.

use tarn_ast::{BinOp, Expr, ExprKind};
use tarn_typeck::Signature;

use crate::context::LowerCtx;
use crate::convention::needs_adapter;
use crate::expr_list::lower_ordered_expressions;
use crate::features::{lib_call, LibFeature};
use crate::target::{TBinOp, TExpr, TIdent, TStmt};

/// The output of transforming an expression list position by position.
#[derive(Debug)]
pub struct TransformedList {
    /// Transformed expressions, one per input position.
    pub exprs: Vec<TExpr>,
    /// Preceding statements per position (possibly empty).
    pub preceding: Vec<Vec<TStmt>>,
    /// Index of the last position with non-empty preceding statements.
    pub last_preceding_index: Option<usize>,
}

/// Transform a single source expression into a target expression.
///
/// Statements the expression needs run first are pushed into the innermost
/// scope of `ctx`; callers that need them separated transform inside
/// [`LowerCtx::transform_in_preceding_statement_scope`].
pub fn transform_expression(ctx: &mut LowerCtx, expr: &Expr) -> TExpr {
    match &expr.kind {
        ExprKind::Nil => TExpr::Nil,
        ExprKind::True => TExpr::True,
        ExprKind::False => TExpr::False,
        ExprKind::Int(n) => TExpr::Int(*n),
        ExprKind::Float(x) => TExpr::Float(*x),
        ExprKind::Str(s) => TExpr::Str(s.clone()),
        ExprKind::Name(name) => TExpr::Ident(TIdent {
            text: name.text.clone(),
            symbol: name.symbol,
        }),
        // Method bodies receive the enclosing object as `self`.
        ExprKind::This => TExpr::ident("self"),
        ExprKind::Member { object, field } => {
            let object = transform_expression(ctx, object);
            TExpr::Index {
                object: Box::new(object),
                key: Box::new(TExpr::Str(field.clone())),
            }
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = transform_expression(ctx, lhs);
            let rhs = transform_expression(ctx, rhs);
            TExpr::Binary {
                op: transform_bin_op(*op),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            }
        }
        ExprKind::Call { callee, args } => {
            let callee = transform_expression(ctx, callee);
            let signature = ctx.checker.resolved_signature(expr.id);
            let args = crate::expr_list::lower_call_arguments(ctx, args, signature);
            TExpr::Call {
                callee: Box::new(callee),
                args,
            }
        }
        ExprKind::If {
            cond,
            then_expr,
            else_expr,
        } => transform_if_expression(ctx, cond, then_expr, else_expr),
        ExprKind::Spread(inner) => {
            let inner = transform_expression(ctx, inner);
            TExpr::Unpack(Box::new(inner))
        }
    }
}

/// Lower a conditional expression. The target has no expression-level
/// conditional, so the value is routed through a forward-declared temp:
///
/// ```text
/// local __cond0
/// if c then __cond0 = a else __cond0 = b end
/// ```
///
/// Branch arms transform in nested scopes so their own preceding statements
/// stay inside the branch that evaluates them.
fn transform_if_expression(
    ctx: &mut LowerCtx,
    cond: &Expr,
    then_expr: &Expr,
    else_expr: &Expr,
) -> TExpr {
    let cond = transform_expression(ctx, cond);
    let temp = ctx.create_temp_ident("cond");

    let (mut then_body, then_value) =
        ctx.transform_in_preceding_statement_scope(|c| transform_expression(c, then_expr));
    then_body.push(TStmt::Assign {
        target: TExpr::Ident(temp.clone()),
        value: then_value,
    });

    let (mut else_body, else_value) =
        ctx.transform_in_preceding_statement_scope(|c| transform_expression(c, else_expr));
    else_body.push(TStmt::Assign {
        target: TExpr::Ident(temp.clone()),
        value: else_value,
    });

    ctx.add_preceding_statement(TStmt::Local {
        name: temp.clone(),
        value: None,
    });
    ctx.add_preceding_statement(TStmt::If {
        cond,
        then_body,
        else_body,
    });
    TExpr::Ident(temp)
}

fn transform_bin_op(op: BinOp) -> TBinOp {
    match op {
        BinOp::Add => TBinOp::Add,
        BinOp::Sub => TBinOp::Sub,
        BinOp::Mul => TBinOp::Mul,
        BinOp::Div => TBinOp::Div,
        BinOp::Eq => TBinOp::Eq,
        BinOp::Lt => TBinOp::Lt,
    }
}

/// Transform each expression in a list, tracking per-position preceding
/// statements.
///
/// When a signature is supplied that declares at least as many parameters
/// as there are expressions, an argument whose parameter demands the
/// receiver-binding adapter lowers to `__tarn_wrap(arg, self)`; the wrap
/// operands `[arg, this]` recurse through the ordered-list lowering so the
/// receiver expression itself is ordered correctly. Statements that
/// recursion flushes land directly in the ambient scope, and the wrapped
/// position records an empty preceding list.
pub(crate) fn transform_expressions(
    ctx: &mut LowerCtx,
    exprs: &[Expr],
    signature: Option<&Signature>,
) -> TransformedList {
    let mut transformed = Vec::with_capacity(exprs.len());
    let mut preceding = Vec::with_capacity(exprs.len());
    let mut last_preceding_index = None;

    for (i, expr) in exprs.iter().enumerate() {
        if let Some(sig) = signature {
            if sig.params.len() >= exprs.len() {
                if let Some(param) = sig.params.get(i) {
                    if needs_adapter(ctx, expr, param) {
                        let operands = [expr.clone(), Expr::synthetic_this()];
                        let wrap_args = lower_ordered_expressions(ctx, &operands);
                        transformed.push(lib_call(ctx, LibFeature::BindWrap, wrap_args));
                        preceding.push(Vec::new());
                        continue;
                    }
                }
            }
        }

        let (stmts, result) =
            ctx.transform_in_preceding_statement_scope(|c| transform_expression(c, expr));
        if !stmts.is_empty() {
            last_preceding_index = Some(i);
        }
        transformed.push(result);
        preceding.push(stmts);
    }

    TransformedList {
        exprs: transformed,
        preceding,
        last_preceding_index,
    }
}
