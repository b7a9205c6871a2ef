//! The expression-list unit.
//!
//! Lowers a sequence of expressions while flattening spreads and keeping
//! source-order evaluation observable. Two strategies exist:
//!
//! - **Temp hoisting**: emit every position's preceding statements in
//!   order, snapshotting earlier impure expressions into temporaries so
//!   later statements cannot run ahead of them.
//! - **Sparse-list fallback**: build the argument list at runtime in
//!   batches, giving up fixed arity for a single list-handle temporary.
//!   Used when a spread sits before the last position (its expansion width
//!   is unknowable at compile time) or when hoisting would need too many
//!   temporaries.
//!
//! Both strategies preserve the same guarantee: for positions i < j, every
//! side effect of expression i is observable before any side effect of
//! expression j.

use tarn_ast::{Expr, ExprKind};
use tarn_typeck::Signature;

use crate::context::LowerCtx;
use crate::expr::{transform_expressions, TransformedList};
use crate::features::{lib_call, LibFeature};
use crate::target::{TExpr, TIdent, TStmt};

/// If more than this many temps would be required to preserve execution
/// order, fall back to the sparse-list strategy instead of declaring an
/// unbounded run of locals.
pub const MAX_HOISTED_TEMPS: usize = 2;

/// Whether an already-transformed expression must be snapshotted into a
/// temp to keep its evaluation position.
///
/// Literals may be reordered freely. Generated temps are bound once, so
/// re-reading them is safe. On the source side, `const` identifiers,
/// optional-chain guard references, and `this` cannot observe new effects
/// between their position and any later statement.
pub fn should_move_to_temp(ctx: &LowerCtx, expr: &TExpr, original: Option<&Expr>) -> bool {
    if expr.is_literal() || expr.is_temp_ident() {
        return false;
    }
    if let Some(original) = original {
        if is_const_identifier(ctx, original)
            || is_guard_reference(original)
            || matches!(original.kind, ExprKind::This)
        {
            return false;
        }
    }
    true
}

fn is_const_identifier(ctx: &LowerCtx, expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Name(name) => name
            .symbol
            .is_some_and(|sym| ctx.checker.is_const_symbol(sym)),
        _ => false,
    }
}

fn is_guard_reference(expr: &Expr) -> bool {
    matches!(&expr.kind, ExprKind::Name(name) if name.guard)
}

/// Snapshot an expression into a preceding temp and return the temp
/// reference, or return the expression unchanged if it is safe inline.
pub fn move_to_preceding_temp(
    ctx: &mut LowerCtx,
    expr: TExpr,
    original: Option<&Expr>,
) -> TExpr {
    if !should_move_to_temp(ctx, &expr, original) {
        return expr;
    }
    let temp = ctx.create_temp_for_expression(&expr);
    ctx.add_preceding_statement(TStmt::Local {
        name: temp.clone(),
        value: Some(expr),
    });
    TExpr::Ident(temp)
}

/// Temp-hoisting strategy: flush per-position preceding statements in
/// order, hoisting impure expressions positioned before the last
/// statement-bearing one.
fn hoist_with_temps(ctx: &mut LowerCtx, originals: &[Expr], list: TransformedList) -> Vec<TExpr> {
    let TransformedList {
        mut exprs,
        preceding,
        last_preceding_index,
    } = list;

    for (i, stmts) in preceding.into_iter().enumerate() {
        ctx.add_preceding_statements(stmts);
        if last_preceding_index.is_some_and(|last| i < last) {
            let expr = std::mem::replace(&mut exprs[i], TExpr::Nil);
            exprs[i] = move_to_preceding_temp(ctx, expr, originals.get(i));
        }
    }
    exprs
}

/// The number of temps the hoisting strategy would declare. A pure decision
/// input: it never changes hoisting behavior.
fn count_needed_temps(
    ctx: &LowerCtx,
    originals: &[Expr],
    exprs: &[TExpr],
    last_preceding_index: Option<usize>,
) -> usize {
    let Some(last) = last_preceding_index else {
        return 0;
    };
    exprs[..last]
        .iter()
        .enumerate()
        .filter(|(i, expr)| should_move_to_temp(ctx, expr, originals.get(*i)))
        .count()
}

/// Flush a batch into the sparse list, creating the handle on first flush.
fn push_to_sparse_list(
    ctx: &mut LowerCtx,
    handle: Option<TIdent>,
    batch: Vec<TExpr>,
) -> TIdent {
    match handle {
        None => {
            let handle = ctx.create_temp_ident("list");
            let call = lib_call(ctx, LibFeature::SparseListNew, batch);
            ctx.add_preceding_statement(TStmt::Local {
                name: handle.clone(),
                value: Some(call),
            });
            handle
        }
        Some(handle) => {
            let mut args = vec![TExpr::Ident(handle.clone())];
            args.extend(batch);
            let call = lib_call(ctx, LibFeature::SparseListPush, args);
            ctx.add_preceding_statement(TStmt::Expression(call));
            handle
        }
    }
}

/// Sparse-list strategy: batch transformed expressions into incremental
/// list appends, interleaved with their preceding statements, and produce a
/// single spread of the finished list.
fn lower_with_sparse_list(
    ctx: &mut LowerCtx,
    originals: &[Expr],
    exprs: Vec<TExpr>,
    preceding: Vec<Vec<TStmt>>,
) -> Vec<TExpr> {
    let mut handle: Option<TIdent> = None;
    let mut batch: Vec<TExpr> = Vec::new();

    for (i, (expr, stmts)) in exprs.into_iter().zip(preceding).enumerate() {
        // Expressions with preceding statements must start a batch: the
        // statements have to run after everything already batched is
        // safely in the list.
        if !stmts.is_empty() && !batch.is_empty() {
            handle = Some(push_to_sparse_list(ctx, handle.take(), std::mem::take(&mut batch)));
        }

        ctx.add_preceding_statements(stmts);
        batch.push(expr);

        // Spreads must end a batch: their runtime expansion has to be
        // appended before anything after them begins evaluating.
        if originals[i].is_spread() {
            handle = Some(push_to_sparse_list(ctx, handle.take(), std::mem::take(&mut batch)));
        }
    }

    if !batch.is_empty() {
        handle = Some(push_to_sparse_list(ctx, handle.take(), batch));
    }

    // Callers never hand this path an empty list, so at least one batch
    // has been flushed by now.
    let handle = handle.expect("sparse-list lowering flushed no batch");
    vec![lib_call(
        ctx,
        LibFeature::SparseListSpread,
        vec![TExpr::Ident(handle)],
    )]
}

/// Lower a call or constructor argument list, flattening spreads and
/// preserving execution order.
///
/// Falls back to the sparse-list strategy when a spread occurs before the
/// last position, or when more than [`MAX_HOISTED_TEMPS`] temps would be
/// needed to preserve order. All preceding statements are flushed into the
/// ambient scope before this returns.
pub fn lower_call_arguments(
    ctx: &mut LowerCtx,
    exprs: &[Expr],
    signature: Option<&Signature>,
) -> Vec<TExpr> {
    let list = transform_expressions(ctx, exprs, signature);

    let first_spread = exprs.iter().position(Expr::is_spread);
    let spread_before_last = first_spread.is_some_and(|i| i + 1 < exprs.len());

    if spread_before_last
        || count_needed_temps(ctx, exprs, &list.exprs, list.last_preceding_index)
            > MAX_HOISTED_TEMPS
    {
        lower_with_sparse_list(ctx, exprs, list.exprs, list.preceding)
    } else {
        hoist_with_temps(ctx, exprs, list)
    }
}

/// Lower an ordered expression sequence (no signature, no spread handling),
/// preserving execution order via temp hoisting. All preceding statements
/// are flushed into the ambient scope before this returns.
pub fn lower_ordered_expressions(ctx: &mut LowerCtx, exprs: &[Expr]) -> Vec<TExpr> {
    let list = transform_expressions(ctx, exprs, None);
    hoist_with_temps(ctx, exprs, list)
}
