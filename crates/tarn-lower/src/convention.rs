//! Receiver-convention classification and adapter detection.
//!
//! A value crossing an argument position may carry a calling convention that
//! disagrees with the parameter's contract. Exactly one mismatch is
//! adaptable: a receiver-taking function flowing into a contractually
//! receiver-free slot, which the runtime's receiver-binding wrapper can
//! bridge. The reverse direction has no receiver value to synthesize and is
//! never adapted, only diagnosed. Ambiguous (overloaded) conventions are
//! never adapted either.

use tarn_ast::Expr;
use tarn_typeck::{ParamSym, ReceiverConvention, Ty};

use crate::context::LowerCtx;
use crate::diagnostics::LowerDiagnostic;

/// Classify a type's receiver convention.
///
/// An optional type (`Undefined | T`) classifies as its present branch: the
/// absence-of-value member carries no convention. A type with no call
/// signatures, or with signatures that disagree, is `Mixed`.
pub fn classify(ty: &Ty) -> ReceiverConvention {
    let ty = unwrap_optional(ty);
    let mut conv: Option<ReceiverConvention> = None;
    for sig in ty.signatures() {
        match conv {
            None => conv = Some(sig.receiver),
            Some(c) if c == sig.receiver => {}
            Some(_) => return ReceiverConvention::Mixed,
        }
    }
    conv.unwrap_or(ReceiverConvention::Mixed)
}

/// Unwrap a two-member optional union to its present branch.
fn unwrap_optional(ty: &Ty) -> &Ty {
    if let Ty::Union(members) = ty {
        if let [a, b] = members.as_slice() {
            match (a, b) {
                (Ty::Undefined, present) | (present, Ty::Undefined) => return present,
                _ => {}
            }
        }
    }
    ty
}

/// Whether a type is genuinely overloaded (more than one call signature).
fn is_overloaded(ty: &Ty) -> bool {
    unwrap_optional(ty).signatures().len() > 1
}

/// Decide whether an argument needs the receiver-binding adapter to match
/// its parameter's convention.
///
/// Conservative on every unknown: a parameter without a resolvable
/// declaration, or an untyped node, never triggers adaptation. Mismatches
/// other than receiver-taking-into-`bare` are not adapted; the two
/// directions the lowerer refuses are recorded as diagnostics without
/// changing the decision.
pub fn needs_adapter(ctx: &mut LowerCtx, arg: &Expr, param: &ParamSym) -> bool {
    let Some(decl) = param.decl else {
        return false;
    };
    let checker = ctx.checker;
    let Some(from_ty) = checker.type_at(arg.id) else {
        return false;
    };
    let Some(to_ty) = checker.type_at(decl) else {
        return false;
    };

    let from_conv = classify(from_ty);
    let to_conv = classify(to_ty);

    if from_conv == ReceiverConvention::Mixed || to_conv == ReceiverConvention::Mixed {
        // Overloads with disagreeing conventions cannot be adapted to; a
        // plain non-callable type is silent (it fails elsewhere).
        if is_overloaded(from_ty) || is_overloaded(to_ty) {
            ctx.report(LowerDiagnostic::AmbiguousOverload {
                span: arg.span,
                param: param.name.clone(),
            });
        }
        return false;
    }

    if from_conv == to_conv {
        return false;
    }

    if from_conv != ReceiverConvention::None && to_conv != ReceiverConvention::None {
        if to_conv == ReceiverConvention::Bare {
            return true;
        }
        // The only remaining mismatch: a bare function flowing into a
        // receiver-taking slot. No receiver value exists to synthesize.
        ctx.report(LowerDiagnostic::UnsupportedBoundConversion {
            span: arg.span,
            param: param.name.clone(),
        });
    }

    false
}
