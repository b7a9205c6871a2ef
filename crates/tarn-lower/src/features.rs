//! Runtime-library call dispatch.
//!
//! Lowered output leans on a small runtime library for the operations the
//! target language cannot express directly. Each feature maps to one named
//! runtime function; emitting a call records the feature in the context so
//! the driver knows which runtime pieces the module needs.

use serde::Serialize;

use crate::context::LowerCtx;
use crate::target::TExpr;

/// A runtime-library operation the lowered output may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LibFeature {
    /// Construct a new sparse list from initial elements.
    SparseListNew,
    /// Append elements to an existing sparse list.
    SparseListPush,
    /// Flatten a sparse list into a multi-value result.
    SparseListSpread,
    /// Bind a receiver-taking function to a fixed receiver, memoized per
    /// receiver.
    BindWrap,
}

impl LibFeature {
    /// The runtime function implementing this feature.
    pub fn runtime_name(self) -> &'static str {
        match self {
            LibFeature::SparseListNew => "__tarn_sparse_new",
            LibFeature::SparseListPush => "__tarn_sparse_push",
            LibFeature::SparseListSpread => "__tarn_sparse_spread",
            LibFeature::BindWrap => "__tarn_wrap",
        }
    }
}

/// Emit a call to a runtime-library feature, recording its use.
pub fn lib_call(ctx: &mut LowerCtx, feature: LibFeature, args: Vec<TExpr>) -> TExpr {
    ctx.mark_feature_used(feature);
    TExpr::call(TExpr::ident(feature.runtime_name()), args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarn_typeck::Checker;

    #[test]
    fn lib_call_records_feature_use() {
        let checker = Checker::new();
        let mut ctx = LowerCtx::new(&checker);
        assert!(ctx.used_features().is_empty());

        let call = lib_call(&mut ctx, LibFeature::SparseListNew, vec![TExpr::Int(1)]);
        assert!(ctx.used_features().contains(&LibFeature::SparseListNew));
        match call {
            TExpr::Call { callee, args } => {
                assert_eq!(*callee, TExpr::ident("__tarn_sparse_new"));
                assert_eq!(args, vec![TExpr::Int(1)]);
            }
            other => panic!("expected call, got {:?}", other),
        }
    }
}
