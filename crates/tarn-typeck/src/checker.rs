//! The checker query layer consumed by lowering.
//!
//! Lowering asks three questions: what is the type of this expression, what
//! signature did this call resolve to, and is this symbol bound `const`.
//! The answers live in plain fact tables keyed by node/symbol id. The
//! frontend populates them after inference; tests populate them directly.

use rustc_hash::{FxHashMap, FxHashSet};
use tarn_common::{NodeId, SymbolId};

use crate::ty::{Signature, Ty};

/// Read-only type facts about a resolved program.
#[derive(Debug, Default)]
pub struct Checker {
    expr_types: FxHashMap<NodeId, Ty>,
    signatures: FxHashMap<NodeId, Signature>,
    const_symbols: FxHashSet<SymbolId>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of an expression or declaration node.
    pub fn record_type(&mut self, id: NodeId, ty: Ty) {
        self.expr_types.insert(id, ty);
    }

    /// Record the resolved signature of a call site.
    pub fn record_signature(&mut self, call: NodeId, sig: Signature) {
        self.signatures.insert(call, sig);
    }

    /// Record that a symbol is bound `const`.
    pub fn record_const(&mut self, sym: SymbolId) {
        self.const_symbols.insert(sym);
    }

    /// The type of a node at its use site, if known.
    ///
    /// Synthetic nodes and nodes the frontend never typed return `None`;
    /// lowering treats unknown types conservatively.
    pub fn type_at(&self, id: NodeId) -> Option<&Ty> {
        self.expr_types.get(&id)
    }

    /// The signature a call site resolved to, if any.
    pub fn resolved_signature(&self, call: NodeId) -> Option<&Signature> {
        self.signatures.get(&call)
    }

    /// Whether a symbol is bound `const` (safe to re-read without a temp).
    pub fn is_const_symbol(&self, sym: SymbolId) -> bool {
        self.const_symbols.contains(&sym)
    }
}
