//! The lowering context.
//!
//! All mutable lowering state lives here and is threaded explicitly through
//! every transformation call: the temp-name counter, the stack of
//! preceding-statement scopes, the set of runtime features the output
//! depends on, and collected diagnostics. There is no ambient global scope;
//! nested lowering pushes a scope, transforms, and pops the statements it
//! accumulated.

use rustc_hash::FxHashSet;
use tarn_typeck::Checker;

use crate::diagnostics::LowerDiagnostic;
use crate::features::LibFeature;
use crate::target::{TExpr, TIdent, TStmt};

/// Mutable state for one lowering run.
pub struct LowerCtx<'a> {
    /// Read-only checker facts.
    pub checker: &'a Checker,
    temp_counter: u32,
    /// Preceding-statement scopes, innermost last. Always non-empty: the
    /// root scope receives the statements flushed by the entry points.
    scopes: Vec<Vec<TStmt>>,
    used_features: FxHashSet<LibFeature>,
    diagnostics: Vec<LowerDiagnostic>,
}

impl<'a> LowerCtx<'a> {
    /// Create a context with a single root statement scope.
    pub fn new(checker: &'a Checker) -> Self {
        LowerCtx {
            checker,
            temp_counter: 0,
            scopes: vec![Vec::new()],
            used_features: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    // ── Statement scopes ─────────────────────────────────────────────

    /// Open a nested preceding-statement scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Close the innermost scope and return its statements.
    ///
    /// # Panics
    ///
    /// Panics if only the root scope remains; scopes are strictly paired
    /// with [`push_scope`](Self::push_scope).
    pub fn pop_scope(&mut self) -> Vec<TStmt> {
        assert!(self.scopes.len() > 1, "pop_scope without matching push_scope");
        self.scopes.pop().expect("scope stack is never empty")
    }

    /// Append a statement to the innermost scope.
    pub fn add_preceding_statement(&mut self, stmt: TStmt) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .push(stmt);
    }

    /// Append statements to the innermost scope, in order.
    pub fn add_preceding_statements(&mut self, stmts: impl IntoIterator<Item = TStmt>) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .extend(stmts);
    }

    /// Run `f` inside a fresh scope; return the statements it accumulated
    /// alongside its result.
    pub fn transform_in_preceding_statement_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> T,
    ) -> (Vec<TStmt>, T) {
        self.push_scope();
        let result = f(self);
        let stmts = self.pop_scope();
        (stmts, result)
    }

    /// Consume the context, returning the root scope's statements and the
    /// collected diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if a nested scope is still open.
    pub fn finish(mut self) -> (Vec<TStmt>, Vec<LowerDiagnostic>) {
        assert!(
            self.scopes.len() == 1,
            "finish with {} unclosed scope(s)",
            self.scopes.len() - 1
        );
        let stmts = self.scopes.pop().expect("scope stack is never empty");
        (stmts, self.diagnostics)
    }

    // ── Temporaries ──────────────────────────────────────────────────

    /// Allocate a unique temp name with the given prefix.
    pub fn create_temp_name(&mut self, prefix: &str) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("__{prefix}{n}")
    }

    /// Allocate a temp identifier with the given prefix.
    pub fn create_temp_ident(&mut self, prefix: &str) -> TIdent {
        let name = self.create_temp_name(prefix);
        TIdent::temp(name)
    }

    /// Allocate a temp identifier named after the expression it will hold,
    /// so generated code stays readable.
    pub fn create_temp_for_expression(&mut self, expr: &TExpr) -> TIdent {
        let prefix = temp_prefix(expr).to_string();
        self.create_temp_ident(&prefix)
    }

    // ── Runtime features ─────────────────────────────────────────────

    /// Record that the lowered output calls a runtime-library feature.
    pub fn mark_feature_used(&mut self, feature: LibFeature) {
        self.used_features.insert(feature);
    }

    /// The runtime-library features the lowered output depends on.
    pub fn used_features(&self) -> &FxHashSet<LibFeature> {
        &self.used_features
    }

    // ── Diagnostics ──────────────────────────────────────────────────

    /// Record a lowering diagnostic.
    pub fn report(&mut self, diagnostic: LowerDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[LowerDiagnostic] {
        &self.diagnostics
    }
}

/// Pick a readable temp-name prefix from the expression's shape.
fn temp_prefix(expr: &TExpr) -> &str {
    let raw = match expr {
        TExpr::Ident(id) => id.text.as_str(),
        TExpr::Call { callee, .. } => match callee.as_ref() {
            TExpr::Ident(id) => id.text.as_str(),
            _ => "tmp",
        },
        TExpr::Index { key, .. } => match key.as_ref() {
            TExpr::Str(field) => field.as_str(),
            _ => "tmp",
        },
        _ => "tmp",
    };
    let trimmed = raw.trim_start_matches('_').trim_end_matches(char::is_numeric);
    if trimmed.is_empty() {
        "tmp"
    } else {
        trimmed
    }
}
