//! Shared test harness: source-expression builders and a small evaluator
//! that executes lowered output over runtime values, recording observable
//! side effects in order.
//!
//! The evaluator models the target's multi-value rules: a call or unpack
//! expands fully in the final position of an argument list and truncates to
//! a single value elsewhere. The four runtime-library functions dispatch to
//! `tarn-rt`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_ast::{Expr, ExprKind};
use tarn_common::{NodeId, Span, SymbolId};
use tarn_lower::target::TBinOp;
use tarn_lower::{TExpr, TStmt};
use tarn_rt::{sparse_new, sparse_push, sparse_spread, wrap_function, FnValue, Value};

// ── Source-expression builders ─────────────────────────────────────────

pub fn sp() -> Span {
    Span::new(0, 1)
}

pub fn int(id: u32, n: i64) -> Expr {
    Expr::new(NodeId(id), sp(), ExprKind::Int(n))
}

pub fn name(id: u32, text: &str, sym: Option<u32>) -> Expr {
    Expr::name(NodeId(id), sp(), text, sym.map(SymbolId))
}

pub fn member(id: u32, object: Expr, field: &str) -> Expr {
    Expr::new(
        NodeId(id),
        sp(),
        ExprKind::Member {
            object: Box::new(object),
            field: field.into(),
        },
    )
}

pub fn spread(id: u32, inner: Expr) -> Expr {
    Expr::new(NodeId(id), sp(), ExprKind::Spread(Box::new(inner)))
}

/// A call whose effects are observable: `if true then f() else nil`.
///
/// The conditional forces preceding statements, so the call's effects run
/// during statement execution at the expression's source position. Reserves
/// node ids `id..id+5`.
pub fn eff_call(id: u32, fname: &str) -> Expr {
    let callee = Expr::name(NodeId(id + 1), sp(), fname, None);
    let call = Expr::new(
        NodeId(id + 2),
        sp(),
        ExprKind::Call {
            callee: Box::new(callee),
            args: vec![],
        },
    );
    Expr::new(
        NodeId(id + 4),
        sp(),
        ExprKind::If {
            cond: Box::new(Expr::new(NodeId(id + 3), sp(), ExprKind::True)),
            then_expr: Box::new(call),
            else_expr: Box::new(Expr::new(NodeId(id + 5), sp(), ExprKind::Nil)),
        },
    )
}

// ── Evaluator ──────────────────────────────────────────────────────────

/// Executes lowered statements and expressions over runtime values.
pub struct Interp {
    env: FxHashMap<String, Value>,
    effects: Rc<RefCell<Vec<String>>>,
}

impl Interp {
    pub fn new() -> Interp {
        Interp {
            env: FxHashMap::default(),
            effects: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Bind a global name.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.env.insert(name.to_string(), value);
    }

    /// The shared effect log, for closures that record their own effects.
    pub fn effects_handle(&self) -> Rc<RefCell<Vec<String>>> {
        self.effects.clone()
    }

    /// The effects observed so far, in order.
    pub fn log(&self) -> Vec<String> {
        self.effects.borrow().clone()
    }

    /// A function value that logs `label` on each call and returns fixed
    /// results.
    pub fn effect_fn(&self, label: &str, results: Vec<Value>) -> Value {
        let log = self.effects.clone();
        let label = label.to_string();
        Value::Fn(FnValue::new(move |_| {
            log.borrow_mut().push(label.clone());
            results.clone()
        }))
    }

    pub fn exec_all(&mut self, stmts: &[TStmt]) {
        for stmt in stmts {
            self.exec(stmt);
        }
    }

    fn exec(&mut self, stmt: &TStmt) {
        match stmt {
            TStmt::Local { name, value } => {
                let v = match value {
                    Some(e) => self.eval(e),
                    None => Value::Nil,
                };
                self.env.insert(name.text.clone(), v);
            }
            TStmt::Assign { target, value } => {
                let v = self.eval(value);
                match target {
                    TExpr::Ident(id) => {
                        self.env.insert(id.text.clone(), v);
                    }
                    other => panic!("unsupported assignment target: {:?}", other),
                }
            }
            TStmt::Expression(e) => {
                let _ = self.eval_multi(e);
            }
            TStmt::If {
                cond,
                then_body,
                else_body,
            } => {
                let branch = if truthy(&self.eval(cond)) {
                    then_body
                } else {
                    else_body
                };
                for stmt in branch {
                    self.exec(stmt);
                }
            }
        }
    }

    /// Evaluate to a single value (multi-values truncate).
    pub fn eval(&mut self, expr: &TExpr) -> Value {
        self.eval_multi(expr).into_iter().next().unwrap_or(Value::Nil)
    }

    /// Evaluate an argument list: non-final positions truncate to one
    /// value, the final position expands fully.
    pub fn eval_args(&mut self, exprs: &[TExpr]) -> Vec<Value> {
        let mut out = Vec::new();
        for (i, expr) in exprs.iter().enumerate() {
            if i + 1 == exprs.len() {
                out.extend(self.eval_multi(expr));
            } else {
                out.push(self.eval(expr));
            }
        }
        out
    }

    fn eval_multi(&mut self, expr: &TExpr) -> Vec<Value> {
        match expr {
            TExpr::Nil => vec![Value::Nil],
            TExpr::True => vec![Value::Bool(true)],
            TExpr::False => vec![Value::Bool(false)],
            TExpr::Int(n) => vec![Value::Int(*n)],
            TExpr::Float(x) => vec![Value::Float(*x)],
            TExpr::Str(s) => vec![Value::str(s)],
            TExpr::Ident(id) => {
                let v = self
                    .env
                    .get(&id.text)
                    .unwrap_or_else(|| panic!("undefined identifier `{}`", id.text))
                    .clone();
                vec![v]
            }
            TExpr::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs);
                let r = self.eval(rhs);
                vec![eval_bin_op(*op, l, r)]
            }
            TExpr::Index { object, key } => {
                let object = self.eval(object);
                let key = self.eval(key);
                let (Value::Obj(obj), Value::Str(field)) = (&object, &key) else {
                    panic!("unsupported index: {:?}[{:?}]", object, key)
                };
                self.effects.borrow_mut().push(format!("get:{field}"));
                vec![obj.get(field)]
            }
            TExpr::Call { callee, args } => self.eval_call(callee, args),
            TExpr::Unpack(inner) => {
                let v = self.eval(inner);
                match v {
                    Value::List(_) => sparse_spread(&v),
                    other => panic!("cannot unpack {:?}", other),
                }
            }
        }
    }

    fn eval_call(&mut self, callee: &TExpr, args: &[TExpr]) -> Vec<Value> {
        // Runtime-library functions dispatch straight to tarn-rt.
        if let TExpr::Ident(id) = callee {
            match id.text.as_str() {
                "__tarn_sparse_new" => {
                    let vals = self.eval_args(args);
                    return vec![sparse_new(vals)];
                }
                "__tarn_sparse_push" => {
                    let vals = self.eval_args(args);
                    let (handle, rest) = vals.split_first().expect("push needs a handle");
                    sparse_push(handle, rest.to_vec());
                    return vec![];
                }
                "__tarn_sparse_spread" => {
                    let v = self.eval(&args[0]);
                    return sparse_spread(&v);
                }
                "__tarn_wrap" => {
                    let vals = self.eval_args(args);
                    let Value::Fn(f) = &vals[0] else {
                        panic!("__tarn_wrap: expected function, got {:?}", vals[0])
                    };
                    return vec![Value::Fn(wrap_function(f, &vals[1]))];
                }
                _ => {}
            }
        }

        let f = self.eval(callee);
        let argv = self.eval_args(args);
        match f {
            Value::Fn(f) => f.call(&argv),
            other => panic!("cannot call {:?}", other),
        }
    }
}

fn truthy(v: &Value) -> bool {
    !matches!(v, Value::Nil | Value::Bool(false))
}

fn eval_bin_op(op: TBinOp, l: Value, r: Value) -> Value {
    match (op, &l, &r) {
        (TBinOp::Add, Value::Int(a), Value::Int(b)) => Value::Int(a + b),
        (TBinOp::Sub, Value::Int(a), Value::Int(b)) => Value::Int(a - b),
        (TBinOp::Mul, Value::Int(a), Value::Int(b)) => Value::Int(a * b),
        (TBinOp::Div, Value::Int(a), Value::Int(b)) => Value::Int(a / b),
        (TBinOp::Eq, _, _) => Value::Bool(l == r),
        (TBinOp::Lt, Value::Int(a), Value::Int(b)) => Value::Bool(a < b),
        (op, l, r) => panic!("unsupported operation: {:?} {:?} {:?}", l, op, r),
    }
}
