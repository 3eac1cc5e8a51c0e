//! LAMBDIFICATION - compiling expression trees into callable numeric functions.
//!
//! A tree is compiled once into a [`Lambda`], an interpreter tree whose leaves are
//! already resolved to positional argument slots. Calling the compiled function walks
//! that tree with the same per-node dispatch as [`Expr::evaluate`], so no name lookup
//! and no text is involved at call time.

use crate::symbolic::symbolic_engine::{Expr, Op};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_evaluate::{apply_binary, apply_unary, check_node};

/// Compiled function: positional arguments in, value out.
pub type NumericFn = Box<dyn Fn(&[f64]) -> Result<f64, SymbolicError> + Send + Sync>;

/// Interpreter tree produced by [`Expr::compile`].
#[derive(Clone, Debug, PartialEq)]
pub enum Lambda {
    /// positional argument slot
    Var(usize),
    /// leaf that is not among the compiled arguments, fails with `UnboundSymbol` when reached
    Unbound(String),
    Const(f64),
    Unary(Op, Box<Lambda>),
    Binary(Op, Box<Lambda>, Box<Lambda>),
}

impl Expr {
    /// Resolves every leaf of the tree to its position in `vars`.
    pub fn compile(&self, vars: &[&str]) -> Lambda {
        match self {
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Symbol(symbol) => match vars.iter().position(|&v| v == symbol.name) {
                Some(idx) => Lambda::Var(idx),
                None => Lambda::Unbound(symbol.name.clone()),
            },
            Expr::Unary(op, e) => Lambda::Unary(*op, Box::new(e.compile(vars))),
            Expr::Binary(op, a, b) => {
                Lambda::Binary(*op, Box::new(a.compile(vars)), Box::new(b.compile(vars)))
            }
        }
    }

    /// Simplifies the tree and compiles it into a closure over positional arguments
    /// bound to `vars` in order.
    ///
    /// The closure fails with `ArgumentCount` when called with a slice whose length
    /// differs from `vars.len()`, and with the usual evaluation errors otherwise.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let (x, y) = symbols!(x, y);
    /// let f = (x.pow(2.0) * y.sin()).diff("x").to_numeric(&["x", "y"]);
    /// assert_eq!(f(&[5.0, PI / 2.0])?, 10.0);
    /// ```
    pub fn to_numeric(&self, vars: &[&str]) -> NumericFn {
        let arity = vars.len();
        let compiled = self.simplify().compile(vars);
        Box::new(move |args: &[f64]| {
            if args.len() != arity {
                return Err(SymbolicError::ArgumentCount {
                    expected: arity,
                    found: args.len(),
                });
            }
            compiled.eval(args)
        })
    }
}

impl Lambda {
    pub fn eval(&self, args: &[f64]) -> Result<f64, SymbolicError> {
        match self {
            Lambda::Var(i) => args
                .get(*i)
                .copied()
                .ok_or(SymbolicError::ArgumentCount {
                    expected: i + 1,
                    found: args.len(),
                }),
            Lambda::Unbound(name) => Err(SymbolicError::UnboundSymbol { name: name.clone() }),
            Lambda::Const(v) => Ok(*v),
            Lambda::Unary(op, e) => {
                check_node(*op, 1)?;
                apply_unary(*op, e.eval(args)?)
            }
            Lambda::Binary(op, a, b) => {
                check_node(*op, 2)?;
                apply_binary(*op, a.eval(args)?, b.eval(args)?)
            }
        }
    }

    pub fn as_closure(self) -> impl Fn(&[f64]) -> Result<f64, SymbolicError> + Send + Sync {
        move |args| self.eval(args)
    }
}
