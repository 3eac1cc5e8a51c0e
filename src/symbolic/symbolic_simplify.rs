//! # Symbolic Expression Simplification Module
//!
//! Post-order algebraic simplification:
//!
//! 1. **Constant Folding**: a binary operation over two literals is computed, and so is
//!    an elementary function of a literal, whenever the numeric primitive succeeds.
//!    Division by a literal zero, out-of-domain powers and overflowing arithmetic are
//!    left unfolded so that simplification never fabricates a numeric error or a
//!    non-finite literal.
//! 2. **Algebraic Identities**: `x+0`, `0+x`, `x-0`, `x-x`, `x*0`, `0*x`, `x*1`, `1*x`,
//!    `0/x`, `x/1`, `x/x`, `x^0`, `x^1`, `1^x`. `x/0` is kept.
//!
//! When no rule fires the node is rebuilt over the simplified operands. Every rule either
//! returns an already simplified operand, a literal, or a node over simplified operands
//! none of whose rules fire, so `simplify` is idempotent.

use crate::symbolic::symbolic_engine::{Expr, Op};
use crate::symbolic::symbolic_evaluate::{apply_binary, apply_unary};
use log::debug;
use std::sync::Arc;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the tree bottom-up.
    ///
    /// ## Examples
    ///
    /// - `(x * 0) + x` → `x`
    /// - `2 + 3` → `5`
    /// - `x / 0` → `x / 0`
    /// - `d(f)/d(x) * 1` → `d(f)/d(x)`
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Symbol(_) => self.clone(),
            Expr::Unary(op, u) => {
                let u = u.simplify();
                if let Expr::Const(val) = u {
                    if op.is_unary() {
                        match apply_unary(*op, val) {
                            Ok(folded) => return Expr::Const(folded),
                            Err(err) => debug!("{}({}) not folded: {}", op, val, err),
                        }
                    }
                }
                Expr::Unary(*op, Arc::new(u))
            }
            Expr::Binary(op, lhs, rhs) => simplify_binary(*op, lhs.simplify(), rhs.simplify()),
        }
    }
}

fn simplify_binary(op: Op, u: Expr, v: Expr) -> Expr {
    // constant folding
    if let (Expr::Const(a), Expr::Const(b)) = (&u, &v) {
        let foldable = !op.is_unary() && !matches!(op, Op::Partial | Op::Integral);
        if foldable && !(op == Op::Div && *b == 0.0) {
            match apply_binary(op, *a, *b) {
                Ok(folded) => return Expr::Const(folded),
                Err(err) => debug!("({} {} {}) not folded: {}", a, op, b, err),
            }
        }
    }

    // identities
    match op {
        Op::Add => {
            if u.is_zero() {
                return v;
            }
            if v.is_zero() {
                return u;
            }
        }
        Op::Sub => {
            if v.is_zero() {
                return u;
            }
            if u == v {
                return Expr::Const(0.0);
            }
        }
        Op::Mul => {
            if u.is_zero() || v.is_zero() {
                return Expr::Const(0.0);
            }
            if u.is_one() {
                return v;
            }
            if v.is_one() {
                return u;
            }
        }
        Op::Div => {
            if !v.is_zero() {
                if u.is_zero() {
                    return Expr::Const(0.0);
                }
                if v.is_one() {
                    return u;
                }
                if u == v {
                    return Expr::Const(1.0);
                }
            }
        }
        Op::Pow => {
            if v.is_zero() {
                return Expr::Const(1.0);
            }
            if v.is_one() {
                return u;
            }
            if u.is_one() {
                return Expr::Const(1.0);
            }
        }
        _ => {}
    }

    Expr::Binary(op, Arc::new(u), Arc::new(v))
}
