//! Bottom-up numeric evaluation of expression trees against a binding context.
//!
//! The per-node dispatch (`apply_unary` / `apply_binary`) is shared with the
//! simplifier's constant folding and with compiled functions, so a tree produces the
//! same number through every path.

use crate::numeric::primitives;
use crate::symbolic::symbolic_engine::{Expr, Op};
use crate::symbolic::symbolic_errors::SymbolicError;
use rayon::prelude::*;
use std::collections::HashMap;

/// name -> value map, looked up by exact name
pub type Context = HashMap<String, f64>;

/// Operand-count check shared by every numeric walker: the tag must match the node
/// shape and unresolved nodes carry no numeric value.
pub(crate) fn check_node(op: Op, operands: usize) -> Result<(), SymbolicError> {
    if op.arity() != operands || matches!(op, Op::Partial | Op::Integral) {
        return Err(SymbolicError::malformed(op, "evaluate"));
    }
    Ok(())
}

/// applies a single-operand tag through the numeric primitives
pub(crate) fn apply_unary(op: Op, a: f64) -> Result<f64, SymbolicError> {
    match op {
        Op::Sin => primitives::sin(a),
        Op::Cos => primitives::cos(a),
        Op::Tan => primitives::tan(a),
        Op::Sec => primitives::sec(a),
        Op::Csc => primitives::csc(a),
        Op::Cot => primitives::cot(a),
        Op::Exp => primitives::exp(a),
        Op::Ln => primitives::ln(a),
        Op::Sqrt => primitives::sqrt(a),
        Op::Abs => primitives::abs(a),
        Op::Asin => primitives::asin(a),
        Op::Acos => primitives::acos(a),
        Op::Atan => primitives::atan(a),
        Op::Add
        | Op::Sub
        | Op::Mul
        | Op::Div
        | Op::Pow
        | Op::Log
        | Op::Partial
        | Op::Integral => Err(SymbolicError::malformed(op, "evaluate")),
    }
}

/// applies a two-operand tag through the numeric primitives
pub(crate) fn apply_binary(op: Op, a: f64, b: f64) -> Result<f64, SymbolicError> {
    match op {
        Op::Add => primitives::add(a, b),
        Op::Sub => primitives::sub(a, b),
        Op::Mul => primitives::mul(a, b),
        Op::Div => primitives::div(a, b),
        Op::Pow => primitives::pow(a, b),
        Op::Log => primitives::log(a, b),
        // unresolved nodes carry no numeric value
        Op::Partial | Op::Integral => Err(SymbolicError::malformed(op, "evaluate")),
        Op::Sin
        | Op::Cos
        | Op::Tan
        | Op::Sec
        | Op::Csc
        | Op::Cot
        | Op::Exp
        | Op::Ln
        | Op::Sqrt
        | Op::Abs
        | Op::Asin
        | Op::Acos
        | Op::Atan => Err(SymbolicError::malformed(op, "evaluate")),
    }
}

impl Expr {
    /// EVALUATION

    /// Evaluates the tree numerically.
    ///
    /// Literals return themselves, a leaf is looked up in `context` by name and an
    /// operation applies its numeric primitive to the evaluated operands. The operator
    /// tag is checked before the operands are evaluated, so an unresolved
    /// `partial`/`integral` node reports `MalformedTree` even when its operands contain
    /// unbound leaves.
    ///
    /// # Errors
    /// - `UnboundSymbol` when a leaf has no value in `context`
    /// - `Domain` when a primitive is called outside of its domain
    /// - `MalformedTree` for unresolved nodes and operand-count mismatches
    pub fn evaluate(&self, context: &Context) -> Result<f64, SymbolicError> {
        match self {
            Expr::Const(val) => Ok(*val),
            Expr::Symbol(symbol) => {
                context
                    .get(&symbol.name)
                    .copied()
                    .ok_or_else(|| SymbolicError::UnboundSymbol {
                        name: symbol.name.clone(),
                    })
            }
            Expr::Unary(op, u) => {
                check_node(*op, 1)?;
                apply_unary(*op, u.evaluate(context)?)
            }
            Expr::Binary(op, lhs, rhs) => {
                check_node(*op, 2)?;
                let a = lhs.evaluate(context)?;
                let b = rhs.evaluate(context)?;
                apply_binary(*op, a, b)
            }
        }
    }

    /// evaluate with bindings given as `(name, value)` pairs
    pub fn evaluate_with(&self, bindings: &[(&str, f64)]) -> Result<f64, SymbolicError> {
        let context: Context = bindings
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        self.evaluate(&context)
    }

    /// Evaluates the same tree against many independent contexts on the rayon pool.
    /// Results keep the order of `contexts`.
    pub fn evaluate_batch(&self, contexts: &[Context]) -> Vec<Result<f64, SymbolicError>> {
        contexts
            .par_iter()
            .map(|context| self.evaluate(context))
            .collect()
    }
}
