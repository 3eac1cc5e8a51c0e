//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of expression trees.
//!
//! ## Key Methods
//! - `derive(wrt)` / `diff(name)` - derivative with respect to one leaf
//! - `derive_n()` - higher-order derivatives
//! - `gradient()` - all requested partial derivatives at once
//! - `check_derivative()` - compares the analytical derivative with a central finite
//!   difference
//!
//! Differentiation never fails. A node with no rule (`sqrt`, `abs`, `integral`, and
//! function-valued leaves) becomes an unresolved `partial(node, wrt)` that later
//! transformations carry through unchanged.

use crate::numeric::control::{DELTA, NumericControl};
use crate::symbolic::symbolic_engine::{Expr, Op, Symbol};
use crate::symbolic::symbolic_errors::SymbolicError;
use log::debug;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the tree with respect to `wrt`.
    ///
    /// Rules:
    /// - sum/difference: d(u ± v) = du ± dv
    /// - product rule: d(u*v) = du*v + u*dv
    /// - quotient rule: d(u/v) = (du*v - u*dv)/v^2
    /// - power rule: d(u^v) = v*u^(v-1)*du, applied for every exponent
    /// - chain rule for the elementary functions
    ///
    /// The result is not simplified.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::symbol("x");
    /// let df = x.pow(3.0).diff("x").simplify();
    /// assert_eq!(df.evaluate_with(&[("x", 5.0)])?, 75.0);
    /// ```
    pub fn derive(&self, wrt: &Symbol) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Symbol(symbol) => {
                if symbol == wrt {
                    Expr::Const(1.0)
                } else if symbol.is_function {
                    self.partial(wrt)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Unary(op, u) => {
                let u = u.as_ref();
                let du = u.derive(wrt);
                match op {
                    Op::Sin => u.cos() * du,
                    Op::Cos => (-1.0 * u.sin()) * du,
                    Op::Tan => u.sec().pow(2.0) * du,
                    Op::Sec => (u.sec() * u.tan()) * du,
                    Op::Csc => ((-1.0 * u.csc()) * u.cot()) * du,
                    Op::Cot => (-1.0 * u.csc().pow(2.0)) * du,
                    Op::Exp => u.exp() * du,
                    Op::Ln => (1.0 / u) * du,
                    Op::Asin => (1.0 / (1.0 - u.pow(2.0)).sqrt()) * du,
                    Op::Acos => (-1.0 / (1.0 - u.pow(2.0)).sqrt()) * du,
                    Op::Atan => (1.0 / (1.0 + u.pow(2.0))) * du,
                    Op::Sqrt | Op::Abs => self.unresolved_derivative(wrt),
                    Op::Add
                    | Op::Sub
                    | Op::Mul
                    | Op::Div
                    | Op::Pow
                    | Op::Log
                    | Op::Partial
                    | Op::Integral => self.malformed_derivative(*op, wrt),
                }
            }
            Expr::Binary(op, lhs, rhs) => {
                let (u, v) = (lhs.as_ref(), rhs.as_ref());
                match op {
                    Op::Add => u.derive(wrt) + v.derive(wrt),
                    Op::Sub => u.derive(wrt) - v.derive(wrt),
                    Op::Mul => u.derive(wrt) * v + u * v.derive(wrt),
                    Op::Div => (u.derive(wrt) * v - u * v.derive(wrt)) / v.pow(2.0),
                    Op::Pow => (v * u.pow(v - 1.0)) * u.derive(wrt),
                    Op::Log => (1.0 / (u * v.ln())) * u.derive(wrt),
                    Op::Partial => {
                        if v.is_symbol(wrt) {
                            Expr::Const(1.0)
                        } else {
                            Expr::Const(0.0)
                        }
                    }
                    Op::Integral => self.unresolved_derivative(wrt),
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
                    | Op::Atan => self.malformed_derivative(*op, wrt),
                }
            }
        }
    }

    fn unresolved_derivative(&self, wrt: &Symbol) -> Expr {
        debug!("no derivative rule for {}, keeping d({})/d({})", self, self, wrt);
        self.partial(wrt)
    }

    fn malformed_derivative(&self, op: Op, wrt: &Symbol) -> Expr {
        debug!("{}", SymbolicError::malformed(op, "derive"));
        self.partial(wrt)
    }

    /// derivative with respect to the leaf named `var`
    pub fn diff(&self, var: &str) -> Expr {
        self.derive(&Symbol::new(var))
    }

    /// n-th derivative, simplified after every step
    pub fn derive_n(&self, var: &str, n: usize) -> Expr {
        let mut expr = self.simplify();
        for _ in 0..n {
            expr = expr.diff(var).simplify();
        }
        expr
    }

    /// simplified partial derivatives with respect to each of `vars`, in order
    pub fn gradient(&self, vars: &[&str]) -> Vec<Expr> {
        vars.iter().map(|var| self.diff(var).simplify()).collect()
    }

    /// Compares the analytical derivative with a central finite difference of step
    /// `DELTA` at each of `points`.
    ///
    /// The tree must depend on the single leaf `var`.
    ///
    /// # Returns
    /// the largest absolute deviation and whether every point agreed within
    /// `tolerance` (relative to the magnitude of the derivative, absolute near zero)
    pub fn check_derivative(
        &self,
        var: &str,
        points: &[f64],
        tolerance: f64,
    ) -> Result<(f64, bool), SymbolicError> {
        let control = NumericControl {
            epsilon: tolerance,
            delta: DELTA,
        };
        self.check_derivative_with(&control, var, points)
    }

    /// Same as [`Expr::check_derivative`] with the step and the tolerance taken from
    /// `control` (`delta` and `epsilon`), e.g. the `numeric_control` section of a
    /// [`KernelConfig`](crate::Utils::kernel_config::KernelConfig).
    pub fn check_derivative_with(
        &self,
        control: &NumericControl,
        var: &str,
        points: &[f64],
    ) -> Result<(f64, bool), SymbolicError> {
        let analytical = self.diff(var).simplify();
        let mut max_deviation = 0.0_f64;
        let mut within = true;
        for &point in points {
            let exact = analytical.evaluate_with(&[(var, point)])?;
            let forward = self.evaluate_with(&[(var, point + control.delta)])?;
            let backward = self.evaluate_with(&[(var, point - control.delta)])?;
            let numerical = control.central_difference(forward, backward);
            max_deviation = max_deviation.max((exact - numerical).abs());
            if !control.is_close(exact, numerical) {
                debug!(
                    "derivative of {} at {} = {}: analytical {}, numerical {}",
                    self, var, point, exact, numerical
                );
                within = false;
            }
        }
        Ok((max_deviation, within))
    }
}
