//! # Symbolic Integration Module
//!
//! Indefinite integration over a narrow rule table. A rule only applies when the
//! operand chain reduces to the integration variable itself; there is no general
//! substitution and no integration by parts. Any other shape yields an unresolved
//! `integral(subtree, var)` node instead of an error.

use crate::symbolic::symbolic_engine::{Expr, Op, Symbol};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_evaluate::Context;
use log::debug;

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// One antiderivative of the tree with respect to `wrt` (no constant of integration).
    pub fn antiderive(&self, wrt: &Symbol) -> Expr {
        match self {
            // ∫ c dx = c*x
            Expr::Const(c) => Expr::Const(*c) * Expr::from(wrt),
            // ∫ x dx = x²/2, ∫ y dx = y*x (if y ≠ x)
            Expr::Symbol(symbol) => {
                if symbol == wrt {
                    Expr::from(wrt).pow(2.0) / 2.0
                } else if symbol.is_function {
                    self.unresolved_integral(wrt)
                } else {
                    self * Expr::from(wrt)
                }
            }
            Expr::Unary(op, u) => self.integrate_unary(*op, u, wrt),
            Expr::Binary(op, lhs, rhs) => match op {
                // ∫ (f ± g) dx = ∫ f dx ± ∫ g dx
                Op::Add => lhs.antiderive(wrt) + rhs.antiderive(wrt),
                Op::Sub => lhs.antiderive(wrt) - rhs.antiderive(wrt),
                Op::Mul => self.integrate_multiplication(lhs, rhs, wrt),
                Op::Div => self.integrate_division(lhs, rhs, wrt),
                Op::Pow => self.integrate_power(lhs, rhs, wrt),
                Op::Log => self.integrate_logarithm(lhs, rhs, wrt),
                Op::Partial | Op::Integral => self.unresolved_integral(wrt),
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
                | Op::Atan => {
                    debug!("{}", SymbolicError::malformed(*op, "antiderive"));
                    self.integral(wrt)
                }
            },
        }
    }

    fn unresolved_integral(&self, wrt: &Symbol) -> Expr {
        debug!("no antiderivative rule for {}, keeping ∫({}) d{}", self, self, wrt);
        self.integral(wrt)
    }

    /// constant multiples: ∫ c*f dx = c*∫ f dx and ∫ f*c dx = ∫ f dx*c
    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, wrt: &Symbol) -> Expr {
        if !lhs.depends_on(&wrt.name) {
            return lhs * rhs.antiderive(wrt);
        }
        if !rhs.depends_on(&wrt.name) {
            return lhs.antiderive(wrt) * rhs;
        }
        self.unresolved_integral(wrt)
    }

    /// ∫ f/c dx = ∫ f dx / c
    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, wrt: &Symbol) -> Expr {
        if !rhs.depends_on(&wrt.name) {
            return lhs.antiderive(wrt) / rhs;
        }
        self.unresolved_integral(wrt)
    }

    fn integrate_power(&self, base: &Expr, exp: &Expr, wrt: &Symbol) -> Expr {
        // ∫ x^n dx = x^(n+1)/(n+1), ∫ x^-1 dx = ln|x|
        if base.is_symbol(wrt) && !exp.depends_on(&wrt.name) {
            return match exp.simplify() {
                Expr::Const(n) if n == -1.0 => base.abs().ln(),
                Expr::Const(n) => base.pow(n + 1.0) / (n + 1.0),
                exp => base.pow(&exp + 1.0) / (&exp + 1.0),
            };
        }
        // ∫ a^x dx = a^x / ln(a)
        if exp.is_symbol(wrt) && !base.depends_on(&wrt.name) {
            if base.is_one() {
                return exp.clone();
            }
            return base.pow(exp) / base.ln();
        }
        self.unresolved_integral(wrt)
    }

    /// ∫ log_b(x) dx = (x*ln(x) - x)/ln(b)
    fn integrate_logarithm(&self, u: &Expr, base: &Expr, wrt: &Symbol) -> Expr {
        if u.is_symbol(wrt) && !base.depends_on(&wrt.name) {
            return (u * u.ln() - u) / base.ln();
        }
        self.unresolved_integral(wrt)
    }

    fn integrate_unary(&self, op: Op, u: &Expr, wrt: &Symbol) -> Expr {
        if !u.is_symbol(wrt) {
            return self.unresolved_integral(wrt);
        }
        match op {
            Op::Sin => -u.cos(),
            Op::Cos => u.sin(),
            Op::Tan => -u.cos().abs().ln(),
            Op::Sec => (u.sec() + u.tan()).abs().ln(),
            Op::Csc => (u / 2.0).tan().abs().ln(),
            Op::Cot => u.sin().abs().ln(),
            Op::Exp => u.exp(),
            Op::Ln => u * u.ln() - u,
            Op::Asin => u * u.asin() + (1.0 - u.pow(2.0)).sqrt(),
            Op::Acos => u * u.acos() - (1.0 - u.pow(2.0)).sqrt(),
            Op::Atan => u * u.atan() - 0.5 * (u.pow(2.0) + 1.0).ln(),
            Op::Sqrt | Op::Abs => self.unresolved_integral(wrt),
            Op::Add
            | Op::Sub
            | Op::Mul
            | Op::Div
            | Op::Pow
            | Op::Log
            | Op::Partial
            | Op::Integral => {
                debug!("{}", SymbolicError::malformed(op, "antiderive"));
                self.integral(wrt)
            }
        }
    }

    /// antiderivative with respect to the leaf named `var`
    pub fn integrate(&self, var: &str) -> Expr {
        debug!("integrating {} d{}", self, var);
        self.antiderive(&Symbol::new(var))
    }

    /// Definite integration using the fundamental theorem of calculus: F(upper) - F(lower).
    ///
    /// Other leaves of the tree are bound from `context`.
    ///
    /// # Errors
    /// `MalformedTree` when the antiderivative still contains an unresolved `integral`
    /// node, plus every error of `evaluate`.
    pub fn definite_antiderive(
        &self,
        var: &str,
        lower: f64,
        upper: f64,
        context: &Context,
    ) -> Result<f64, SymbolicError> {
        let indefinite = self.integrate(var).simplify();
        let mut bound = context.clone();
        bound.insert(var.to_string(), upper);
        let upper_val = indefinite.evaluate(&bound)?;
        bound.insert(var.to_string(), lower);
        let lower_val = indefinite.evaluate(&bound)?;
        Ok(upper_val - lower_val)
    }
}
