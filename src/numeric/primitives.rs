//! Checked scalar primitives the symbolic kernel calls during evaluation,
//! simplification and compiled-function calls.
//!
//! Every primitive is a pure function of its arguments. Instead of silently returning
//! NaN or an infinity for an argument outside of its domain, it reports
//! [`SymbolicError::Domain`].

use crate::symbolic::symbolic_errors::SymbolicError;

type NumResult = Result<f64, SymbolicError>;

/// finite arguments must produce a finite value
fn checked(function: &'static str, arguments: &[f64], value: f64) -> NumResult {
    if arguments.iter().all(|a| a.is_finite()) && !value.is_finite() {
        Err(SymbolicError::domain(function, arguments))
    } else {
        Ok(value)
    }
}

pub fn sin(x: f64) -> NumResult {
    Ok(x.sin())
}

pub fn cos(x: f64) -> NumResult {
    Ok(x.cos())
}

pub fn tan(x: f64) -> NumResult {
    checked("tan", &[x], x.tan())
}

pub fn sec(x: f64) -> NumResult {
    let c = x.cos();
    if c == 0.0 {
        return Err(SymbolicError::domain("sec", &[x]));
    }
    checked("sec", &[x], 1.0 / c)
}

pub fn csc(x: f64) -> NumResult {
    let s = x.sin();
    if s == 0.0 {
        return Err(SymbolicError::domain("csc", &[x]));
    }
    checked("csc", &[x], 1.0 / s)
}

pub fn cot(x: f64) -> NumResult {
    let s = x.sin();
    if s == 0.0 {
        return Err(SymbolicError::domain("cot", &[x]));
    }
    checked("cot", &[x], x.cos() / s)
}

pub fn exp(x: f64) -> NumResult {
    checked("exp", &[x], x.exp())
}

pub fn ln(x: f64) -> NumResult {
    if x <= 0.0 {
        return Err(SymbolicError::domain("ln", &[x]));
    }
    Ok(x.ln())
}

/// logarithm of `x` in an arbitrary `base`
pub fn log(x: f64, base: f64) -> NumResult {
    if base <= 0.0 || base == 1.0 || x <= 0.0 {
        return Err(SymbolicError::domain("log", &[x, base]));
    }
    checked("log", &[x, base], x.ln() / base.ln())
}

pub fn sqrt(x: f64) -> NumResult {
    if x < 0.0 {
        return Err(SymbolicError::domain("sqrt", &[x]));
    }
    Ok(x.sqrt())
}

pub fn pow(base: f64, exponent: f64) -> NumResult {
    if base == 0.0 && exponent < 0.0 {
        return Err(SymbolicError::domain("pow", &[base, exponent]));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(SymbolicError::domain("pow", &[base, exponent]));
    }
    checked("pow", &[base, exponent], base.powf(exponent))
}

pub fn abs(x: f64) -> NumResult {
    Ok(x.abs())
}

pub fn asin(x: f64) -> NumResult {
    if !(-1.0..=1.0).contains(&x) {
        return Err(SymbolicError::domain("asin", &[x]));
    }
    Ok(x.asin())
}

pub fn acos(x: f64) -> NumResult {
    if !(-1.0..=1.0).contains(&x) {
        return Err(SymbolicError::domain("acos", &[x]));
    }
    Ok(x.acos())
}

pub fn atan(x: f64) -> NumResult {
    Ok(x.atan())
}

pub fn add(a: f64, b: f64) -> NumResult {
    checked("add", &[a, b], a + b)
}

pub fn sub(a: f64, b: f64) -> NumResult {
    checked("sub", &[a, b], a - b)
}

pub fn mul(a: f64, b: f64) -> NumResult {
    checked("mul", &[a, b], a * b)
}

/// besides overflow, division by zero is outside the domain
pub fn div(numerator: f64, denominator: f64) -> NumResult {
    if denominator == 0.0 {
        return Err(SymbolicError::domain("div", &[numerator, denominator]));
    }
    checked("div", &[numerator, denominator], numerator / denominator)
}
