//! Elementary functions applicable to numbers and trees alike.
//!
//! Applied to an `f64` a function computes immediately through the checked numeric
//! primitive. Applied to a tree it builds an operation node, except that a literal
//! operand is folded when the primitive succeeds; a failing literal (e.g. `ln(-1)`)
//! keeps its node and the domain error surfaces at evaluation time.
//!
//! ```rust, ignore
//! use RustedSymbolic::symbolic::symbolic_functions::{sin, ln};
//! let x = Expr::symbol("x");
//! let node = sin(&x);          // Expr: sin(x)
//! let value = ln(1.0)?;        // f64: 0
//! ```

use crate::numeric::primitives;
use crate::symbolic::symbolic_engine::{Expr, Op};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_evaluate::apply_unary;
use log::debug;

/// Dispatch of the elementary functions over the operand kind.
pub trait MathFunctions {
    type Output;
    fn sin(self) -> Self::Output;
    fn cos(self) -> Self::Output;
    fn tan(self) -> Self::Output;
    fn sec(self) -> Self::Output;
    fn csc(self) -> Self::Output;
    fn cot(self) -> Self::Output;
    fn exp(self) -> Self::Output;
    fn ln(self) -> Self::Output;
    fn log(self, base: f64) -> Self::Output;
    fn log10(self) -> Self::Output;
    fn sqrt(self) -> Self::Output;
    fn abs(self) -> Self::Output;
    fn asin(self) -> Self::Output;
    fn acos(self) -> Self::Output;
    fn atan(self) -> Self::Output;
}

impl MathFunctions for f64 {
    type Output = Result<f64, SymbolicError>;
    fn sin(self) -> Self::Output {
        primitives::sin(self)
    }
    fn cos(self) -> Self::Output {
        primitives::cos(self)
    }
    fn tan(self) -> Self::Output {
        primitives::tan(self)
    }
    fn sec(self) -> Self::Output {
        primitives::sec(self)
    }
    fn csc(self) -> Self::Output {
        primitives::csc(self)
    }
    fn cot(self) -> Self::Output {
        primitives::cot(self)
    }
    fn exp(self) -> Self::Output {
        primitives::exp(self)
    }
    fn ln(self) -> Self::Output {
        primitives::ln(self)
    }
    fn log(self, base: f64) -> Self::Output {
        primitives::log(self, base)
    }
    fn log10(self) -> Self::Output {
        primitives::log(self, 10.0)
    }
    fn sqrt(self) -> Self::Output {
        primitives::sqrt(self)
    }
    fn abs(self) -> Self::Output {
        primitives::abs(self)
    }
    fn asin(self) -> Self::Output {
        primitives::asin(self)
    }
    fn acos(self) -> Self::Output {
        primitives::acos(self)
    }
    fn atan(self) -> Self::Output {
        primitives::atan(self)
    }
}

macro_rules! impl_math_functions_for_expr {
    ($t:ty) => {
        impl MathFunctions for $t {
            type Output = Expr;
            fn sin(self) -> Expr {
                Expr::sin(&self)
            }
            fn cos(self) -> Expr {
                Expr::cos(&self)
            }
            fn tan(self) -> Expr {
                Expr::tan(&self)
            }
            fn sec(self) -> Expr {
                Expr::sec(&self)
            }
            fn csc(self) -> Expr {
                Expr::csc(&self)
            }
            fn cot(self) -> Expr {
                Expr::cot(&self)
            }
            fn exp(self) -> Expr {
                Expr::exp(&self)
            }
            fn ln(self) -> Expr {
                Expr::ln(&self)
            }
            fn log(self, base: f64) -> Expr {
                Expr::log(&self, base)
            }
            fn log10(self) -> Expr {
                Expr::log10(&self)
            }
            fn sqrt(self) -> Expr {
                Expr::sqrt(&self)
            }
            fn abs(self) -> Expr {
                Expr::abs(&self)
            }
            fn asin(self) -> Expr {
                Expr::asin(&self)
            }
            fn acos(self) -> Expr {
                Expr::acos(&self)
            }
            fn atan(self) -> Expr {
                Expr::atan(&self)
            }
        }
    };
}

impl_math_functions_for_expr!(Expr);
impl_math_functions_for_expr!(&Expr);

/// Builds `op(operand)`, folding a literal operand when the primitive succeeds.
pub(crate) fn fold_unary(op: Op, operand: &Expr) -> Expr {
    if let Expr::Const(val) = operand {
        match apply_unary(op, *val) {
            Ok(folded) => return Expr::Const(folded),
            Err(err) => debug!("{} not folded: {}", op, err),
        }
    }
    Expr::unary(op, operand)
}

impl Expr {
    /// ELEMENTARY FUNCTIONS
    pub fn sin(&self) -> Expr {
        fold_unary(Op::Sin, self)
    }
    pub fn cos(&self) -> Expr {
        fold_unary(Op::Cos, self)
    }
    pub fn tan(&self) -> Expr {
        fold_unary(Op::Tan, self)
    }
    pub fn sec(&self) -> Expr {
        fold_unary(Op::Sec, self)
    }
    pub fn csc(&self) -> Expr {
        fold_unary(Op::Csc, self)
    }
    pub fn cot(&self) -> Expr {
        fold_unary(Op::Cot, self)
    }
    pub fn exp(&self) -> Expr {
        fold_unary(Op::Exp, self)
    }
    pub fn ln(&self) -> Expr {
        fold_unary(Op::Ln, self)
    }
    pub fn sqrt(&self) -> Expr {
        fold_unary(Op::Sqrt, self)
    }
    pub fn abs(&self) -> Expr {
        fold_unary(Op::Abs, self)
    }
    pub fn asin(&self) -> Expr {
        fold_unary(Op::Asin, self)
    }
    pub fn acos(&self) -> Expr {
        fold_unary(Op::Acos, self)
    }
    pub fn atan(&self) -> Expr {
        fold_unary(Op::Atan, self)
    }

    /// Logarithm with the base in the right operand: `log(self, base)`.
    pub fn log(&self, base: impl Into<Expr>) -> Expr {
        let base = base.into();
        if let (Expr::Const(x), Expr::Const(b)) = (self, &base) {
            match primitives::log(*x, *b) {
                Ok(folded) => return Expr::Const(folded),
                Err(err) => debug!("log not folded: {}", err),
            }
        }
        Expr::binary(Op::Log, self, base)
    }

    /// `log(self, 10)`
    pub fn log10(&self) -> Expr {
        self.log(10.0)
    }
}

pub fn sin<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::sin(x)
}
pub fn cos<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::cos(x)
}
pub fn tan<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::tan(x)
}
pub fn sec<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::sec(x)
}
pub fn csc<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::csc(x)
}
pub fn cot<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::cot(x)
}
pub fn exp<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::exp(x)
}
pub fn ln<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::ln(x)
}
pub fn log<T: MathFunctions>(x: T, base: f64) -> T::Output {
    MathFunctions::log(x, base)
}
pub fn log10<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::log10(x)
}
pub fn sqrt<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::sqrt(x)
}
pub fn abs<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::abs(x)
}
pub fn asin<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::asin(x)
}
pub fn acos<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::acos(x)
}
pub fn atan<T: MathFunctions>(x: T) -> T::Output {
    MathFunctions::atan(x)
}
