//! Symbolic 3-vectors.
//!
//! Two flavours share the [`SymbolicVector`] interface:
//! - [`VectorSymbol`]: built from a base name `V`, its components are the
//!   function-valued leaves `V_x`, `V_y`, `V_z`
//! - [`VectorComponents`]: three independent trees, the result of every arithmetic
//!   operation on vectors
//!
//! Evaluation produces a `nalgebra::Vector3<f64>`.

use crate::symbolic::symbolic_engine::{Expr, Symbol};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_evaluate::Context;
use nalgebra::Vector3;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Compiled vector-valued function: positional arguments in, 3-vector out.
pub type NumericVectorFn =
    Box<dyn Fn(&[f64]) -> Result<Vector3<f64>, SymbolicError> + Send + Sync>;

/// Common interface of the vector flavours.
pub trait SymbolicVector {
    fn x(&self) -> &Expr;
    fn y(&self) -> &Expr;
    fn z(&self) -> &Expr;

    /// applies `f` to each component
    fn map<F: Fn(&Expr) -> Expr>(&self, f: F) -> VectorComponents {
        VectorComponents::new(f(self.x()), f(self.y()), f(self.z()))
    }

    /// Dot product (symbolic): a.x*b.x + a.y*b.y + a.z*b.z
    fn dot<V: SymbolicVector + ?Sized>(&self, other: &V) -> Expr {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product (symbolic), determinant expansion
    fn cross<V: SymbolicVector + ?Sized>(&self, other: &V) -> VectorComponents {
        VectorComponents::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Evaluates each component independently against `context`.
    fn evaluate(&self, context: &Context) -> Result<Vector3<f64>, SymbolicError> {
        Ok(Vector3::new(
            self.x().evaluate(context)?,
            self.y().evaluate(context)?,
            self.z().evaluate(context)?,
        ))
    }

    /// Differentiate with respect to a leaf, component-wise
    fn derive(&self, wrt: &Symbol) -> VectorComponents {
        self.map(|c| c.derive(wrt))
    }

    fn diff(&self, var: &str) -> VectorComponents {
        self.derive(&Symbol::new(var))
    }

    /// Antiderivative with respect to a leaf, component-wise
    fn antiderive(&self, wrt: &Symbol) -> VectorComponents {
        self.map(|c| c.antiderive(wrt))
    }

    /// Simplify all components
    fn simplify(&self) -> VectorComponents {
        self.map(|c| c.simplify())
    }

    /// Compiles the three components against the same ordered argument names.
    fn to_numeric(&self, vars: &[&str]) -> NumericVectorFn {
        let fx = self.x().to_numeric(vars);
        let fy = self.y().to_numeric(vars);
        let fz = self.z().to_numeric(vars);
        Box::new(move |args: &[f64]| Ok(Vector3::new(fx(args)?, fy(args)?, fz(args)?)))
    }
}

impl<T: SymbolicVector + ?Sized> SymbolicVector for &T {
    fn x(&self) -> &Expr {
        (**self).x()
    }
    fn y(&self) -> &Expr {
        (**self).y()
    }
    fn z(&self) -> &Expr {
        (**self).z()
    }
}

/// Vector whose components are the function-valued leaves `name_x`, `name_y`, `name_z`.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorSymbol {
    pub name: String,
    x: Expr,
    y: Expr,
    z: Expr,
}

impl VectorSymbol {
    pub fn new(name: &str) -> Self {
        VectorSymbol {
            name: name.to_string(),
            x: Expr::function_symbol(&format!("{}_x", name)),
            y: Expr::function_symbol(&format!("{}_y", name)),
            z: Expr::function_symbol(&format!("{}_z", name)),
        }
    }

    /// names of the component leaves, in x, y, z order
    pub fn component_names(&self) -> [String; 3] {
        [
            format!("{}_x", self.name),
            format!("{}_y", self.name),
            format!("{}_z", self.name),
        ]
    }
}

impl SymbolicVector for VectorSymbol {
    fn x(&self) -> &Expr {
        &self.x
    }
    fn y(&self) -> &Expr {
        &self.y
    }
    fn z(&self) -> &Expr {
        &self.z
    }
}

impl fmt::Display for VectorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vec({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Three independent component trees.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorComponents {
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
}

impl VectorComponents {
    pub fn new(x: impl Into<Expr>, y: impl Into<Expr>, z: impl Into<Expr>) -> Self {
        VectorComponents {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

impl SymbolicVector for VectorComponents {
    fn x(&self) -> &Expr {
        &self.x
    }
    fn y(&self) -> &Expr {
        &self.y
    }
    fn z(&self) -> &Expr {
        &self.z
    }
}

impl fmt::Display for VectorComponents {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VecExpr(x: {}, y: {}, z: {})", self.x, self.y, self.z)
    }
}

fn zip_with<A, B, F>(a: &A, b: &B, f: F) -> VectorComponents
where
    A: SymbolicVector + ?Sized,
    B: SymbolicVector + ?Sized,
    F: Fn(&Expr, &Expr) -> Expr,
{
    VectorComponents::new(f(a.x(), b.x()), f(a.y(), b.y()), f(a.z(), b.z()))
}

// component-wise arithmetic, always producing VectorComponents
macro_rules! impl_vector_arithmetic {
    ($t:ty) => {
        impl<R: SymbolicVector> Add<R> for $t {
            type Output = VectorComponents;

            fn add(self, rhs: R) -> VectorComponents {
                zip_with(&self, &rhs, |a, b| a + b)
            }
        }

        impl<R: SymbolicVector> Sub<R> for $t {
            type Output = VectorComponents;

            fn sub(self, rhs: R) -> VectorComponents {
                zip_with(&self, &rhs, |a, b| a - b)
            }
        }

        // scalar multiplication, scalar on the right
        impl<S: Into<Expr>> Mul<S> for $t {
            type Output = VectorComponents;

            fn mul(self, scalar: S) -> VectorComponents {
                let scalar = scalar.into();
                self.map(|c| c * &scalar)
            }
        }

        impl Neg for $t {
            type Output = VectorComponents;

            fn neg(self) -> VectorComponents {
                self.map(|c| -c)
            }
        }

        // scalar multiplication, scalar on the left
        impl Mul<$t> for f64 {
            type Output = VectorComponents;

            fn mul(self, vector: $t) -> VectorComponents {
                vector.map(|c| self * c)
            }
        }

        impl Mul<$t> for Expr {
            type Output = VectorComponents;

            fn mul(self, vector: $t) -> VectorComponents {
                vector.map(|c| &self * c)
            }
        }

        impl Mul<$t> for &Expr {
            type Output = VectorComponents;

            fn mul(self, vector: $t) -> VectorComponents {
                vector.map(|c| self * c)
            }
        }
    };
}

impl_vector_arithmetic!(VectorSymbol);
impl_vector_arithmetic!(&VectorSymbol);
impl_vector_arithmetic!(VectorComponents);
impl_vector_arithmetic!(&VectorComponents);
