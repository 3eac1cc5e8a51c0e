///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) builds expression trees from symbols, constants, operators and elementary functions
/// 2) evaluates them against a map of variable values
/// 3) differentiates and antidifferentiates them symbolically
/// 4) simplifies them and turns them into Rust closures
///# Example#
/// ```
/// use RustedSymbolic::symbolic::symbolic_engine::Expr;
/// let x = Expr::symbol("x");
/// let f = x.pow(3.0);
/// println!("f = {}", f);
/// // differentiate with respect to x and simplify
/// let df_dx = f.diff("x").simplify();
/// println!("df_dx = {}", df_dx);
/// assert_eq!(df_dx.evaluate_with(&[("x", 5.0)]).unwrap(), 75.0);
/// // turn the derivative into a Rust function of positional arguments
/// let df = df_dx.to_numeric(&["x"]);
/// assert_eq!(df(&[2.0]).unwrap(), 12.0);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// errors raised by evaluation, compiled functions and numeric primitives
pub mod symbolic_errors;
/// numeric evaluation against a binding context
pub mod symbolic_evaluate;
/// elementary functions for numbers and expressions alike
pub mod symbolic_functions;
/// antiderivatives over a fixed rule table
pub mod symbolic_integration;
/// compilation of expressions into closures
pub mod symbolic_lambdify;
pub mod symbolic_simplify;
///______________________________________________________________________________________________________________________________________________
/// symbolic 3-vectors: vector symbols with function-valued components, dot and cross products
/// Example#
/// ```
/// use RustedSymbolic::symbolic::symbolic_vectors::{SymbolicVector, VectorSymbol};
/// use std::collections::HashMap;
/// let e = VectorSymbol::new("E");
/// let b = VectorSymbol::new("B");
/// // scalar triple product B . (E x B) is identically zero
/// let triple = b.dot(&e.cross(&b));
/// let ctx: HashMap<String, f64> = [("E_x", 1.0), ("E_y", 2.0), ("E_z", 3.0), ("B_x", -1.0), ("B_y", 0.5), ("B_z", 4.0)]
///     .iter()
///     .map(|(k, v)| (k.to_string(), *v))
///     .collect();
/// assert!(triple.evaluate(&ctx).unwrap().abs() < 1e-9);
/// ```
pub mod symbolic_vectors;
mod symbolic_engine_tests;
