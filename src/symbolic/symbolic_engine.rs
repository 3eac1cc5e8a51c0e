//! # Symbolic Engine Module
//!
//! Core data model of the kernel: immutable expression trees over numeric literals,
//! named leaves and operation nodes.
//!
//! ## Main Structures
//!
//! ### `Symbol`
//! A named leaf. A leaf may be flagged as *function-valued* (e.g. the components `E_x`,
//! `E_y`, `E_z` of a field), which means it may implicitly depend on any variable. Two
//! leaves are equal iff their names are equal, the flag is metadata.
//!
//! ### `Op`
//! The closed set of operator tags
//! `+ - * / ** sin cos tan sec csc cot exp ln log sqrt abs asin acos atan partial integral`.
//! Every transformation matches on it exhaustively.
//!
//! ### `Expr`
//! - **Literals**: `Const(f64)`
//! - **Leaves**: `Symbol(Symbol)`
//! - **Operations**: `Unary(Op, Arc<Expr>)` and `Binary(Op, Arc<Expr>, Arc<Expr>)`
//!
//! Sub-trees sit behind `Arc`, so a transformation shares every operand it does not
//! rewrite, and trees can be sent to worker threads as they are.
//!
//! ## Interesting Code Features
//!
//! 1. **Operator Overloading**: `std::ops` traits for `Expr`, `&Expr` and `f64` on
//!    either side build operation nodes without evaluating anything: `2.0 * &x + &y`
//! 2. **Structural utilities**: substitution, renaming, free-symbol collection
//! 3. **Macro**: `symbols!(x, y, z)` for ergonomic leaf creation

use itertools::Itertools;
use std::fmt;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Named leaf of an expression tree.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    /// function-valued leaves may depend on any variable, so their derivative is an
    /// unresolved `partial` node instead of 0
    pub is_function: bool,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol {
            name: name.to_string(),
            is_function: false,
        }
    }

    pub fn function(name: &str) -> Self {
        Symbol {
            name: name.to_string(),
            is_function: true,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Operator tag of an operation node.
///
/// `Display`/`FromStr` use the textual tags (`"+"`, `"**"`, `"sin"`, `"partial"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Op {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "**")]
    Pow,
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Exp,
    Ln,
    /// logarithm with the base in the right operand
    Log,
    Sqrt,
    Abs,
    Asin,
    Acos,
    Atan,
    /// unresolved derivative: left = differentiated sub-tree, right = variable
    Partial,
    /// unresolved antiderivative: left = integrand, right = variable
    Integral,
}

impl Op {
    /// tags that take a single operand
    pub fn is_unary(self) -> bool {
        !matches!(
            self,
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Pow | Op::Log | Op::Partial | Op::Integral
        )
    }

    pub fn arity(self) -> usize {
        if self.is_unary() { 1 } else { 2 }
    }
}

/// Immutable expression tree.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::symbol("x");
/// let f = x.pow(2.0) + 2.0 * &x;
/// assert_eq!(f.to_string(), "((x ^ 2) + (2 * x))");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// numeric literal
    Const(f64),
    /// named leaf
    Symbol(Symbol),
    /// operation node with one operand
    Unary(Op, Arc<Expr>),
    /// operation node with two operands
    Binary(Op, Arc<Expr>, Arc<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Symbol(symbol) => write!(f, "{}", symbol),
            Expr::Unary(Op::Abs, u) => write!(f, "|{}|", u),
            Expr::Unary(op, u) => write!(f, "{}({})", op, u),
            Expr::Binary(Op::Pow, base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Binary(Op::Log, u, base) => write!(f, "log({}, {})", u, base),
            Expr::Binary(Op::Partial, u, var) => write!(f, "d({})/d({})", u, var),
            Expr::Binary(Op::Integral, u, var) => write!(f, "∫({}) d{}", u, var),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::Symbol(symbol)
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Expr::Symbol(symbol.clone())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

//___________________________________OPERATORS____________________________________

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Expr>> std::ops::$trait<R> for Expr {
            type Output = Expr;

            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl<R: Into<Expr>> std::ops::$trait<R> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl std::ops::$trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl std::ops::$trait<&Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, Op::Add);
impl_binary_operator!(Sub, sub, Op::Sub);
impl_binary_operator!(Mul, mul, Op::Mul);
impl_binary_operator!(Div, div, Op::Div);

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::binary(Op::Mul, -1.0, self)
    }
}

impl std::ops::Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::binary(Op::Mul, -1.0, self)
    }
}

impl Expr {
    /// BASIC FEATURES

    pub fn constant(value: f64) -> Expr {
        Expr::Const(value)
    }

    /// plain named leaf
    pub fn symbol(name: &str) -> Expr {
        Expr::Symbol(Symbol::new(name))
    }

    /// function-valued named leaf
    pub fn function_symbol(name: &str) -> Expr {
        Expr::Symbol(Symbol::function(name))
    }

    /// Creates multiple leaves from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty entries are skipped.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Expr::symbol)
            .collect()
    }

    /// operation node with one operand
    pub fn unary(op: Op, operand: impl Into<Expr>) -> Expr {
        Expr::Unary(op, Arc::new(operand.into()))
    }

    /// operation node with two operands, kept in order
    pub fn binary(op: Op, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::Binary(op, Arc::new(lhs.into()), Arc::new(rhs.into()))
    }

    /// `self ** exponent`
    pub fn pow(&self, exponent: impl Into<Expr>) -> Expr {
        Expr::binary(Op::Pow, self, exponent)
    }

    /// unresolved derivative node `d(self)/d(wrt)`
    pub fn partial(&self, wrt: &Symbol) -> Expr {
        Expr::binary(Op::Partial, self, wrt)
    }

    /// unresolved antiderivative node `∫(self) d wrt`
    pub fn integral(&self, wrt: &Symbol) -> Expr {
        Expr::binary(Op::Integral, self, wrt)
    }

    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(val) => Some(*val),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    /// true when the tree is exactly the leaf `var`
    pub fn is_symbol(&self, var: &Symbol) -> bool {
        matches!(self, Expr::Symbol(symbol) if symbol == var)
    }

    /// the operator tag of an operation node
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Unary(op, _) | Expr::Binary(op, _, _) => Some(*op),
            _ => None,
        }
    }

    /// STRUCTURAL UTILITIES

    /// Sorted, deduplicated names of every leaf in the tree.
    pub fn free_symbols(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_symbols(&mut names);
        names.into_iter().sorted().dedup().collect()
    }

    fn collect_symbols(&self, names: &mut Vec<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Symbol(symbol) => names.push(symbol.name.clone()),
            Expr::Unary(_, u) => u.collect_symbols(names),
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_symbols(names);
                rhs.collect_symbols(names);
            }
        }
    }

    /// check if the tree contains a leaf with the given name
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Symbol(symbol) => symbol.name == name,
            Expr::Unary(_, u) => u.contains_symbol(name),
            Expr::Binary(_, lhs, rhs) => lhs.contains_symbol(name) || rhs.contains_symbol(name),
        }
    }

    /// Whether the value of the tree may change with `name`: it contains that leaf
    /// or any function-valued leaf.
    pub fn depends_on(&self, name: &str) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Symbol(symbol) => symbol.is_function || symbol.name == name,
            Expr::Unary(_, u) => u.depends_on(name),
            Expr::Binary(_, lhs, rhs) => lhs.depends_on(name) || rhs.depends_on(name),
        }
    }

    /// rebuilds the tree with leaves replaced where `replace` returns Some
    fn map_symbols(&self, replace: &dyn Fn(&Symbol) -> Option<Expr>) -> Expr {
        match self {
            Expr::Const(_) => self.clone(),
            Expr::Symbol(symbol) => replace(symbol).unwrap_or_else(|| self.clone()),
            Expr::Unary(op, u) => Expr::Unary(*op, Arc::new(u.map_symbols(replace))),
            Expr::Binary(op, lhs, rhs) => Expr::Binary(
                *op,
                Arc::new(lhs.map_symbols(replace)),
                Arc::new(rhs.map_symbols(replace)),
            ),
        }
    }

    /// substitute a leaf with an expression
    pub fn substitute(&self, name: &str, expr: &Expr) -> Expr {
        self.map_symbols(&|symbol| (symbol.name == name).then(|| expr.clone()))
    }

    /// substitute a leaf with a literal
    pub fn set_symbol(&self, name: &str, value: f64) -> Expr {
        self.map_symbols(&|symbol| (symbol.name == name).then_some(Expr::Const(value)))
    }

    /// rename a leaf, keeping its function-valued flag
    pub fn rename_symbol(&self, old_name: &str, new_name: &str) -> Expr {
        self.map_symbols(&|symbol| {
            (symbol.name == old_name).then(|| {
                Expr::Symbol(Symbol {
                    name: new_name.to_string(),
                    is_function: symbol.is_function,
                })
            })
        })
    }

    /// number of nodes (literals, leaves and operations)
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Symbol(_) => 1,
            Expr::Unary(_, u) => 1 + u.node_count(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
        }
    }

    /// length of the longest root-to-terminal path
    pub fn depth(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Symbol(_) => 1,
            Expr::Unary(_, u) => 1 + u.depth(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
        }
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic leaves from a list of identifiers
/// Usage: let (x, y, z) = symbols!(x, y, z);
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        ($($crate::symbolic::symbolic_engine::Expr::symbol(stringify!($var))),+)
    };
}
