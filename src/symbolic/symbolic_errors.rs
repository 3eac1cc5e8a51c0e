//! Error taxonomy of the symbolic kernel.
//!
//! Differentiation and antidifferentiation never fail: when no rule applies they
//! materialise an unresolved `partial` / `integral` node instead. Errors surface only
//! where a number has to be produced (evaluation, compiled functions, primitives).

use crate::symbolic::symbolic_engine::Op;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolicError {
    /// evaluation reached a symbol that has no value in the binding context
    #[error("symbol '{name}' has no value in the provided context")]
    UnboundSymbol { name: String },
    /// a numeric primitive was called outside of its domain
    #[error("{function} is undefined for arguments {arguments:?}")]
    Domain {
        function: &'static str,
        arguments: Vec<f64>,
    },
    /// an operation node carries a tag the given transformation has no rule for
    #[error("operator '{op}' has no rule in {transformation}")]
    MalformedTree {
        op: Op,
        transformation: &'static str,
    },
    /// reserved for the linear-algebra collaborator
    #[error("singular system: {0}")]
    SingularSystem(String),
    /// a compiled function was called with the wrong number of arguments
    #[error("compiled function expects {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },
}

impl SymbolicError {
    pub(crate) fn domain(function: &'static str, arguments: &[f64]) -> Self {
        SymbolicError::Domain {
            function,
            arguments: arguments.to_vec(),
        }
    }

    pub(crate) fn malformed(op: Op, transformation: &'static str) -> Self {
        SymbolicError::MalformedTree { op, transformation }
    }
}
