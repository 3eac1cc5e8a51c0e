//! numeric collaborators of the symbolic kernel
/// checked scalar primitives (sin, ln, pow, ...) returning domain errors instead of NaN
pub mod primitives;
/// tolerances, finite-difference step and closeness helpers
pub mod control;
