//! Numeric control parameters: the closeness tolerance and the finite-difference
//! step used by the kernel's numerical checks.

/// global tolerance for closeness checks
pub const EPSILON: f64 = 1e-8;
/// default step for finite differences
pub const DELTA: f64 = 1e-6;

/// Tolerances used by the kernel, loaded from the `numeric_control` section of the
/// kernel configuration or defaulted to the constants above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericControl {
    /// relative tolerance, also the absolute floor near zero
    pub epsilon: f64,
    /// finite-difference step
    pub delta: f64,
}

impl Default for NumericControl {
    fn default() -> Self {
        NumericControl {
            epsilon: EPSILON,
            delta: DELTA,
        }
    }
}

/// closeness relative to the larger magnitude, with an absolute floor
pub fn is_close_relative(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    (a - b).abs() < (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}

impl NumericControl {
    /// `a` and `b` agree within `epsilon`, relative to their magnitude
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        is_close_relative(a, b, self.epsilon, self.epsilon)
    }

    /// central difference `(f(x + delta) - f(x - delta)) / (2 delta)`
    pub fn central_difference(&self, forward: f64, backward: f64) -> f64 {
        (forward - backward) / (2.0 * self.delta)
    }
}
