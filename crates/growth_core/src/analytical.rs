//! Closed-form solution of the logistic equation.
//!
//! `x(t) = K / (1 + ((K - x0) / x0) * exp(-r * (t - t0)))`
//!
//! Used both as a selectable method and as the reference every numerical
//! trajectory is compared against.

use crate::grid::TimeGrid;
use crate::model::Logistic;
use crate::traits::Scalar;

impl<T: Scalar> Logistic<T> {
    /// Coefficient `(K - x0) / x0`. Non-finite when `x0 == 0`.
    pub fn coefficient(&self, x0: T) -> T {
        (self.capacity - x0) / x0
    }

    /// Exact state at `t` for the initial condition `x(t0) = x0`.
    ///
    /// `x0 == 0` divides by zero in the coefficient and yields NaN. Any other
    /// `x0` returns exactly `x0` at `t == t0`; elsewhere the formula is
    /// evaluated as is, overflow included.
    pub fn exact(&self, x0: T, t0: T, t: T) -> T {
        if x0.is_zero() {
            return T::nan();
        }
        if t == t0 {
            return x0;
        }
        let coefficient = self.coefficient(x0);
        let decay = (-self.rate * (t - t0)).exp();
        self.capacity / (T::one() + coefficient * decay)
    }

    /// Evaluates [`Logistic::exact`] at every point of `grid`, taking
    /// `grid.start()` as `t0`.
    pub fn exact_trajectory(&self, x0: T, grid: &TimeGrid<T>) -> Vec<T> {
        let t0 = grid.start();
        grid.times()
            .iter()
            .map(|&t| self.exact(x0, t0, t))
            .collect()
    }
}
