use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Floating-point type the engine computes in.
///
/// Blanket-implemented for anything that behaves like `f32`/`f64`.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {
    /// Converts a literal coefficient into `Self`.
    ///
    /// Every `Float` can represent an `f64` literal approximately; the NaN
    /// fallback only exists for exotic types whose conversion is partial.
    fn constant(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }
}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Right-hand side of `dx/dt = f(t, x)`.
///
/// Integrators only see this trait, which keeps them independent of the
/// logistic model and lets them step non-autonomous fields unchanged.
pub trait DynamicalSystem<T: Scalar> {
    /// Length of the state vector.
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A fixed-step method that advances a state by one increment.
pub trait Steppable<T: Scalar> {
    /// Formal order of accuracy of the global error.
    const ORDER: u32;

    /// Advances `state` from `t` to `t + dt` and updates `t`.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
