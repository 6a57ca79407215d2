//! Right-hand sides the integrators can consume.

use crate::traits::{DynamicalSystem, Scalar};
use std::marker::PhantomData;

/// Logistic growth `dx/dt = r * x * (1 - x/K)`.
///
/// `K == 0` is not guarded: the division yields Inf/NaN, which the caller
/// sees in the resulting trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic<T: Scalar> {
    pub rate: T,
    pub capacity: T,
}

impl<T: Scalar> Logistic<T> {
    pub fn new(rate: T, capacity: T) -> Self {
        Self { rate, capacity }
    }

    /// `f(x, t)`. The equation is autonomous, so `t` is ignored.
    pub fn derivative(&self, x: T, _t: T) -> T {
        self.rate * x * (T::one() - x / self.capacity)
    }
}

impl<T: Scalar> DynamicalSystem<T> for Logistic<T> {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, t: T, x: &[T], out: &mut [T]) {
        out[0] = self.derivative(x[0], t);
    }
}

/// Wraps a scalar closure `f(value, time) -> derivative` as a
/// one-dimensional system.
pub struct ScalarField<T, F> {
    f: F,
    _scalar: PhantomData<T>,
}

impl<T, F> ScalarField<T, F>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _scalar: PhantomData,
        }
    }
}

impl<T, F> DynamicalSystem<T> for ScalarField<T, F>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, t: T, x: &[T], out: &mut [T]) {
        out[0] = (self.f)(x[0], t);
    }
}
