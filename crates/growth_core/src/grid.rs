use crate::error::ParameterError;
use crate::traits::Scalar;

/// Upper bound on the step count of a single request.
pub const MAX_STEPS: usize = 10_000_000;

/// Uniform partition `t[i] = t0 + i*h` of `[t0, T]` into `N` steps.
///
/// `T < t0` is allowed and yields a decreasing grid with a negative step.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid<T: Scalar> {
    times: Vec<T>,
    step: T,
}

impl<T: Scalar> TimeGrid<T> {
    pub fn new(start: T, end: T, steps: usize) -> Result<Self, ParameterError> {
        if steps == 0 {
            return Err(ParameterError::NonPositiveSteps(0));
        }
        if steps > MAX_STEPS {
            return Err(ParameterError::TooManySteps {
                steps: i64::try_from(steps).unwrap_or(i64::MAX),
                max: MAX_STEPS as i64,
            });
        }
        if end == start {
            return Err(ParameterError::EmptyInterval);
        }

        let step = (end - start) / index_as::<T>(steps);
        if step.is_zero() || !step.is_finite() {
            return Err(ParameterError::DegenerateStep {
                step: step.to_f64().unwrap_or(f64::NAN),
            });
        }

        let times = (0..=steps)
            .map(|i| start + index_as::<T>(i) * step)
            .collect();

        Ok(Self { times, step })
    }

    /// Signed step size `h`.
    pub fn step(&self) -> T {
        self.step
    }

    /// Number of steps `N`; the grid holds `N + 1` points.
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a grid has at least two points.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> T {
        self.times[0]
    }

    pub fn end(&self) -> T {
        self.times[self.times.len() - 1]
    }

    pub fn times(&self) -> &[T] {
        &self.times
    }

    pub fn into_times(self) -> Vec<T> {
        self.times
    }
}

// Exact for every index up to MAX_STEPS, even in f32.
fn index_as<T: Scalar>(i: usize) -> T {
    T::from_usize(i).unwrap_or_else(T::nan)
}
