use thiserror::Error;

/// Structural problems with a computation request.
///
/// These are detected before any trajectory is allocated. Numeric degeneracy
/// (`x0 == 0`, divergence to infinity) is never reported here; it shows up as
/// NaN/Inf in the output instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("parameter `{name}` must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("step count must be positive, got {0}")]
    NonPositiveSteps(i64),

    #[error("step count {steps} exceeds the limit of {max}")]
    TooManySteps { steps: i64, max: i64 },

    #[error("end time must differ from start time")]
    EmptyInterval,

    #[error("step size {step} is not a usable increment")]
    DegenerateStep { step: f64 },

    #[error("unknown method `{0}` (expected euler, rk2, rk4 or analytical)")]
    UnknownMethod(String),

    #[error("initial state has {actual} components but the system has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
