pub mod analytical;
pub mod error;
pub mod grid;
pub mod model;
pub mod selector;
pub mod solvers;
/// The `growth_core` crate approximates the logistic growth equation
/// `dx/dt = r*x*(1 - x/K)` with fixed-step integrators and compares the result
/// against the closed-form solution.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `DynamicalSystem` (right-hand side), `Steppable` (Solvers).
/// - **Grid**: `TimeGrid`, the uniform partition every trajectory is aligned to.
/// - **Model**: the `Logistic` right-hand side and `ScalarField` for plain closures.
/// - **Solvers**: Euler, Heun (RK2) and RK4 steppers plus `integrate`.
/// - **Selector**: `solve`, which runs one method and always the analytical reference.
pub mod traits;

pub use error::ParameterError;
pub use grid::TimeGrid;
pub use model::{Logistic, ScalarField};
pub use selector::{solve, Method, Parameters, Solution};
