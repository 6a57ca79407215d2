//! Method dispatch for a single computation request.
//!
//! [`solve`] validates [`Parameters`], builds the time grid, runs the chosen
//! method and, in every case, evaluates the closed-form solution on the same
//! grid. The analytical curve is part of the result contract: it is what the
//! numerical trajectory is overlaid on and compared against.

use crate::error::ParameterError;
use crate::grid::{TimeGrid, MAX_STEPS};
use crate::model::Logistic;
use crate::solvers::{integrate, Euler, Heun, RK4};
use crate::traits::{DynamicalSystem, Steppable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Euler,
    Rk2,
    Rk4,
    Analytical,
}

impl Method {
    /// All methods, in the order a method picker lists them.
    pub const ALL: [Method; 4] = [Method::Euler, Method::Rk2, Method::Rk4, Method::Analytical];

    /// Identifier accepted by [`FromStr`] and used on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Rk2 => "rk2",
            Method::Rk4 => "rk4",
            Method::Analytical => "analytical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Method::Euler => "Euler",
            Method::Rk2 => "Runge-Kutta 2",
            Method::Rk4 => "Runge-Kutta 4",
            Method::Analytical => "Analytical",
        }
    }

    /// Global order of accuracy; `None` for the exact solution.
    pub fn order(self) -> Option<u32> {
        match self {
            Method::Euler => Some(Euler::<f64>::ORDER),
            Method::Rk2 => Some(Heun::<f64>::ORDER),
            Method::Rk4 => Some(RK4::<f64>::ORDER),
            Method::Analytical => None,
        }
    }

    fn stepper(self, dim: usize) -> Option<InternalStepper> {
        match self {
            Method::Euler => Some(InternalStepper::Euler(Euler::new(dim))),
            Method::Rk2 => Some(InternalStepper::Heun(Heun::new(dim))),
            Method::Rk4 => Some(InternalStepper::Rk4(RK4::new(dim))),
            Method::Analytical => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Method::ALL
            .into_iter()
            .find(|method| method.id() == name)
            .ok_or_else(|| ParameterError::UnknownMethod(s.to_string()))
    }
}

enum InternalStepper {
    Euler(Euler<f64>),
    Heun(Heun<f64>),
    Rk4(RK4<f64>),
}

impl InternalStepper {
    fn run(
        &mut self,
        system: &impl DynamicalSystem<f64>,
        x0: f64,
        grid: &TimeGrid<f64>,
    ) -> Result<Vec<f64>, ParameterError> {
        match self {
            InternalStepper::Euler(s) => integrate(s, system, &[x0], grid),
            InternalStepper::Heun(s) => integrate(s, system, &[x0], grid),
            InternalStepper::Rk4(s) => integrate(s, system, &[x0], grid),
        }
    }
}

/// One computation request.
///
/// Missing fields deserialize to the defaults, so a front end may send only
/// what the user changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Growth rate `r`.
    pub rate: f64,
    /// Carrying capacity `K`.
    pub capacity: f64,
    /// Initial value `x0`.
    pub initial_value: f64,
    /// `t0`
    pub start_time: f64,
    /// `T`
    pub end_time: f64,
    /// Step count `N`. Signed so that a non-positive request can be reported
    /// rather than wrapped.
    pub steps: i64,
    pub method: Method,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            rate: 0.5,
            capacity: 100.0,
            initial_value: 10.0,
            start_time: 0.0,
            end_time: 20.0,
            steps: 100,
            method: Method::Analytical,
        }
    }
}

impl Parameters {
    /// Structural checks only. `K <= 0` or `x0` outside `(0, K)` pass; their
    /// consequences show up as numbers in the output.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let named = [
            ("rate", self.rate),
            ("capacity", self.capacity),
            ("initial_value", self.initial_value),
            ("start_time", self.start_time),
            ("end_time", self.end_time),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        if self.steps <= 0 {
            return Err(ParameterError::NonPositiveSteps(self.steps));
        }
        if self.steps > MAX_STEPS as i64 {
            return Err(ParameterError::TooManySteps {
                steps: self.steps,
                max: MAX_STEPS as i64,
            });
        }
        if self.end_time == self.start_time {
            return Err(ParameterError::EmptyInterval);
        }
        Ok(())
    }

    pub fn model(&self) -> Logistic<f64> {
        Logistic::new(self.rate, self.capacity)
    }

    pub fn grid(&self) -> Result<TimeGrid<f64>, ParameterError> {
        self.validate()?;
        TimeGrid::new(self.start_time, self.end_time, self.steps as usize)
    }
}

/// Result of one request. All three sequences have `N + 1` entries and are
/// index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub method: Method,
    pub times: Vec<f64>,
    /// Trajectory of the selected method.
    pub primary: Vec<f64>,
    /// Closed-form solution on the same grid. Equal to `primary` when the
    /// selected method is [`Method::Analytical`].
    pub reference: Vec<f64>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Whether the reference is a separate curve worth overlaying.
    pub fn has_distinct_reference(&self) -> bool {
        self.method != Method::Analytical
    }

    /// Pointwise `primary - reference`.
    pub fn deviations(&self) -> Vec<f64> {
        self.primary
            .iter()
            .zip(&self.reference)
            .map(|(p, r)| p - r)
            .collect()
    }

    /// Largest absolute deviation from the reference. NaN if any point is NaN.
    pub fn max_abs_deviation(&self) -> f64 {
        self.deviations().into_iter().fold(0.0, |acc: f64, d| {
            if acc.is_nan() || d.is_nan() {
                f64::NAN
            } else {
                acc.max(d.abs())
            }
        })
    }
}

/// Runs `params.method` and the analytical reference on the same grid.
///
/// Fails only on invalid parameters, before anything is computed.
pub fn solve(params: &Parameters) -> Result<Solution, ParameterError> {
    let grid = params.grid()?;
    let model = params.model();
    let x0 = params.initial_value;

    let reference = model.exact_trajectory(x0, &grid);
    let primary = match params.method.stepper(model.dimension()) {
        Some(mut stepper) => stepper.run(&model, x0, &grid)?,
        None => reference.clone(),
    };

    Ok(Solution {
        method: params.method,
        times: grid.into_times(),
        primary,
        reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(method: Method, steps: i64) -> Parameters {
        Parameters {
            rate: 0.5,
            capacity: 100.0,
            initial_value: 10.0,
            start_time: 0.0,
            end_time: 20.0,
            steps,
            method,
        }
    }

    fn error_at(method: Method, steps: i64) -> f64 {
        let p = Parameters {
            rate: 1.0,
            capacity: 1.0,
            initial_value: 0.1,
            start_time: 0.0,
            end_time: 5.0,
            steps,
            method,
        };
        solve(&p).expect("solve").max_abs_deviation()
    }

    #[test]
    fn every_method_returns_aligned_sequences() {
        for method in Method::ALL {
            let solution = solve(&params(method, 37)).expect("solve");
            assert_eq!(solution.len(), 38);
            assert_eq!(solution.primary.len(), 38);
            assert_eq!(solution.reference.len(), 38);
            assert_eq!(solution.times[0], 0.0);
            assert!((solution.times[37] - 20.0).abs() < 1e-12);
            assert_eq!(solution.primary[0], 10.0);
            assert_eq!(solution.reference[0], 10.0);
            assert_eq!(solution.method, method);
        }
    }

    #[test]
    fn every_method_starts_exactly_at_initial_value() {
        for (capacity, x0) in [(100.0, 11.0), (7.0, 3.0), (100.0, 1e-310)] {
            for method in Method::ALL {
                let p = Parameters {
                    capacity,
                    initial_value: x0,
                    ..params(method, 10)
                };
                let solution = solve(&p).expect("solve");
                assert_eq!(solution.primary[0], x0, "{method} x0 = {x0}");
                assert_eq!(solution.reference[0], x0, "{method} x0 = {x0}");
            }
        }
    }

    #[test]
    fn worked_example_with_four_steps() {
        let euler = solve(&params(Method::Euler, 4)).expect("solve");
        assert_eq!(euler.times, vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        assert!((euler.primary[1] - 32.5).abs() < 1e-12);

        let expected = 100.0 / (1.0 + 9.0 * (-2.5f64).exp());
        assert!((euler.reference[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn analytical_method_duplicates_reference() {
        let solution = solve(&params(Method::Analytical, 10)).expect("solve");
        assert_eq!(solution.primary, solution.reference);
        assert!(!solution.has_distinct_reference());
        assert_eq!(solution.max_abs_deviation(), 0.0);
    }

    #[test]
    fn numerical_methods_carry_distinct_reference() {
        let solution = solve(&params(Method::Rk2, 10)).expect("solve");
        assert!(solution.has_distinct_reference());
        assert_ne!(solution.primary, solution.reference);
        assert_eq!(solution.deviations()[0], 0.0);
    }

    #[test]
    fn equilibrium_is_preserved_by_every_method() {
        for method in Method::ALL {
            let p = Parameters {
                initial_value: 100.0,
                ..params(method, 25)
            };
            let solution = solve(&p).expect("solve");
            assert!(solution.primary.iter().all(|&x| x == 100.0), "{method}");
            assert!(solution.reference.iter().all(|&x| x == 100.0), "{method}");
        }
    }

    #[test]
    fn euler_converges_at_first_order() {
        let ratio = error_at(Method::Euler, 800) / error_at(Method::Euler, 1600);
        assert!((ratio - 2.0).abs() < 0.1, "ratio {ratio}");
    }

    #[test]
    fn rk2_converges_at_second_order() {
        let ratio = error_at(Method::Rk2, 200) / error_at(Method::Rk2, 400);
        assert!((ratio - 4.0).abs() < 0.3, "ratio {ratio}");
    }

    #[test]
    fn rk4_converges_at_fourth_order() {
        let ratio = error_at(Method::Rk4, 40) / error_at(Method::Rk4, 80);
        assert!((ratio - 16.0).abs() < 2.0, "ratio {ratio}");
    }

    #[test]
    fn higher_order_methods_are_more_accurate() {
        let euler = error_at(Method::Euler, 50);
        let rk2 = error_at(Method::Rk2, 50);
        let rk4 = error_at(Method::Rk4, 50);
        assert!(euler > rk2 && rk2 > rk4);
    }

    #[test]
    fn zero_initial_value_yields_nan_reference() {
        for method in Method::ALL {
            let p = Parameters {
                initial_value: 0.0,
                ..params(method, 8)
            };
            let solution = solve(&p).expect("degenerate input is not an error");
            assert!(solution.reference.iter().all(|v| v.is_nan()));
            assert!(solution.max_abs_deviation().is_nan());
        }
    }

    #[test]
    fn zero_initial_value_stays_zero_for_integrators() {
        let solution = solve(&Parameters {
            initial_value: 0.0,
            ..params(Method::Rk4, 8)
        })
        .expect("solve");
        assert!(solution.primary.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zero_steps_is_rejected() {
        let result = solve(&params(Method::Euler, 0));
        assert_eq!(result, Err(ParameterError::NonPositiveSteps(0)));
    }

    #[test]
    fn negative_steps_is_rejected() {
        let result = solve(&params(Method::Rk4, -3));
        assert_eq!(result, Err(ParameterError::NonPositiveSteps(-3)));
    }

    #[test]
    fn too_many_steps_is_rejected() {
        let result = solve(&params(Method::Euler, MAX_STEPS as i64 + 1));
        assert!(matches!(result, Err(ParameterError::TooManySteps { .. })));
    }

    #[test]
    fn equal_endpoints_are_rejected() {
        let p = Parameters {
            end_time: 0.0,
            ..params(Method::Rk2, 10)
        };
        assert_eq!(solve(&p), Err(ParameterError::EmptyInterval));
    }

    #[test]
    fn non_finite_parameter_is_rejected_by_name() {
        let p = Parameters {
            rate: f64::NAN,
            ..params(Method::Euler, 10)
        };
        match solve(&p) {
            Err(ParameterError::NonFinite { name, .. }) => assert_eq!(name, "rate"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unconventional_values_are_not_errors() {
        let p = Parameters {
            capacity: -5.0,
            initial_value: 20.0,
            ..params(Method::Euler, 10)
        };
        assert!(solve(&p).is_ok());
    }

    #[test]
    fn method_round_trips_through_its_id() {
        for method in Method::ALL {
            assert_eq!(method.id().parse::<Method>(), Ok(method));
        }
        assert_eq!(" RK4 ".parse::<Method>(), Ok(Method::Rk4));
        assert_eq!(
            "midpoint".parse::<Method>(),
            Err(ParameterError::UnknownMethod("midpoint".to_string()))
        );
    }

    #[test]
    fn method_metadata() {
        assert_eq!(Method::Rk2.to_string(), "Runge-Kutta 2");
        assert_eq!(Method::Euler.order(), Some(1));
        assert_eq!(Method::Rk2.order(), Some(2));
        assert_eq!(Method::Rk4.order(), Some(4));
        assert_eq!(Method::Analytical.order(), None);
    }

    #[test]
    fn default_parameters_are_valid_and_analytical() {
        let p = Parameters::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.method, Method::Analytical);
    }
}
