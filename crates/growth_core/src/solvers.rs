use crate::error::ParameterError;
use crate::grid::TimeGrid;
use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Forward Euler: `y_next = y + dt * f(t, y)`.
pub struct Euler<T: Scalar> {
    k1: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    const ORDER: u32 = 1;

    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.k1);
        for i in 0..state.len() {
            state[i] = state[i] + dt * self.k1[i];
        }
        *t = *t + dt;
    }
}

/// Heun's method, the trapezoidal predictor-corrector form of RK2.
///
/// The corrector slope is taken at the Euler-predicted endpoint, not at the
/// midpoint.
pub struct Heun<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> Heun<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            tmp: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Heun<T> {
    const ORDER: u32 = 2;

    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = T::constant(2.0);
        let t0 = *t;

        // k1 = f(t, y)
        system.apply(t0, state, &mut self.k1);

        // k2 = f(t + dt, y + dt*k1)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k1[i];
        }
        system.apply(t0 + dt, &self.tmp, &mut self.k2);

        // y_next = y + dt*(k1 + k2)/2
        for i in 0..state.len() {
            state[i] = state[i] + dt * (self.k1[i] + self.k2[i]) / two;
        }

        *t = t0 + dt;
    }
}

/// Classic Runge-Kutta 4th Order Solver
pub struct RK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            tmp: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    const ORDER: u32 = 4;

    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let half = T::constant(0.5);
        let six = T::constant(6.0);
        let two = T::constant(2.0);

        let t0 = *t;
        let t_mid = t0 + half * dt;

        // k1 = f(t, y)
        system.apply(t0, state, &mut self.k1);

        // k2 = f(t + dt/2, y + dt*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * dt * self.k1[i];
        }
        system.apply(t_mid, &self.tmp, &mut self.k2);

        // k3 = f(t + dt/2, y + dt*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * dt * self.k2[i];
        }
        system.apply(t_mid, &self.tmp, &mut self.k3);

        // k4 = f(t + dt, y + dt*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        system.apply(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for i in 0..state.len() {
            state[i] = state[i]
                + (dt / six) * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
    }
}

/// Runs `stepper` across every interval of `grid`, starting from `initial`.
///
/// Each step starts from the grid time `t[i-1]` rather than an accumulated
/// clock. States are returned flattened row-major: `grid.len()` rows of
/// `system.dimension()` values, the first row being `initial`. There is no
/// early exit; a NaN or Inf produced mid-way is carried into every later row.
pub fn integrate<T, S, D>(
    stepper: &mut S,
    system: &D,
    initial: &[T],
    grid: &TimeGrid<T>,
) -> Result<Vec<T>, ParameterError>
where
    T: Scalar,
    S: Steppable<T>,
    D: DynamicalSystem<T>,
{
    let dim = system.dimension();
    if initial.len() != dim {
        return Err(ParameterError::DimensionMismatch {
            expected: dim,
            actual: initial.len(),
        });
    }

    let h = grid.step();
    let mut states = Vec::with_capacity(grid.len() * dim);
    let mut state = initial.to_vec();
    states.extend_from_slice(&state);

    for &t_prev in &grid.times()[..grid.steps()] {
        let mut t = t_prev;
        stepper.step(system, &mut t, &mut state, h);
        states.extend_from_slice(&state);
    }

    Ok(states)
}
