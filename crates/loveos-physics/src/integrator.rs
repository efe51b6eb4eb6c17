// ─────────────────────────────────────────────────────────────────────
// Love-OS — ODE Integrator Core
// Mirrors: core.py (Euler micro-steps) + minimal simulator.py (RK4)
// ─────────────────────────────────────────────────────────────────────
//! Fixed-step advancement of a small continuous state vector under a
//! pluggable nonlinear vector field.
//!
//! Two stepping strategies:
//! - `SubSteppedEuler { substeps: k }` — k internal Euler updates of
//!   size dt/k within one externally visible step, all reading the
//!   same coefficient/forcing snapshot. Callers schedule effects once
//!   per external step; the sub-steps only smooth the dynamics.
//! - `Rk4` — classic 4th-order Runge–Kutta (stages at t, t+dt/2
//!   twice, t+dt, weights 1,2,2,1 over 6). The coefficient snapshot
//!   and the coupling partner are frozen for the whole step; only the
//!   stage time varies, so slowly ramping terms like μ(t) integrate
//!   correctly.
//!
//! After every external step each component is hard-clamped to its
//! declared interval (anti-divergence saturation, silent and
//! intentional) and each angular component is renormalized to
//! (-π, π] so unbounded phase drift cannot corrupt trigonometric
//! readouts.

use serde::{Deserialize, Serialize};

use loveos_types::{KernelError, KernelResult};

/// A nonlinear vector field dstate/dt = f(t, state, forcing, partner).
///
/// The derivative itself is configuration: each model variant
/// implements this trait over its own resolved parameter struct. The
/// optional `partner` is the coupling peer's start-of-step state.
pub trait VectorField {
    /// State dimensionality.
    fn dim(&self) -> usize;

    /// Write dstate/dt into `out` (len == dim()).
    fn derivative(&self, t: f64, state: &[f64], forcing: f64, partner: Option<&[f64]>, out: &mut [f64]);

    /// Per-component hard clamp bounds, applied after each step.
    /// Unbounded components use infinite bounds.
    fn clamp_bounds(&self) -> &[(f64, f64)];

    /// Indices of angular components wrapped to (-π, π] after each
    /// step.
    fn wrapped(&self) -> &[usize] {
        &[]
    }
}

/// Renormalize an angle to (-π, π] (atan2 of its unit vector).
#[inline]
pub fn wrap_angle(theta: f64) -> f64 {
    theta.sin().atan2(theta.cos())
}

/// Fixed-step advancement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stepper {
    /// k Euler sub-steps of dt/k per external step; clamp after every
    /// sub-step, matching the turn-based kernels.
    SubSteppedEuler { substeps: usize },
    /// Classic RK4, one external step per call.
    Rk4,
}

impl Stepper {
    /// Advance `state` in place by one external step of size `dt`.
    ///
    /// The forcing value and `partner` snapshot are held fixed for
    /// the whole step; `t` is the step's start time.
    pub fn advance(
        &self,
        field: &dyn VectorField,
        t: f64,
        dt: f64,
        state: &mut [f64],
        forcing: f64,
        partner: Option<&[f64]>,
    ) -> KernelResult<()> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(KernelError::InvalidParameter(format!(
                "dt must be finite and > 0, got {dt}"
            )));
        }
        let dim = field.dim();
        if state.len() != dim {
            return Err(KernelError::Internal(format!(
                "state has {} components, field expects {dim}",
                state.len()
            )));
        }
        if field.clamp_bounds().len() != dim {
            return Err(KernelError::Internal(format!(
                "clamp table has {} entries, field expects {dim}",
                field.clamp_bounds().len()
            )));
        }

        match *self {
            Stepper::SubSteppedEuler { substeps } => {
                if substeps == 0 {
                    return Err(KernelError::InvalidParameter(
                        "substeps must be >= 1".to_string(),
                    ));
                }
                let h = dt / substeps as f64;
                let mut deriv = vec![0.0; dim];
                for _ in 0..substeps {
                    field.derivative(t, state, forcing, partner, &mut deriv);
                    for i in 0..dim {
                        let (lo, hi) = field.clamp_bounds()[i];
                        state[i] = (state[i] + h * deriv[i]).clamp(lo, hi);
                    }
                }
            }
            Stepper::Rk4 => {
                let mut k1 = vec![0.0; dim];
                let mut k2 = vec![0.0; dim];
                let mut k3 = vec![0.0; dim];
                let mut k4 = vec![0.0; dim];
                let mut stage = vec![0.0; dim];
                let half = 0.5 * dt;

                field.derivative(t, state, forcing, partner, &mut k1);
                for i in 0..dim {
                    stage[i] = state[i] + half * k1[i];
                }
                field.derivative(t + half, &stage, forcing, partner, &mut k2);
                for i in 0..dim {
                    stage[i] = state[i] + half * k2[i];
                }
                field.derivative(t + half, &stage, forcing, partner, &mut k3);
                for i in 0..dim {
                    stage[i] = state[i] + dt * k3[i];
                }
                field.derivative(t + dt, &stage, forcing, partner, &mut k4);

                for i in 0..dim {
                    let (lo, hi) = field.clamp_bounds()[i];
                    let next =
                        state[i] + (dt / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
                    state[i] = next.clamp(lo, hi);
                }
            }
        }

        for &i in field.wrapped() {
            state[i] = wrap_angle(state[i]);
        }

        if state.iter().any(|v| v.is_nan()) {
            return Err(KernelError::Numerical(
                "state contains NaN after step".to_string(),
            ));
        }
        Ok(())
    }
}
