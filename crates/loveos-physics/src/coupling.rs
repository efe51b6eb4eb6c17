// ─────────────────────────────────────────────────────────────────────
// Love-OS — Lock-Step Agent Coupling
// ─────────────────────────────────────────────────────────────────────
//! Symmetric advancement of two coupled integrator instances.
//!
//! Both agents move with the same dt in the same step call, and each
//! derivative reads the partner's state *as of the start of the
//! shared step*. Both snapshots are taken before either state
//! mutates, which makes the update order-independent: a partially
//! updated partner is never observable.

use loveos_types::KernelResult;

use crate::integrator::{Stepper, VectorField};

/// Advance two coupled states one shared step (two-phase update).
#[allow(clippy::too_many_arguments)]
pub fn step_pair(
    stepper: Stepper,
    field_a: &dyn VectorField,
    field_b: &dyn VectorField,
    t: f64,
    dt: f64,
    state_a: &mut [f64],
    state_b: &mut [f64],
    forcing_a: f64,
    forcing_b: f64,
) -> KernelResult<()> {
    let snap_a = state_a.to_vec();
    let snap_b = state_b.to_vec();
    stepper.advance(field_a, t, dt, state_a, forcing_a, Some(&snap_b))?;
    stepper.advance(field_b, t, dt, state_b, forcing_b, Some(&snap_a))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = k·(partner − x): pure diffusive pull.
    struct Diffusive {
        k: f64,
    }

    impl VectorField for Diffusive {
        fn dim(&self) -> usize {
            1
        }
        fn derivative(
            &self,
            _t: f64,
            state: &[f64],
            _forcing: f64,
            partner: Option<&[f64]>,
            out: &mut [f64],
        ) {
            let other = partner.map_or(state[0], |p| p[0]);
            out[0] = self.k * (other - state[0]);
        }
        fn clamp_bounds(&self) -> &[(f64, f64)] {
            &[(f64::NEG_INFINITY, f64::INFINITY)]
        }
    }

    #[test]
    fn test_symmetric_pull_is_order_independent() {
        let field = Diffusive { k: 0.5 };
        let stepper = Stepper::SubSteppedEuler { substeps: 1 };

        let (mut a1, mut b1) = ([1.0], [0.0]);
        let (mut a2, mut b2) = ([1.0], [0.0]);
        step_pair(stepper, &field, &field, 0.0, 0.1, &mut a1, &mut b1, 0.0, 0.0).unwrap();
        // Swap argument order for the second pair.
        step_pair(stepper, &field, &field, 0.0, 0.1, &mut b2, &mut a2, 0.0, 0.0).unwrap();

        assert_eq!(a1[0], a2[0]);
        assert_eq!(b1[0], b2[0]);
    }

    #[test]
    fn test_diffusion_is_conservative() {
        // Symmetric diffusive pull preserves the pair sum under Euler.
        let field = Diffusive { k: 0.5 };
        let stepper = Stepper::SubSteppedEuler { substeps: 1 };
        let (mut a, mut b) = ([1.0], [0.0]);
        for i in 0..100 {
            step_pair(
                stepper,
                &field,
                &field,
                i as f64 * 0.1,
                0.1,
                &mut a,
                &mut b,
                0.0,
                0.0,
            )
            .unwrap();
        }
        assert!((a[0] + b[0] - 1.0).abs() < 1e-12, "sum drifted: {}", a[0] + b[0]);
        // And the states converge toward each other.
        assert!((a[0] - b[0]).abs() < 1e-2);
    }

    #[test]
    fn test_rk4_pair_freezes_partner_for_all_stages() {
        // With a frozen partner the RK4 step of dx/dt = k(p − x) has
        // the closed form x + (p − x)·(1 − taylor4(e^{-k·dt})).
        let field = Diffusive { k: 1.0 };
        let dt = 0.2;
        let (mut a, mut b) = ([1.0], [0.0]);
        step_pair(Stepper::Rk4, &field, &field, 0.0, dt, &mut a, &mut b, 0.0, 0.0).unwrap();
        let decay = 1.0 - dt + dt * dt / 2.0 - dt.powi(3) / 6.0 + dt.powi(4) / 24.0;
        let expected_a = 0.0 + (1.0 - 0.0) * decay;
        assert!(
            (a[0] - expected_a).abs() < 1e-12,
            "a={} expected {expected_a}",
            a[0]
        );
    }
}
