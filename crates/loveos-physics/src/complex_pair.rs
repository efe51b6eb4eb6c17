// ─────────────────────────────────────────────────────────────────────
// Love-OS — Complex Amplitude Model (Stuart–Landau)
// Mirrors: loveos_complex_dashboard.py (ComplexAgent)
// ─────────────────────────────────────────────────────────────────────
//! Two coupled complex oscillators per agent:
//!
//!   ψ1 = (L − R) + iE   (integration vs. ego)
//!   ψ2 = C + iA         (control, arousal proxy)
//!
//!   dψ = (σ + iω)ψ − (κ + iη)|ψ|²ψ + Γ·Δ + U + K·(ψ_other − ψ)
//!
//! The second oscillator perceives the stimulus attenuated to 0.6·Δ
//! and couples at half gain. The diffusive K term is present only
//! when a partner state is supplied.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use loveos_types::{Affect, KernelResult};

use crate::effects::{CoeffSet, EffectScheduler, EffectSpec};
use crate::integrator::{Stepper, VectorField};

pub const PAIR_DIM: usize = 4;
pub const PAIR_COMPONENTS: [&str; PAIR_DIM] = ["psi1_re", "psi1_im", "psi2_re", "psi2_im"];

/// ψ2 sees the stimulus attenuated and couples at half gain.
const PSI2_DELTA_SCALE: f64 = 0.6;
const PSI2_COUPLING_SCALE: f64 = 0.5;

/// Base parameter table of the "self" agent.
pub fn base_coeffs() -> CoeffSet {
    CoeffSet::from_pairs(&[
        ("sigma1", 0.20),
        ("omega1", 2.0),
        ("kappa1", 0.30),
        ("eta1", 0.10),
        ("gamma1", 0.5),
        ("sigma2", 0.10),
        ("omega2", 1.2),
        ("kappa2", 0.20),
        ("eta2", 0.05),
        ("gamma2", 0.3),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StuartLandauParams {
    pub sigma1: f64,
    pub omega1: f64,
    pub kappa1: f64,
    pub eta1: f64,
    pub gamma1: f64,
    pub sigma2: f64,
    pub omega2: f64,
    pub kappa2: f64,
    pub eta2: f64,
    pub gamma2: f64,
    pub u1: f64,
    pub u2: f64,
    /// Diffusive coupling gain toward the partner (0 = uncoupled).
    pub coupling_k: f64,
}

impl StuartLandauParams {
    pub fn from_coeffs(c: &CoeffSet) -> Self {
        Self {
            sigma1: c.get("sigma1"),
            omega1: c.get("omega1"),
            kappa1: c.get("kappa1"),
            eta1: c.get("eta1"),
            gamma1: c.get("gamma1"),
            sigma2: c.get("sigma2"),
            omega2: c.get("omega2"),
            kappa2: c.get("kappa2"),
            eta2: c.get("eta2"),
            gamma2: c.get("gamma2"),
            u1: c.get("u1"),
            u2: c.get("u2"),
            coupling_k: 0.0,
        }
    }
}

/// Stuart–Landau vector field over [Re ψ1, Im ψ1, Re ψ2, Im ψ2].
#[derive(Debug, Clone)]
pub struct StuartLandauField {
    p: StuartLandauParams,
    bounds: [(f64, f64); PAIR_DIM],
}

const UNBOUNDED: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

impl StuartLandauField {
    pub fn new(coeffs: &CoeffSet) -> Self {
        Self {
            p: StuartLandauParams::from_coeffs(coeffs),
            bounds: [UNBOUNDED; PAIR_DIM],
        }
    }

    pub fn with_coupling(mut self, k: f64) -> Self {
        self.p.coupling_k = k;
        self
    }

    pub fn params(&self) -> &StuartLandauParams {
        &self.p
    }

    #[allow(clippy::too_many_arguments)]
    fn deriv_one(
        psi: Complex64,
        sigma: f64,
        omega: f64,
        kappa: f64,
        eta: f64,
        gamma: f64,
        delta: f64,
        u: f64,
        partner: Option<Complex64>,
        k: f64,
    ) -> Complex64 {
        let linear = Complex64::new(sigma, omega) * psi;
        let saturation = Complex64::new(kappa, eta) * psi.norm_sqr() * psi;
        let drive = Complex64::new(gamma * delta + u, 0.0);
        let coupling = match partner {
            Some(other) if k != 0.0 => k * (other - psi),
            _ => Complex64::new(0.0, 0.0),
        };
        linear - saturation + drive + coupling
    }
}

impl VectorField for StuartLandauField {
    fn dim(&self) -> usize {
        PAIR_DIM
    }

    fn derivative(
        &self,
        _t: f64,
        state: &[f64],
        forcing: f64,
        partner: Option<&[f64]>,
        out: &mut [f64],
    ) {
        let p = &self.p;
        let psi1 = Complex64::new(state[0], state[1]);
        let psi2 = Complex64::new(state[2], state[3]);
        let partner1 = partner.map(|s| Complex64::new(s[0], s[1]));
        let partner2 = partner.map(|s| Complex64::new(s[2], s[3]));

        let d1 = Self::deriv_one(
            psi1, p.sigma1, p.omega1, p.kappa1, p.eta1, p.gamma1, forcing, p.u1, partner1,
            p.coupling_k,
        );
        let d2 = Self::deriv_one(
            psi2,
            p.sigma2,
            p.omega2,
            p.kappa2,
            p.eta2,
            p.gamma2,
            PSI2_DELTA_SCALE * forcing,
            p.u2,
            partner2,
            PSI2_COUPLING_SCALE * p.coupling_k,
        );

        out[0] = d1.re;
        out[1] = d1.im;
        out[2] = d2.re;
        out[3] = d2.im;
    }

    fn clamp_bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }
}

/// One agent of the complex model: state, base parameters, and its
/// ritual scheduler.
#[derive(Debug, Clone)]
pub struct ComplexAgent {
    pub name: String,
    pub state: [f64; PAIR_DIM],
    base: CoeffSet,
    scheduler: EffectScheduler,
}

impl ComplexAgent {
    /// The "self" agent of the dashboard demo.
    pub fn new(name: &str) -> Self {
        Self::with_coeffs(name, base_coeffs(), Complex64::new(0.2, 0.1), Complex64::new(0.2, 0.0))
    }

    /// The "other" agent: slightly detuned frequencies, smaller
    /// initial amplitudes.
    pub fn partner(name: &str) -> Self {
        let mut coeffs = base_coeffs();
        coeffs.set("omega1", 1.8);
        coeffs.set("omega2", 1.1);
        Self::with_coeffs(name, coeffs, Complex64::new(0.15, 0.05), Complex64::new(0.15, 0.0))
    }

    pub fn with_coeffs(name: &str, base: CoeffSet, psi1: Complex64, psi2: Complex64) -> Self {
        Self {
            name: name.to_string(),
            state: [psi1.re, psi1.im, psi2.re, psi2.im],
            base,
            scheduler: EffectScheduler::new(),
        }
    }

    /// Register a bounded-duration parameter perturbation.
    pub fn schedule_effect(&mut self, t: f64, duration: f64, spec: EffectSpec) {
        self.scheduler.schedule(t, duration, spec);
    }

    /// Advance one step against an optional frozen partner snapshot.
    pub fn step(
        &mut self,
        t: f64,
        dt: f64,
        delta: f64,
        partner: Option<&[f64; PAIR_DIM]>,
        k: f64,
    ) -> KernelResult<()> {
        let (coeffs, scale) = self.scheduler.effective(t, &self.base);
        let field = StuartLandauField::new(&coeffs).with_coupling(k);
        Stepper::SubSteppedEuler { substeps: 1 }.advance(
            &field,
            t,
            dt,
            &mut self.state,
            delta * scale,
            partner.map(|s| &s[..]),
        )
    }

    pub fn psi1(&self) -> Complex64 {
        Complex64::new(self.state[0], self.state[1])
    }

    pub fn psi2(&self) -> Complex64 {
        Complex64::new(self.state[2], self.state[3])
    }

    /// V = tanh(Re ψ1 + 0.6·Re ψ2 − 0.8·Im ψ1); arousal |ψ2|.
    pub fn observe(&self) -> Affect {
        let valence =
            (self.state[0] + 0.6 * self.state[2] - 0.8 * self.state[1]).tanh();
        Affect::new(valence, self.psi2().norm())
    }
}

/// Advance a coupled dyad one lock-step: both derivatives read the
/// partner's start-of-step state, so the update order cannot matter.
/// The second agent perceives attenuated stress and coupling.
#[allow(clippy::too_many_arguments)]
pub fn step_dyad(
    me: &mut ComplexAgent,
    you: &mut ComplexAgent,
    t: f64,
    dt: f64,
    delta: f64,
    k: f64,
    other_delta_scale: f64,
    other_k_scale: f64,
) -> KernelResult<()> {
    let me_snap = me.state;
    let you_snap = you.state;
    me.step(t, dt, delta, Some(&you_snap), k)?;
    you.step(t, dt, delta * other_delta_scale, Some(&me_snap), k * other_k_scale)?;
    Ok(())
}

/// Two-agent Kuramoto order parameter over the ψ1 phases.
pub fn kuramoto_r(phase_a: f64, phase_b: f64) -> f64 {
    let z = Complex64::from_polar(1.0, phase_a) + Complex64::from_polar(1.0, phase_b);
    (z / 2.0).norm()
}
