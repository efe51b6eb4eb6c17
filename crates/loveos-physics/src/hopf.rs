// ─────────────────────────────────────────────────────────────────────
// Love-OS — Polar Hopf Oscillator with Landau Order Parameter
// Mirrors: minimal simulator.py + Complete Interactive System.py
// ─────────────────────────────────────────────────────────────────────
//! Three-scalar model of the virtual→real transition:
//!
//!   dR = μ(t)·R − β·R³              μ(t) = μ0 + ramp·t
//!   dθ = ω − γ·R² − K(R)·sin(θ−θ0)  K(R) = K0·R
//!   dX = −(α·(Rc−R)·X + b·X³) − c·sin(θ−θ0)
//!
//! R: virtual amplitude, θ: phase relative to the θ0 anchor,
//! X: Landau order parameter of the real side. Setting c = 0
//! disconnects the phase pull on X.
//!
//! The deterministic run integrates with RK4 and wraps θ to (-π, π]
//! every step. The pulsed run is the stochastic Euler–Maruyama
//! variant: Gaussian phase noise σ·sqrt(dt), scheduled phase kicks,
//! and an amplitude floor of 0.01.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use loveos_types::{KernelResult, SimConfig, Trajectory};

use crate::detector::{first_crossing, lock_onset, Crossing};
use crate::effects::CoeffSet;
use crate::integrator::{Stepper, VectorField};
use crate::rng::SimpleRng;

pub const HOPF_DIM: usize = 3;
pub const HOPF_COMPONENTS: [&str; HOPF_DIM] = ["R", "theta", "X"];

/// Default initial state (small amplitude, phase at the ego axis).
pub const HOPF_DEFAULT_STATE: [f64; HOPF_DIM] = [0.05, 0.0, 0.0];

/// Canonical coefficient table of the minimal simulation.
pub fn base_coeffs() -> CoeffSet {
    CoeffSet::from_pairs(&[
        ("omega", 0.6),
        ("mu0", -0.2),
        ("ramp", 0.004),
        ("beta", 0.6),
        ("gamma", 0.3),
        ("theta0", std::f64::consts::PI),
        ("K0", 0.5),
        ("alpha", 1.0),
        ("Rc", 0.9),
        ("b", 1.0),
        ("c", 0.8),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HopfParams {
    pub omega: f64,
    pub mu0: f64,
    pub ramp: f64,
    pub beta: f64,
    pub gamma: f64,
    pub theta0: f64,
    pub k0: f64,
    pub alpha: f64,
    pub r_c: f64,
    pub b: f64,
    pub c: f64,
}

impl HopfParams {
    pub fn from_coeffs(c: &CoeffSet) -> Self {
        Self {
            omega: c.get("omega"),
            mu0: c.get("mu0"),
            ramp: c.get("ramp"),
            beta: c.get("beta"),
            gamma: c.get("gamma"),
            theta0: c.get("theta0"),
            k0: c.get("K0"),
            alpha: c.get("alpha"),
            r_c: c.get("Rc"),
            b: c.get("b"),
            c: c.get("c"),
        }
    }

    /// Slowly ramping control parameter.
    pub fn mu(&self, t: f64) -> f64 {
        self.mu0 + self.ramp * t
    }

    /// Amplitude-dependent locking gain K(R).
    pub fn lock_gain(&self, r: f64) -> f64 {
        self.k0 * r
    }
}

/// Polar Hopf vector field. Unbounded components; θ wrapped.
#[derive(Debug, Clone)]
pub struct HopfField {
    p: HopfParams,
    bounds: [(f64, f64); HOPF_DIM],
}

const UNBOUNDED: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

impl HopfField {
    pub fn new(coeffs: &CoeffSet) -> Self {
        Self {
            p: HopfParams::from_coeffs(coeffs),
            bounds: [UNBOUNDED; HOPF_DIM],
        }
    }

    pub fn default_params() -> Self {
        Self::new(&base_coeffs())
    }

    pub fn params(&self) -> &HopfParams {
        &self.p
    }

    /// Dissonance readout Z = |e^{iθ} + 1| ∈ [0, 2]; 0 at θ = π
    /// (anchor alignment), 2 at θ = 0.
    pub fn dissonance(theta: f64) -> f64 {
        (Complex64::from_polar(1.0, theta) + Complex64::new(1.0, 0.0)).norm()
    }

    /// Deterministic RK4 run over `cfg.t_total`, recording R, θ, X,
    /// μ(t), K(R), Z, and the lock flag at every step, plus the three
    /// first-crossing events.
    pub fn run(&self, cfg: &SimConfig) -> KernelResult<HopfRun> {
        cfg.validate()?;
        log::debug!("hopf run: T={} dt={}", cfg.t_total, cfg.dt);
        let steps = cfg.steps();
        let mut trajectory = Trajectory::with_capacity(
            &["R", "theta", "X", "mu", "K", "Z", "lock"],
            steps + 1,
        );

        let mut state = HOPF_DEFAULT_STATE;
        self.record(&mut trajectory, 0.0, &state)?;

        for i in 1..=steps {
            let t = (i - 1) as f64 * cfg.dt;
            Stepper::Rk4.advance(self, t, cfg.dt, &mut state, 0.0, None)?;
            self.record(&mut trajectory, i as f64 * cfg.dt, &state)?;
        }

        let times = trajectory.times();
        let mu_cross = first_crossing(trajectory.column("mu").unwrap_or(&[]), 0.0, Crossing::AtOrAbove)
            .map(|i| times[i]);
        let rc_cross = first_crossing(
            trajectory.column("R").unwrap_or(&[]),
            self.p.r_c,
            Crossing::AtOrAbove,
        )
        .map(|i| times[i]);
        let lock = lock_onset(self.p.omega, trajectory.column("K").unwrap_or(&[])).map(|i| times[i]);

        Ok(HopfRun {
            trajectory,
            mu_cross_time: mu_cross,
            rc_cross_time: rc_cross,
            lock_time: lock,
        })
    }

    fn record(&self, trajectory: &mut Trajectory, t: f64, state: &[f64]) -> KernelResult<()> {
        let (r, theta, x) = (state[0], state[1], state[2]);
        let k = self.p.lock_gain(r);
        let locked = if self.p.omega.abs() <= k { 1.0 } else { 0.0 };
        trajectory.push(
            t,
            &[r, theta, x, self.p.mu(t), k, Self::dissonance(theta), locked],
        )
    }

    /// Stochastic Euler–Maruyama variant with scheduled phase kicks.
    ///
    /// `pulses` is a list of (time, phase-shift) pairs; a kick lands
    /// on the step whose start time is within dt/2 of the pulse time.
    /// The phase receives σ·sqrt(dt) Gaussian noise per step and the
    /// amplitude is floored at 0.01. θ is recorded unwrapped here —
    /// the readouts only consume it through sin/cos.
    pub fn run_pulsed(
        &self,
        cfg: &SimConfig,
        initial: [f64; HOPF_DIM],
        pulses: &[(f64, f64)],
    ) -> KernelResult<Trajectory> {
        cfg.validate()?;
        let steps = cfg.steps();
        let mut rng = SimpleRng::new(cfg.seed);
        let p = &self.p;
        let sqrt_dt = cfg.dt.sqrt();

        let (mut r, mut theta, mut x) = (initial[0], initial[1], initial[2]);
        let mut trajectory =
            Trajectory::with_capacity(&["R", "theta", "X", "Z"], steps + 1);
        trajectory.push(0.0, &[r, theta, x, Self::dissonance(theta)])?;

        for i in 1..=steps {
            let t = i as f64 * cfg.dt;
            for &(p_t, p_phi) in pulses {
                if (t - p_t).abs() < cfg.dt / 2.0 {
                    theta += p_phi;
                }
            }

            let mu = p.mu(t);
            let z = Self::dissonance(theta);

            let dth = (p.omega - p.gamma * r * r - p.k0 * r * (theta - p.theta0).sin()) * cfg.dt;
            let noise = cfg.noise_sigma * sqrt_dt * rng.next_normal();
            theta += dth + noise;

            let dr = (mu * r - p.beta * r.powi(3) - 0.2 * z * z) * cfg.dt;
            r = (r + dr).max(0.01);

            let a_r = p.alpha * (p.r_c - r);
            x += -(a_r * x + p.b * x.powi(3)) * cfg.dt;

            trajectory.push(t, &[r, theta, x, Self::dissonance(theta)])?;
        }
        Ok(trajectory)
    }
}

impl VectorField for HopfField {
    fn dim(&self) -> usize {
        HOPF_DIM
    }

    fn derivative(
        &self,
        t: f64,
        state: &[f64],
        _forcing: f64,
        _partner: Option<&[f64]>,
        out: &mut [f64],
    ) {
        let p = &self.p;
        let (r, theta, x) = (state[0], state[1], state[2]);
        let phase_err = (theta - p.theta0).sin();
        out[0] = p.mu(t) * r - p.beta * r.powi(3);
        out[1] = p.omega - p.gamma * r * r - p.lock_gain(r) * phase_err;
        let a_r = p.alpha * (p.r_c - r);
        out[2] = -(a_r * x + p.b * x.powi(3)) - p.c * phase_err;
    }

    fn clamp_bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    fn wrapped(&self) -> &[usize] {
        &[1]
    }
}

/// Output of a deterministic Hopf run: the trajectory plus the three
/// threshold events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopfRun {
    pub trajectory: Trajectory,
    /// First time μ(t) ≥ 0 (Hopf threshold).
    pub mu_cross_time: Option<f64>,
    /// First time R ≥ Rc (Landau threshold).
    pub rc_cross_time: Option<f64>,
    /// First time |ω| ≤ K(R) (phase lock).
    pub lock_time: Option<f64>,
}
