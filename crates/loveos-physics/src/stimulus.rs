// ─────────────────────────────────────────────────────────────────────
// Love-OS — Stimulus Generators
// Mirrors: loveos_dynamics.py (pulse_train / sine_stim / impulse)
// ─────────────────────────────────────────────────────────────────────
//! External forcing signals F(t): pure, deterministic functions of
//! time producing the scalar drive Δ fed to the integrator.

use serde::{Deserialize, Serialize};

use loveos_types::{KernelError, KernelResult};

/// One stress window of a schedule-table stimulus. Windows are
/// half-open [t0, t1); overlapping windows add their amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressWindow {
    pub t0: f64,
    pub t1: f64,
    pub amp: f64,
}

/// Scalar forcing signal, evaluable at any real t.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stimulus {
    /// Square pulse train: `amp` while `t mod period < width`, else 0.
    PulseTrain { amp: f64, width: f64, period: f64 },

    /// `amp * sin(2π·freq·t)`.
    Sine { amp: f64, freq: f64 },

    /// Width-eps approximation of a Dirac impulse at `at`: `amp`
    /// while `|t - at| < eps`, else 0.
    ///
    /// Correctness hazard: fixed-increment sampling can skip the
    /// impulse entirely when `eps` is smaller than half the
    /// integration step — the window then falls between two sample
    /// points. Choose `eps` larger than the step (or at least dt/2)
    /// if the impulse must register.
    Impulse { at: f64, amp: f64, eps: f64 },

    /// Sum of all stress windows covering t.
    Schedule { windows: Vec<StressWindow> },

    /// Constant drive (turn-based callers).
    Constant { value: f64 },
}

impl Stimulus {
    /// Pulse train with the canonical defaults (amp 1.0, width 0.2,
    /// period 2.0).
    pub fn default_pulse_train() -> Self {
        Stimulus::PulseTrain {
            amp: 1.0,
            width: 0.2,
            period: 2.0,
        }
    }

    /// Impulse with the canonical default eps of 1e-3.
    pub fn impulse_at(at: f64, amp: f64) -> Self {
        Stimulus::Impulse { at, amp, eps: 1e-3 }
    }

    /// Validate generator parameters. Callers must validate before a
    /// run; `evaluate` itself stays total and branch-free.
    pub fn validate(&self) -> KernelResult<()> {
        match self {
            Stimulus::PulseTrain { width, period, .. } => {
                if *period <= 0.0 || !period.is_finite() {
                    return Err(KernelError::InvalidParameter(format!(
                        "pulse period must be > 0, got {period}"
                    )));
                }
                if *width < 0.0 {
                    return Err(KernelError::InvalidParameter(format!(
                        "pulse width must be >= 0, got {width}"
                    )));
                }
                Ok(())
            }
            Stimulus::Impulse { eps, .. } => {
                if *eps <= 0.0 {
                    return Err(KernelError::InvalidParameter(format!(
                        "impulse eps must be > 0, got {eps}"
                    )));
                }
                Ok(())
            }
            Stimulus::Schedule { windows } => {
                for w in windows {
                    if w.t1 < w.t0 {
                        return Err(KernelError::InvalidParameter(format!(
                            "stress window ends before it starts: [{}, {})",
                            w.t0, w.t1
                        )));
                    }
                }
                Ok(())
            }
            Stimulus::Sine { .. } | Stimulus::Constant { .. } => Ok(()),
        }
    }

    /// Evaluate the forcing at time t.
    pub fn evaluate(&self, t: f64) -> f64 {
        match self {
            Stimulus::PulseTrain { amp, width, period } => {
                if t.rem_euclid(*period) < *width {
                    *amp
                } else {
                    0.0
                }
            }
            Stimulus::Sine { amp, freq } => amp * (std::f64::consts::TAU * freq * t).sin(),
            Stimulus::Impulse { at, amp, eps } => {
                if (t - at).abs() < *eps {
                    *amp
                } else {
                    0.0
                }
            }
            Stimulus::Schedule { windows } => windows
                .iter()
                .filter(|w| w.t0 <= t && t < w.t1)
                .map(|w| w.amp)
                .sum(),
            Stimulus::Constant { value } => *value,
        }
    }
}
