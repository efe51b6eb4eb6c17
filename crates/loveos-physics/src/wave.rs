// ─────────────────────────────────────────────────────────────────────
// Love-OS — Emotional Wave Readout
// Mirrors: Emotional Wave.py
// ─────────────────────────────────────────────────────────────────────
//! Closed-form diagnostic wave z(t) = (E/R)·e^{i(ωt+φ)}.
//!
//! Real axis: logic/ego; imaginary axis: emotion (+i love, −i fear).
//! Amplitude is the flow E/R — dropping resistance raises the wave.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use loveos_types::{KernelError, KernelResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalWave {
    /// Input energy (life force).
    pub energy: f64,
    /// Resistance; must be positive.
    pub resistance: f64,
    /// Angular frequency (individual "vibe").
    pub omega: f64,
}

impl EmotionalWave {
    pub fn new(energy: f64, resistance: f64, omega: f64) -> KernelResult<Self> {
        if resistance <= 0.0 || !resistance.is_finite() {
            return Err(KernelError::InvalidParameter(format!(
                "resistance must be finite and > 0, got {resistance}"
            )));
        }
        Ok(Self {
            energy,
            resistance,
            omega,
        })
    }

    /// Wave amplitude E/R.
    pub fn amplitude(&self) -> f64 {
        self.energy / self.resistance
    }

    /// z(t) at phase offset φ (−π/2 fear, 0 ego, +π/2 love).
    pub fn sample(&self, t: f64, phi: f64) -> Complex64 {
        Complex64::from_polar(self.amplitude(), self.omega * t + phi)
    }
}
