// ─────────────────────────────────────────────────────────────────────
// Love-OS — Event/Threshold Detector
// Mirrors: minimal simulator.py (crossings) + loveos_dynamics.py (coherence)
// ─────────────────────────────────────────────────────────────────────
//! Post-hoc (or streaming) analysis of trajectories: first-crossing
//! times against fixed thresholds, normalized cross-correlation
//! between two series, the lock-onset scan, and the
//! superconductivity predicate.
//!
//! A crossing that never happens within the simulated horizon is a
//! `None`, not an error.

use loveos_types::{KernelError, KernelResult};

/// Direction of a threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    AtOrAbove,
    AtOrBelow,
}

/// Index of the first sample satisfying the comparison, if any.
pub fn first_crossing(values: &[f64], threshold: f64, dir: Crossing) -> Option<usize> {
    values.iter().position(|&v| match dir {
        Crossing::AtOrAbove => v >= threshold,
        Crossing::AtOrBelow => v <= threshold,
    })
}

/// Time of the first crossing against an explicit time axis.
pub fn first_crossing_time(
    times: &[f64],
    values: &[f64],
    threshold: f64,
    dir: Crossing,
) -> KernelResult<Option<f64>> {
    if times.len() != values.len() {
        return Err(KernelError::InvalidParameter(format!(
            "time axis has {} samples, series has {}",
            times.len(),
            values.len()
        )));
    }
    Ok(first_crossing(values, threshold, dir).map(|i| times[i]))
}

/// First index where the lock condition |ω| ≤ K holds.
pub fn lock_onset(omega: f64, k_series: &[f64]) -> Option<usize> {
    first_crossing(k_series, omega.abs(), Crossing::AtOrAbove)
}

/// Pearson-style phase coherence between two equal-length series,
/// in [-1, 1]; 1 means the action perfectly mirrors the impulse.
///
/// A small ε on each norm guards the zero-variance degenerate case,
/// which yields a defined value near 0 rather than an error. Empty
/// input is likewise degenerate and returns 0.
pub fn coherence(i: &[f64], a: &[f64]) -> KernelResult<f64> {
    if i.len() != a.len() {
        return Err(KernelError::InvalidParameter(format!(
            "series lengths differ: {} vs {}",
            i.len(),
            a.len()
        )));
    }
    let n = i.len();
    if n == 0 {
        return Ok(0.0);
    }

    let mean_i: f64 = i.iter().sum::<f64>() / n as f64;
    let mean_a: f64 = a.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den_i = 0.0;
    let mut den_a = 0.0;
    for (&x, &y) in i.iter().zip(a) {
        let dx = x - mean_i;
        let dy = y - mean_a;
        num += dx * dy;
        den_i += dx * dx;
        den_a += dy * dy;
    }

    const EPS: f64 = 1e-12;
    Ok(num / ((den_i.sqrt() + EPS) * (den_a.sqrt() + EPS)))
}

/// The degenerate zero-resistance regime: delay, damping, and
/// internal resistance all below `eps` simultaneously.
pub fn superconductive(tau: f64, alpha: f64, r_int: f64, eps: f64) -> bool {
    tau <= eps && alpha <= eps && r_int <= eps
}
