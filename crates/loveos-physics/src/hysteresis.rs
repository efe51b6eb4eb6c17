// ─────────────────────────────────────────────────────────────────────
// Love-OS — Impulse/Action Hysteresis Model
// Mirrors: loveos_dynamics.py (ShameModel)
// ─────────────────────────────────────────────────────────────────────
//! Core physics: S = ∫ |I − A| dt.
//!
//! I(t): impulse (internal signal)
//! A(t): action (external output), tracking a delayed copy of I
//! S:    accumulated hysteresis loss
//!
//!   dI = F(t) − α·I − r·sign(I−A)·|I−A|
//!   dA = (I(t−τ) − A)/τ           (delayed mode)
//!   dA = (I − A)/max(τ, dt)       (zero-latency mode, τ ≤ 0)
//!
//! The delay is realized by a fixed-size circular line of length
//! round(τ/dt), minimum 1: the value read at step n is exactly the
//! I stored at step n−k.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use loveos_types::{KernelError, KernelResult, Trajectory};

use crate::stimulus::Stimulus;

/// Fixed-length delay line. Reads return the value pushed `len`
/// steps ago; the line starts filled with zeros.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buf: VecDeque<f64>,
}

impl DelayLine {
    pub fn new(len: usize) -> Self {
        let len = len.max(1);
        Self {
            buf: VecDeque::from(vec![0.0; len]),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        false // fixed length ≥ 1
    }

    /// Oldest stored value — the sample from `len` pushes ago.
    pub fn read(&self) -> f64 {
        self.buf.front().copied().unwrap_or(0.0)
    }

    /// Rotate: drop the oldest value, store the newest.
    pub fn push(&mut self, value: f64) {
        self.buf.pop_front();
        self.buf.push_back(value);
    }
}

/// The hysteresis model parameters.
///
/// τ: latency/lag (censorship time), α: damping (impulse
/// suppression), r: internal resistance (self-conflict).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShameModel {
    pub tau: f64,
    pub alpha: f64,
    pub r_int: f64,
    /// Threshold under which τ, α and r count as zero for the
    /// superconductivity check.
    pub sc_eps: f64,
}

impl Default for ShameModel {
    fn default() -> Self {
        Self {
            tau: 0.3,
            alpha: 0.2,
            r_int: 0.05,
            sc_eps: 1e-3,
        }
    }
}

/// Output of one hysteresis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShameRun {
    /// Columns: I, A, s (instantaneous |I−A|).
    pub trajectory: Trajectory,
    /// Accumulated loss S = ∫ |I − A| dt.
    pub total_shame: f64,
}

impl ShameModel {
    pub fn new(tau: f64, alpha: f64, r_int: f64) -> Self {
        Self {
            tau,
            alpha,
            r_int,
            sc_eps: 1e-3,
        }
    }

    /// All of {delay, damping, internal resistance} below sc_eps
    /// simultaneously: the zero-loss regime.
    pub fn is_superconductive(&self) -> bool {
        crate::detector::superconductive(self.tau, self.alpha, self.r_int, self.sc_eps)
    }

    /// Integrate over [0, t_total] with step dt (n+1 records,
    /// initial state included). `use_delay = false` forces the
    /// zero-latency tracking mode regardless of τ.
    pub fn simulate(
        &self,
        t_total: f64,
        dt: f64,
        stimulus: &Stimulus,
        use_delay: bool,
    ) -> KernelResult<ShameRun> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(KernelError::InvalidParameter(format!(
                "dt must be finite and > 0, got {dt}"
            )));
        }
        if t_total <= 0.0 {
            return Err(KernelError::InvalidParameter(format!(
                "t_total must be > 0, got {t_total}"
            )));
        }
        if self.tau < 0.0 {
            return Err(KernelError::InvalidParameter(format!(
                "tau must be >= 0, got {}",
                self.tau
            )));
        }
        stimulus.validate()?;

        let n = (t_total / dt).round() as usize;
        let delayed_mode = use_delay && self.tau > 0.0;
        let mut line = DelayLine::new((self.tau / dt).round() as usize);

        let mut trajectory = Trajectory::with_capacity(&["I", "A", "s"], n + 1);
        let (mut i, mut a) = (0.0f64, 0.0f64);
        let mut total = 0.0;
        let mut t = 0.0;

        for _ in 0..=n {
            let s = (i - a).abs();
            trajectory.push(t, &[i, a, s])?;
            total += s * dt;

            let f = stimulus.evaluate(t);

            // Impulse: input minus damping minus internal conflict.
            let sign = if s < 1e-12 { 0.0 } else { (i - a) / s };
            let di = f - self.alpha * i - self.r_int * sign * s;

            // Action tracks I, delayed or immediately.
            let da = if delayed_mode {
                let i_delayed = line.read();
                line.push(i);
                (i_delayed - a) / self.tau
            } else {
                (i - a) / self.tau.max(dt)
            };

            i += dt * di;
            a += dt * da;
            t += dt;
        }

        Ok(ShameRun {
            trajectory,
            total_shame: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::coherence;

    #[test]
    fn test_delay_line_exact_k_step_read() {
        // With length k, the read at push n returns the value from
        // push n−k, exactly.
        let k = 3;
        let mut line = DelayLine::new(k);
        let mut pushed = Vec::new();
        for n in 0..20 {
            let v = (n as f64) * 1.5 + 0.25;
            let read = line.read();
            if n >= k {
                assert_eq!(read, pushed[n - k], "wrong sample at push {n}");
            } else {
                assert_eq!(read, 0.0, "line must start zero-filled");
            }
            line.push(v);
            pushed.push(v);
        }
    }

    #[test]
    fn test_delay_line_min_length_one() {
        let line = DelayLine::new(0);
        assert_eq!(line.len(), 1);
    }

    #[test]
    fn test_negative_tau_rejected() {
        let model = ShameModel::new(-0.1, 0.2, 0.05);
        let err = model.simulate(1.0, 0.01, &Stimulus::default_pulse_train(), true);
        assert!(matches!(err, Err(KernelError::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_dt_rejected() {
        let model = ShameModel::default();
        let err = model.simulate(1.0, 0.0, &Stimulus::default_pulse_train(), true);
        assert!(matches!(err, Err(KernelError::InvalidParameter(_))));
    }

    #[test]
    fn test_shame_accumulates_under_delay() {
        let model = ShameModel::new(0.4, 0.25, 0.05);
        let run = model
            .simulate(6.0, 0.001, &Stimulus::default_pulse_train(), true)
            .unwrap();
        assert!(run.total_shame > 0.0);
        assert_eq!(run.trajectory.len(), 6001);
    }

    #[test]
    fn test_superconductive_regime_minimizes_loss() {
        // τ, α, r all ≈ 0: A mirrors I almost perfectly, so both the
        // accumulated loss and the decoherence stay small.
        let normal = ShameModel::default();
        let sc = ShameModel::new(0.0, 1e-6, 1e-6);
        assert!(!normal.is_superconductive());
        assert!(sc.is_superconductive());

        let stim = Stimulus::default_pulse_train();
        let run_n = normal.simulate(6.0, 0.001, &stim, true).unwrap();
        let run_sc = sc.simulate(6.0, 0.001, &stim, false).unwrap();
        assert!(
            run_sc.total_shame < run_n.total_shame,
            "superconductive loss {} should undercut {}",
            run_sc.total_shame,
            run_n.total_shame
        );

        let c = coherence(
            run_sc.trajectory.column("I").unwrap(),
            run_sc.trajectory.column("A").unwrap(),
        )
        .unwrap();
        assert!(c > 0.95, "superconductive coherence {c} should be near 1");
    }

    #[test]
    fn test_zero_latency_mode_via_flag() {
        // use_delay=false must behave identically to τ=0 tracking.
        let model = ShameModel::new(0.4, 0.2, 0.05);
        let run_flag = model
            .simulate(2.0, 0.01, &Stimulus::Constant { value: 1.0 }, false)
            .unwrap();
        // With a 0.4s lag A trails I; without it A hugs I.
        let run_delay = model
            .simulate(2.0, 0.01, &Stimulus::Constant { value: 1.0 }, true)
            .unwrap();
        assert!(run_flag.total_shame < run_delay.total_shame);
    }

    #[test]
    fn test_deterministic_replay() {
        let model = ShameModel::default();
        let stim = Stimulus::default_pulse_train();
        let a = model.simulate(3.0, 0.001, &stim, true).unwrap();
        let b = model.simulate(3.0, 0.001, &stim, true).unwrap();
        assert_eq!(a, b);
    }
}
