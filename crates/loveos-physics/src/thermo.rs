// ─────────────────────────────────────────────────────────────────────
// Love-OS — Consciousness Thermodynamics
// Mirrors: src/simulation/consciousness_thermodynamics.py
// ─────────────────────────────────────────────────────────────────────
//! Day-cycle model of ego-resistance R and life-flow I = V/R.
//!
//!   dR/dt = λ (entropy/stress) − η·R (sleep or play cooling)
//!   Loss  = I²·R_eff (dissipation, accumulated over the run)
//!
//! The circadian schedule is a windowed step function: 23:00–06:00
//! is the sleep window (high source voltage, R_eff collapsed to
//! 0.1·R); waking hours run at V_day. When the play system is
//! enabled, dissipation above the threshold trips the active
//! cooling — a threshold-triggered mode switch, not an error.

use serde::{Deserialize, Serialize};

use loveos_types::{KernelError, KernelResult, Trajectory};

/// Biological state from the circadian schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Awake,
    Sleep,
}

/// Model constants; defaults from the v1.0 simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoModel {
    /// Waking input voltage.
    pub v_day: f64,
    /// Sleeping (source) voltage.
    pub v_night: f64,
    /// Initial ego resistance.
    pub r_init: f64,
    /// Entropy growth per hour (stress/aging).
    pub lambda_entropy: f64,
    /// Cooling power of sleep.
    pub eta_sleep: f64,
    /// Cooling power of play.
    pub eta_play: f64,
    /// Loss level that trips the play system.
    pub dissipation_threshold: f64,
}

impl Default for ThermoModel {
    fn default() -> Self {
        Self {
            v_day: 1.0,
            v_night: 5.0,
            r_init: 0.8,
            lambda_entropy: 0.008,
            eta_sleep: 0.09,
            eta_play: 0.15,
            dissipation_threshold: 0.12,
        }
    }
}

/// Output of a day-cycle run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoRun {
    /// Columns: R, I, loss.
    pub trajectory: Trajectory,
    pub total_loss: f64,
}

impl ThermoModel {
    /// Circadian schedule: 23:00–06:00 sleeps, the rest wakes.
    pub fn schedule(&self, hour: f64) -> (Phase, f64) {
        let h = hour.rem_euclid(24.0);
        if !(6.0..23.0).contains(&h) {
            (Phase::Sleep, self.v_night)
        } else {
            (Phase::Awake, self.v_day)
        }
    }

    /// Hour-step Euler run over `days` days.
    ///
    /// `play_enabled` turns the active cooling on: during waking
    /// hours, loss above the threshold triggers the play mode for
    /// that step.
    pub fn simulate(&self, days: usize, dt_hours: f64, play_enabled: bool) -> KernelResult<ThermoRun> {
        if dt_hours <= 0.0 || !dt_hours.is_finite() {
            return Err(KernelError::InvalidParameter(format!(
                "dt_hours must be finite and > 0, got {dt_hours}"
            )));
        }
        if days == 0 {
            return Err(KernelError::InvalidParameter(
                "days must be >= 1".to_string(),
            ));
        }

        let steps = (days as f64 * 24.0 / dt_hours) as usize;
        let mut trajectory = Trajectory::with_capacity(&["R", "I", "loss"], steps);
        let mut r = self.r_init;
        let mut total_loss = 0.0;

        for k in 0..steps {
            let hour = k as f64 * dt_hours;
            let (phase, v) = self.schedule(hour);

            // Sleep collapses the effective resistance.
            let r_eff = match phase {
                Phase::Sleep => r * 0.1,
                Phase::Awake => r,
            };
            let flow = v / (r_eff + 0.01);
            let loss = flow * flow * r_eff;
            total_loss += loss;
            trajectory.push(hour, &[r, flow, loss])?;

            let mut dr = self.lambda_entropy;
            if phase == Phase::Sleep {
                dr -= self.eta_sleep * r;
            }
            if play_enabled && phase == Phase::Awake && loss > self.dissipation_threshold {
                dr -= self.eta_play * r;
            }
            r = (r + dr * dt_hours).max(0.1);
        }

        Ok(ThermoRun {
            trajectory,
            total_loss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_windows() {
        let m = ThermoModel::default();
        assert_eq!(m.schedule(0.0).0, Phase::Sleep);
        assert_eq!(m.schedule(5.9).0, Phase::Sleep);
        assert_eq!(m.schedule(6.0).0, Phase::Awake);
        assert_eq!(m.schedule(12.0).0, Phase::Awake);
        assert_eq!(m.schedule(23.0).0, Phase::Sleep);
        // Wraps over day boundaries.
        assert_eq!(m.schedule(24.0 + 3.0).0, Phase::Sleep);
        assert_eq!(m.schedule(48.0 + 12.0).0, Phase::Awake);
    }

    #[test]
    fn test_play_system_keeps_resistance_down() {
        // Active cooling pins R near the floor; without it the
        // waking entropy term keeps R elevated.
        let m = ThermoModel::default();
        let without = m.simulate(30, 1.0, false).unwrap();
        let with = m.simulate(30, 1.0, true).unwrap();
        let r_without = without.trajectory.last("R").unwrap();
        let r_with = with.trajectory.last("R").unwrap();
        assert!(
            r_with < r_without,
            "play should end with lower R: {r_with} vs {r_without}"
        );
    }

    #[test]
    fn test_waking_entropy_raises_resistance() {
        // With no cooling at all (sleep disabled by zero eta), R
        // climbs monotonically.
        let m = ThermoModel {
            eta_sleep: 0.0,
            ..ThermoModel::default()
        };
        let run = m.simulate(5, 1.0, false).unwrap();
        let r = run.trajectory.column("R").unwrap();
        assert!(r.windows(2).all(|w| w[1] >= w[0]));
        assert!(run.trajectory.last("R").unwrap() > m.r_init);
    }

    #[test]
    fn test_resistance_floor() {
        let m = ThermoModel {
            eta_sleep: 5.0, // absurd cooling to slam into the floor
            ..ThermoModel::default()
        };
        let run = m.simulate(5, 1.0, true).unwrap();
        for &r in run.trajectory.column("R").unwrap() {
            assert!(r >= 0.1, "R={r} under the floor");
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let m = ThermoModel::default();
        assert!(m.simulate(0, 1.0, true).is_err());
        assert!(m.simulate(10, 0.0, true).is_err());
    }

    #[test]
    fn test_step_count() {
        let m = ThermoModel::default();
        let run = m.simulate(2, 1.0, true).unwrap();
        assert_eq!(run.trajectory.len(), 48);
    }
}
