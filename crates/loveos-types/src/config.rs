// ─────────────────────────────────────────────────────────────────────
// Love-OS — Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Runtime configuration for a headless simulation run.
///
/// Only the parameters shared by every model variant live here;
/// model-specific coefficient tables are carried by the model
/// structs themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total simulated time.
    pub t_total: f64,

    /// Externally visible step size. Effect scheduling and trajectory
    /// recording happen once per step of this size.
    pub dt: f64,

    /// Internal Euler sub-steps per external step (sub-stepped Euler
    /// models only; RK4 models ignore this).
    pub substeps: usize,

    /// Seed for the noise generator. Two runs with identical config
    /// and seed produce bit-identical trajectories.
    pub seed: u64,

    /// Noise amplitude σ for the stochastic variants (Euler–Maruyama
    /// term σ·sqrt(dt) per step). Zero disables noise entirely.
    pub noise_sigma: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            t_total: 60.0,
            dt: 0.02,
            substeps: 1,
            seed: 42,
            noise_sigma: 0.0,
        }
    }
}

impl SimConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> KernelResult<()> {
        if self.t_total <= 0.0 || !self.t_total.is_finite() {
            return Err(KernelError::Config(format!(
                "t_total must be finite and > 0, got {}",
                self.t_total
            )));
        }
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(KernelError::Config(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if self.substeps < 1 {
            return Err(KernelError::Config(format!(
                "substeps must be >= 1, got {}",
                self.substeps
            )));
        }
        if self.noise_sigma < 0.0 || !self.noise_sigma.is_finite() {
            return Err(KernelError::Config(format!(
                "noise_sigma must be finite and >= 0, got {}",
                self.noise_sigma
            )));
        }
        Ok(())
    }

    /// Number of integration steps for this config.
    pub fn steps(&self) -> usize {
        (self.t_total / self.dt).round() as usize
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| KernelError::Config(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dt_rejected() {
        let cfg = SimConfig {
            dt: 0.0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_t_total_rejected() {
        let cfg = SimConfig {
            t_total: -1.0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_substeps_rejected() {
        let cfg = SimConfig {
            substeps: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_steps_count() {
        let cfg = SimConfig {
            t_total: 10.0,
            dt: 0.5,
            ..SimConfig::default()
        };
        assert_eq!(cfg.steps(), 20);
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = r#"{"t_total":6.0,"dt":0.001,"substeps":1,"seed":7,"noise_sigma":0.0}"#;
        let cfg = SimConfig::from_json(json).unwrap();
        assert!((cfg.t_total - 6.0).abs() < 1e-12);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn test_from_json_invalid_rejected() {
        let json = r#"{"t_total":6.0,"dt":-0.1,"substeps":1,"seed":7,"noise_sigma":0.0}"#;
        assert!(SimConfig::from_json(json).is_err());
    }
}
