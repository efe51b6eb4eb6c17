// ─────────────────────────────────────────────────────────────────────
// Love-OS — Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Love-OS kernel failures.
///
/// Simulation runs are pure batch computations: failures are
/// structural (bad configuration) and surface immediately — nothing
/// is retried and nothing degrades silently. Saturation clamps of
/// state components are deliberate and are NOT errors.
#[derive(Error, Debug)]
pub enum KernelError {
    /// Invalid caller-supplied parameter (non-positive dt, negative
    /// delay, non-positive pulse period, mismatched series lengths).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error (bad JSON, out-of-range config field).
    #[error("config error: {0}")]
    Config(String),

    /// Numerical error (NaN/Inf escaped a computation).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Dimensionality mismatch between state and derivative output.
    /// Indicates a configuration bug; always fatal.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type KernelResult<T> = Result<T, KernelError>;
