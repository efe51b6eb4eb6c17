// ─────────────────────────────────────────────────────────────────────
// Love-OS — Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Love-OS kernel — the affective-physics simulation core.

pub mod affect;
pub mod config;
pub mod error;
pub mod trajectory;

pub use affect::{clamp_component, Affect};
pub use config::SimConfig;
pub use error::{KernelError, KernelResult};
pub use trajectory::Trajectory;
