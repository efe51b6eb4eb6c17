// ─────────────────────────────────────────────────────────────────────
// Love-OS — Affective Physics Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! The Love-OS physics kernel: stimulus generators, the transient
//! effect scheduler, the state-vector ODE integrator core, the four
//! reference dynamical models, two-agent diffusive coupling, and the
//! event/threshold detector.
//!
//! One generic integrator replaces the family of near-duplicate
//! kernels of the research prototypes; the per-variant coefficient
//! tables are configuration, not code.

pub mod affect_field;
pub mod complex_pair;
pub mod coupling;
pub mod detector;
pub mod effects;
pub mod hopf;
pub mod hysteresis;
pub mod integrator;
pub mod rng;
pub mod stimulus;
pub mod thermo;
pub mod wave;

pub use affect_field::{AffectField, AffectParams};
pub use complex_pair::{kuramoto_r, step_dyad, ComplexAgent, StuartLandauField, StuartLandauParams};
pub use coupling::step_pair;
pub use detector::{
    coherence, first_crossing, first_crossing_time, lock_onset, superconductive, Crossing,
};
pub use effects::{CoeffSet, EffectScheduler, EffectSpec};
pub use hopf::{HopfField, HopfParams, HopfRun};
pub use hysteresis::{DelayLine, ShameModel, ShameRun};
pub use integrator::{wrap_angle, Stepper, VectorField};
pub use rng::SimpleRng;
pub use stimulus::{Stimulus, StressWindow};
pub use thermo::{ThermoModel, ThermoRun};
pub use wave::EmotionalWave;
