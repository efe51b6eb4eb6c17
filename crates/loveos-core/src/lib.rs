// ─────────────────────────────────────────────────────────────────────
// Love-OS — Core Agent Layer
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! The agent layer on top of the physics kernel: the unified ritual
//! tables, the perception seam, threshold-guarded policy tables, the
//! eight school presets, digital twins, the conversational agent,
//! and the headless batch sessions.

pub mod agent;
pub mod perception;
pub mod policy;
pub mod rituals;
pub mod schools;
pub mod session;
pub mod twin;

pub use agent::Agent;
pub use perception::{ExternalPerception, LexiconPerception, Perception};
pub use policy::{Cmp, Condition, PolicyRule, PolicyTable, Quantity};
pub use rituals::{complex_ritual, intervention, Intervention, DEFAULT_RITUAL_DURATION, RITUAL_NONE};
pub use schools::{all_schools, school, DeltaMap, School};
pub use session::{AgentRole, DyadRun, DyadSession, RitualWindow, SoloSession};
pub use twin::{DigitalTwin, TurnLog, CANONICAL_SCENARIO};
