// ─────────────────────────────────────────────────────────────────────
// Love-OS — School Presets (The Unified Ontology)
// Mirrors: loveos_schools.py (SchoolSpec + the 8 school tables)
// ─────────────────────────────────────────────────────────────────────
//! Eight schools of psychotherapy expressed as configuration on one
//! shared kernel: a coefficient shift on the base table, a
//! school-specific mapping from observed (V, A) to the prediction
//! error Δ, and a policy table for ritual selection.

use serde::{Deserialize, Serialize};

use loveos_physics::affect_field;
use loveos_physics::CoeffSet;
use loveos_types::Affect;

use crate::policy::{Condition, PolicyRule, PolicyTable, Quantity};

/// Mapping from observed affect to the prediction error Δ:
/// Δ = gain · clamp(w_arousal·A − w_valence·V).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaMap {
    pub w_arousal: f64,
    pub w_valence: f64,
    pub gain: f64,
    pub clamp: Option<(f64, f64)>,
}

impl DeltaMap {
    /// The basic mapping: Δ = clamp(0.8·A − 0.6·V, ±1.5).
    pub fn basic() -> Self {
        Self {
            w_arousal: 0.8,
            w_valence: 0.6,
            gain: 1.0,
            clamp: Some((-1.5, 1.5)),
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn delta(&self, affect: &Affect) -> f64 {
        let mut d = self.w_arousal * affect.arousal - self.w_valence * affect.valence;
        if let Some((lo, hi)) = self.clamp {
            d = d.clamp(lo, hi);
        }
        self.gain * d
    }
}

/// A school: kernel coefficients, perception weighting, policy.
#[derive(Debug, Clone)]
pub struct School {
    pub name: &'static str,
    pub coeffs: CoeffSet,
    pub delta_map: DeltaMap,
    pub policy: PolicyTable,
}

fn shifted(shifts: &[(&str, f64)]) -> CoeffSet {
    let mut coeffs = affect_field::base_coeffs();
    for (name, delta) in shifts {
        coeffs.add(name, *delta);
    }
    coeffs
}

// State component indices of the R/L/E/C vector.
const R: Quantity = Quantity::Component(0);
const E: Quantity = Quantity::Component(2);
const C: Quantity = Quantity::Component(3);

fn rule1(q: Quantity, threshold: f64, ritual: &str) -> PolicyTable {
    PolicyTable::new(vec![PolicyRule::new(
        &[Condition::above(q, threshold)],
        ritual,
    )])
}

/// Look up a school preset by name.
pub fn school(name: &str) -> Option<School> {
    let s = match name {
        // Reappraisal under high cognitive control.
        "CBT" => School {
            name: "CBT",
            coeffs: shifted(&[
                ("bR", 0.1),
                ("aL", 0.1),
                ("bC", 0.1),
                ("dE", 0.05),
                ("aE", -0.1),
            ]),
            delta_map: DeltaMap::basic().with_gain(0.95),
            policy: rule1(R, 0.7, "REAPPRAISE"),
        },
        // Psychological flexibility: accept, move with values.
        "ACT" => School {
            name: "ACT",
            coeffs: shifted(&[("aL", 0.1), ("aC", 0.1), ("aE", -0.1)]),
            delta_map: DeltaMap::basic().with_gain(0.90),
            policy: rule1(E, 0.8, "ACT"),
        },
        // Insight; slow decay, deep resolution of R and E.
        "Psychodynamic" => School {
            name: "Psychodynamic",
            coeffs: shifted(&[("dL", -0.02), ("dE", -0.02), ("bE", -0.1)]),
            delta_map: DeltaMap::basic(),
            policy: PolicyTable::new(vec![PolicyRule::new(
                &[Condition::above(R, 0.6), Condition::above(E, 0.6)],
                "INTERPRET",
            )]),
        },
        // Secure base: love regulates exploration and fear.
        "Attachment" => School {
            name: "Attachment",
            coeffs: shifted(&[("bC", 0.1), ("bR", 0.1), ("aE", -0.2)]),
            delta_map: DeltaMap::basic().with_gain(0.85),
            policy: rule1(R, 0.6, "RELATEDNESS"),
        },
        // Non-reactivity: ego suppression.
        "Mindfulness" => School {
            name: "Mindfulness",
            coeffs: shifted(&[("aE", -0.2), ("dE", 0.1), ("bE", 0.1)]),
            delta_map: DeltaMap::basic().with_gain(0.80),
            policy: PolicyTable::new(vec![
                PolicyRule::new(&[Condition::above(E, 0.6)], "BREATH"),
                PolicyRule::new(&[Condition::above(R, 0.6)], "COMPASSION"),
            ]),
        },
        // Exposure; arousal-driven perception, no clamp.
        "Behavioral_RL" => School {
            name: "Behavioral_RL",
            coeffs: shifted(&[("aC", 0.2), ("bC", 0.1)]),
            delta_map: DeltaMap {
                w_arousal: 1.0,
                w_valence: 0.4,
                gain: 0.95,
                clamp: None,
            },
            policy: rule1(E, 0.7, "EXPOSURE"),
        },
        // Error minimization: hypersensitive to prediction error.
        "PredictiveProcessing" => School {
            name: "PredictiveProcessing",
            coeffs: shifted(&[("aR", 0.2), ("bR", 0.1), ("aL", 0.1)]),
            delta_map: DeltaMap {
                w_arousal: 1.1,
                w_valence: 0.8,
                gain: 1.0,
                clamp: Some((-1.5, 1.5)),
            },
            policy: rule1(R, 0.8, "REAPPRAISE"),
        },
        // Autonomy and competence.
        "SDT" => School {
            name: "SDT",
            coeffs: shifted(&[("aC", 0.2), ("bC", 0.1)]),
            delta_map: DeltaMap::basic().with_gain(0.90),
            policy: PolicyTable::new(vec![PolicyRule::new(
                &[Condition::below(C, 0.5)],
                "AUTONOMY",
            )]),
        },
        _ => return None,
    };
    Some(s)
}

pub const SCHOOL_NAMES: [&str; 8] = [
    "CBT",
    "ACT",
    "Psychodynamic",
    "Attachment",
    "Mindfulness",
    "Behavioral_RL",
    "PredictiveProcessing",
    "SDT",
];

/// All eight presets, in canonical order.
pub fn all_schools() -> Vec<School> {
    SCHOOL_NAMES.iter().filter_map(|&n| school(n)).collect()
}
