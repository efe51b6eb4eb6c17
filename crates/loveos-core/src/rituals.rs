// ─────────────────────────────────────────────────────────────────────
// Love-OS — Unified Ritual Dictionary
// Mirrors: loveos_schools.py (RITUALS) + loveos_complex_dashboard.py
// ─────────────────────────────────────────────────────────────────────
//! The right-brain intervention tables. Each named ritual is a fixed
//! small nudge: input coefficients (uL, uC, uE) plus a forcing
//! attenuation for the R/L/E/C kernel, or parameter deltas for the
//! complex model. Tables are static configuration — policy decides
//! *when*, these decide *what*.

use loveos_physics::EffectSpec;

/// Default duration of a scheduled complex-model ritual, seconds.
pub const DEFAULT_RITUAL_DURATION: f64 = 8.0;

/// The no-op ritual name.
pub const RITUAL_NONE: &str = "NONE";

/// One R/L/E/C intervention: input nudges and Δ attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intervention {
    pub u_l: f64,
    pub u_c: f64,
    pub u_e: f64,
    pub delta_scale: f64,
}

impl Intervention {
    pub fn to_effect(&self) -> EffectSpec {
        EffectSpec::from_deltas(&[("uL", self.u_l), ("uC", self.u_c), ("uE", self.u_e)])
            .with_input_scale(self.delta_scale)
    }
}

/// The unified ritual dictionary (one entry per school tradition).
pub static RITUALS: [(&str, Intervention); 10] = [
    // Deep breathing: restore control, drop ego, dampen the shock.
    ("BREATH", Intervention { u_l: 0.0, u_c: 0.2, u_e: -0.3, delta_scale: 0.6 }),
    // Affective labeling: induce integration.
    ("LABEL", Intervention { u_l: 0.3, u_c: 0.0, u_e: 0.0, delta_scale: 0.8 }),
    // CBT reappraisal.
    ("REAPPRAISE", Intervention { u_l: 0.25, u_c: 0.15, u_e: -0.15, delta_scale: 0.7 }),
    // Acceptance & commitment.
    ("ACT", Intervention { u_l: 0.2, u_c: 0.2, u_e: -0.1, delta_scale: 0.8 }),
    // Psychodynamic interpretation.
    ("INTERPRET", Intervention { u_l: 0.3, u_c: 0.0, u_e: -0.1, delta_scale: 0.9 }),
    // Attachment: secure-base relatedness.
    ("RELATEDNESS", Intervention { u_l: 0.3, u_c: 0.1, u_e: -0.2, delta_scale: 0.7 }),
    // Mindfulness compassion.
    ("COMPASSION", Intervention { u_l: 0.4, u_c: 0.0, u_e: -0.3, delta_scale: 0.6 }),
    // Behavioral exposure.
    ("EXPOSURE", Intervention { u_l: 0.0, u_c: 0.3, u_e: 0.1, delta_scale: 0.9 }),
    // SDT autonomy support.
    ("AUTONOMY", Intervention { u_l: 0.1, u_c: 0.4, u_e: 0.0, delta_scale: 0.9 }),
    ("NONE", Intervention { u_l: 0.0, u_c: 0.0, u_e: 0.0, delta_scale: 1.0 }),
];

/// Look up an R/L/E/C intervention by name.
pub fn intervention(name: &str) -> Option<&'static Intervention> {
    RITUALS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, i)| i)
}

/// Ritual table of the complex model: bounded-duration parameter
/// nudges on the Stuart–Landau coefficients.
pub fn complex_ritual(name: &str) -> Option<EffectSpec> {
    let spec = match name.to_ascii_uppercase().as_str() {
        // Calm rotation and phase twist.
        "BREATH" => EffectSpec::from_deltas(&[
            ("omega1", -0.6),
            ("omega2", -0.4),
            ("eta1", -0.05),
            ("eta2", -0.03),
        ]),
        // Enhance integration gain.
        "LABEL" => EffectSpec::from_deltas(&[("sigma1", 0.15)]),
        // Integration plus mild saturation against overshoot.
        "REAPPRAISE" | "CBT" => {
            EffectSpec::from_deltas(&[("sigma1", 0.12), ("kappa1", 0.08), ("eta1", -0.02)])
        }
        // Align rhythms, soften phase nonlinearity.
        "COMPASSION" => EffectSpec::from_deltas(&[("omega1", -0.3), ("eta1", -0.06)]),
        "AUTONOMY" => EffectSpec::from_deltas(&[("sigma2", 0.12)]),
        _ => return None,
    };
    Some(spec)
}
