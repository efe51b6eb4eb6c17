// ─────────────────────────────────────────────────────────────────────
// Love-OS — Effect Scheduler
// Mirrors: loveos_complex_dashboard.py (ComplexAgent._params_with_effects)
// ─────────────────────────────────────────────────────────────────────
//! Bounded-duration parameter perturbations ("rituals"). Each agent
//! owns one scheduler; at every external integration step the agent
//! asks for the coefficient table with all currently active effect
//! deltas summed in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named coefficient table for one model variant.
///
/// The base table is built once per model and never mutated; effect
/// deltas are merged into a fresh copy each step. Absent names read
/// as 0.0, which is how the input coefficients (uL, uC, uE, …) get
/// their neutral default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoeffSet {
    values: BTreeMap<String, f64>,
}

impl CoeffSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            values: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Add `delta` to the named coefficient (inserting if absent).
    pub fn add(&mut self, name: &str, delta: f64) {
        *self.values.entry(name.to_string()).or_insert(0.0) += delta;
    }

    /// New table = self ⊕ deltas.
    pub fn merged(&self, deltas: &BTreeMap<String, f64>) -> CoeffSet {
        let mut out = self.clone();
        for (k, v) in deltas {
            out.add(k, *v);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The perturbation carried by one scheduled effect: additive
/// coefficient deltas plus a multiplicative attenuation of the
/// external forcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub coeff_deltas: BTreeMap<String, f64>,
    pub input_scale: f64,
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            coeff_deltas: BTreeMap::new(),
            input_scale: 1.0,
        }
    }
}

impl EffectSpec {
    pub fn from_deltas(pairs: &[(&str, f64)]) -> Self {
        Self {
            coeff_deltas: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            input_scale: 1.0,
        }
    }

    pub fn with_input_scale(mut self, scale: f64) -> Self {
        self.input_scale = scale;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActiveEffect {
    expires_at: f64,
    spec: EffectSpec,
}

/// Per-agent set of (expiry, effect) entries.
///
/// Pruning happens on read: `effective` removes entries whose expiry
/// lies strictly before the queried time, so the scheduler is
/// stateful across reads and call order matters. Call `effective`
/// exactly once per external integration step — never once per
/// derivative evaluation. Multi-stage steppers (RK4) must reuse the
/// returned snapshot for all stages of the step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectScheduler {
    active: Vec<ActiveEffect>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect lasting `duration` from `now`.
    ///
    /// Simultaneously active effects stack additively in their
    /// coefficient deltas (duplicate schedules double the nudge);
    /// their input scales multiply.
    pub fn schedule(&mut self, now: f64, duration: f64, spec: EffectSpec) {
        self.active.push(ActiveEffect {
            expires_at: now + duration,
            spec,
        });
    }

    /// Coefficient table and forcing scale at `now`: base plus the
    /// deltas of every entry with `expires_at >= now`. Expired
    /// entries are pruned as a side effect.
    pub fn effective(&mut self, now: f64, base: &CoeffSet) -> (CoeffSet, f64) {
        self.active.retain(|e| e.expires_at >= now);
        let mut coeffs = base.clone();
        let mut scale = 1.0;
        for e in &self.active {
            for (k, v) in &e.spec.coeff_deltas {
                coeffs.add(k, *v);
            }
            scale *= e.spec.input_scale;
        }
        (coeffs, scale)
    }

    /// Number of currently registered (possibly expired-but-unpruned)
    /// effects.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breath_like() -> EffectSpec {
        EffectSpec::from_deltas(&[("uC", 0.2), ("uE", -0.3)]).with_input_scale(0.6)
    }

    #[test]
    fn test_coeffs_absent_name_reads_zero() {
        let c = CoeffSet::from_pairs(&[("aR", 1.2)]);
        assert_eq!(c.get("aR"), 1.2);
        assert_eq!(c.get("uL"), 0.0);
    }

    #[test]
    fn test_effect_contributes_through_duration() {
        let base = CoeffSet::from_pairs(&[("uC", 0.0)]);
        let mut sched = EffectScheduler::new();
        sched.schedule(1.0, 2.0, breath_like());

        // Inside [t0, t0+d] the delta applies, endpoint included.
        let (c, s) = sched.effective(1.0, &base);
        assert!((c.get("uC") - 0.2).abs() < 1e-12);
        assert!((s - 0.6).abs() < 1e-12);
        let (c, _) = sched.effective(3.0, &base);
        assert!((c.get("uC") - 0.2).abs() < 1e-12);

        // Past expiry: nothing, and the entry is pruned.
        let (c, s) = sched.effective(3.0 + 1e-9, &base);
        assert_eq!(c.get("uC"), 0.0);
        assert_eq!(s, 1.0);
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn test_overlapping_effects_stack_additively() {
        let base = CoeffSet::new();
        let mut sched = EffectScheduler::new();
        sched.schedule(0.0, 5.0, breath_like());
        sched.schedule(0.0, 5.0, breath_like());
        let (c, s) = sched.effective(2.0, &base);
        // Identical rituals stack: deltas add, scales multiply.
        assert!((c.get("uC") - 0.4).abs() < 1e-12);
        assert!((c.get("uE") + 0.6).abs() < 1e-12);
        assert!((s - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_effects_merge() {
        let base = CoeffSet::from_pairs(&[("sigma1", 0.2)]);
        let mut sched = EffectScheduler::new();
        sched.schedule(0.0, 10.0, EffectSpec::from_deltas(&[("sigma1", 0.15)]));
        sched.schedule(0.0, 10.0, EffectSpec::from_deltas(&[("omega1", -0.6)]));
        let (c, _) = sched.effective(1.0, &base);
        assert!((c.get("sigma1") - 0.35).abs() < 1e-12);
        assert!((c.get("omega1") + 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_prune_keeps_live_entries() {
        let base = CoeffSet::new();
        let mut sched = EffectScheduler::new();
        sched.schedule(0.0, 1.0, breath_like());
        sched.schedule(0.0, 10.0, breath_like());
        sched.effective(5.0, &base);
        assert_eq!(sched.active_count(), 1);
    }

    #[test]
    fn test_base_table_untouched() {
        let base = CoeffSet::from_pairs(&[("uC", 0.0)]);
        let mut sched = EffectScheduler::new();
        sched.schedule(0.0, 5.0, breath_like());
        let _ = sched.effective(0.0, &base);
        assert_eq!(base.get("uC"), 0.0);
    }
}
