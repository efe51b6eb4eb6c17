// ─────────────────────────────────────────────────────────────────────
// Love-OS — Ritual Policy Tables
// Mirrors: agent.py (decide_ritual) + loveos_schools.py (policy funcs)
// ─────────────────────────────────────────────────────────────────────
//! Threshold-guarded intervention selection. A policy is an ordered
//! rule table: every condition of a rule must hold for the rule to
//! fire, and the first firing rule wins. A table that matches
//! nothing selects no ritual — the function is total.

use serde::{Deserialize, Serialize};

use loveos_types::Affect;

/// What a condition reads: a state component by index, or the
/// externally observed affect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Quantity {
    Component(usize),
    Valence,
    Arousal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmp {
    Above,
    Below,
}

/// One threshold guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub quantity: Quantity,
    pub cmp: Cmp,
    pub threshold: f64,
}

impl Condition {
    pub fn above(quantity: Quantity, threshold: f64) -> Self {
        Self {
            quantity,
            cmp: Cmp::Above,
            threshold,
        }
    }

    pub fn below(quantity: Quantity, threshold: f64) -> Self {
        Self {
            quantity,
            cmp: Cmp::Below,
            threshold,
        }
    }

    fn holds(&self, state: &[f64], affect: &Affect) -> bool {
        let value = match self.quantity {
            Quantity::Component(i) => match state.get(i) {
                Some(&v) => v,
                None => return false,
            },
            Quantity::Valence => affect.valence,
            Quantity::Arousal => affect.arousal,
        };
        match self.cmp {
            Cmp::Above => value > self.threshold,
            Cmp::Below => value < self.threshold,
        }
    }
}

/// One rule: all conditions must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub conditions: Vec<Condition>,
    pub ritual: String,
}

impl PolicyRule {
    pub fn new(conditions: &[Condition], ritual: &str) -> Self {
        Self {
            conditions: conditions.to_vec(),
            ritual: ritual.to_string(),
        }
    }
}

/// Ordered rule table; first match wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
}

impl PolicyTable {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Select an intervention for the current state and observed
    /// affect, or None.
    pub fn decide(&self, state: &[f64], affect: &Affect) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.conditions.iter().all(|c| c.holds(state, affect)))
            .map(|r| r.ritual.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The conversational agent's default policy:
/// panic-like states breathe, light confusion labels.
pub fn agent_default() -> PolicyTable {
    use Quantity::Component;
    PolicyTable::new(vec![
        // R > 1.0 or E > 1.0 → BREATH (two rules, same ritual).
        PolicyRule::new(&[Condition::above(Component(0), 1.0)], "BREATH"),
        PolicyRule::new(&[Condition::above(Component(2), 1.0)], "BREATH"),
        // R > 0.5 and L < 0 → LABEL.
        PolicyRule::new(
            &[
                Condition::above(Component(0), 0.5),
                Condition::below(Component(1), 0.0),
            ],
            "LABEL",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> Affect {
        Affect::neutral()
    }

    #[test]
    fn test_first_match_wins() {
        let table = PolicyTable::new(vec![
            PolicyRule::new(&[Condition::above(Quantity::Component(0), 0.5)], "FIRST"),
            PolicyRule::new(&[Condition::above(Quantity::Component(0), 0.5)], "SECOND"),
        ]);
        assert_eq!(table.decide(&[1.0], &neutral()), Some("FIRST"));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let table = PolicyTable::new(vec![PolicyRule::new(
            &[
                Condition::above(Quantity::Component(0), 0.6),
                Condition::above(Quantity::Component(2), 0.6),
            ],
            "INTERPRET",
        )]);
        assert_eq!(table.decide(&[0.7, 0.0, 0.5, 0.0], &neutral()), None);
        assert_eq!(
            table.decide(&[0.7, 0.0, 0.7, 0.0], &neutral()),
            Some("INTERPRET")
        );
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(agent_default().decide(&[0.0, 0.5, 0.0, 0.5], &neutral()), None);
    }

    #[test]
    fn test_agent_default_breath_on_panic() {
        // High R or high E both trigger BREATH.
        let table = agent_default();
        assert_eq!(table.decide(&[1.2, 0.5, 0.2, 0.5], &neutral()), Some("BREATH"));
        assert_eq!(table.decide(&[0.2, 0.5, 1.1, 0.5], &neutral()), Some("BREATH"));
    }

    #[test]
    fn test_agent_default_label_on_confusion() {
        let table = agent_default();
        assert_eq!(
            table.decide(&[0.6, -0.1, 0.2, 0.5], &neutral()),
            Some("LABEL")
        );
    }

    #[test]
    fn test_affect_conditions() {
        let table = PolicyTable::new(vec![PolicyRule::new(
            &[Condition::below(Quantity::Valence, -0.5)],
            "COMPASSION",
        )]);
        let low = Affect::new(-0.8, 0.5);
        assert_eq!(table.decide(&[], &low), Some("COMPASSION"));
        assert_eq!(table.decide(&[], &neutral()), None);
    }

    #[test]
    fn test_out_of_range_component_never_fires() {
        let table = PolicyTable::new(vec![PolicyRule::new(
            &[Condition::above(Quantity::Component(7), 0.0)],
            "X",
        )]);
        assert_eq!(table.decide(&[1.0], &neutral()), None);
    }
}
