// ─────────────────────────────────────────────────────────────────────
// Love-OS — Conversational Agent
// Mirrors: agent.py (LoveOS_Agent)
// ─────────────────────────────────────────────────────────────────────
//! Text-in agent loop: perceive the shock, let the right-brain
//! policy decide a ritual, advance the physics one turn, read out
//! affect. The perception backend is injected — the keyword lexicon
//! is only the deterministic default.

use loveos_physics::affect_field::{self, AffectField, AFFECT_BOUNDS, AFFECT_DEFAULT_STATE};
use loveos_physics::{CoeffSet, EffectScheduler, Stepper};
use loveos_types::{Affect, KernelResult};

use crate::perception::{LexiconPerception, Perception};
use crate::policy::{self, PolicyTable};
use crate::rituals::{intervention, RITUAL_NONE};
use crate::schools::DeltaMap;
use crate::twin::{TurnLog, TURN_DT, TURN_SUBSTEPS};

// A ritual lasts its own turn only.
const TURN_EFFECT_DURATION: f64 = TURN_DT / 2.0;

/// One agent: kernel state, base table, policy, perception seam.
pub struct Agent {
    state: [f64; 4],
    coeffs: CoeffSet,
    delta_map: DeltaMap,
    policy: PolicyTable,
    perception: Box<dyn Perception>,
    scheduler: EffectScheduler,
    turn: usize,
    history: Vec<TurnLog>,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(Box::new(LexiconPerception::default()))
    }
}

impl Agent {
    pub fn new(perception: Box<dyn Perception>) -> Self {
        Self {
            state: AFFECT_DEFAULT_STATE,
            coeffs: affect_field::base_coeffs(),
            delta_map: DeltaMap::basic(),
            policy: policy::agent_default(),
            perception,
            scheduler: EffectScheduler::new(),
            turn: 0,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &[f64; 4] {
        &self.state
    }

    pub fn history(&self) -> &[TurnLog] {
        &self.history
    }

    /// Current affect readout.
    pub fn observe(&self) -> Affect {
        AffectField::observe(&self.state)
    }

    /// Process one user message: perceive → policy → ritual →
    /// physics turn → readout.
    pub fn turn(&mut self, text: &str) -> KernelResult<TurnLog> {
        let t = self.turn as f64 * TURN_DT;
        let affect_in = self.perception.estimate(text);
        let raw_delta = self.delta_map.delta(&affect_in);

        let ritual = self
            .policy
            .decide(&self.state, &affect_in)
            .unwrap_or(RITUAL_NONE)
            .to_string();
        if ritual != RITUAL_NONE {
            if let Some(spec) = intervention(&ritual) {
                log::info!("agent turn {}: auto-ritual {ritual}", self.turn);
                self.scheduler
                    .schedule(t, TURN_EFFECT_DURATION, spec.to_effect());
            }
        }

        let (coeffs, scale) = self.scheduler.effective(t, &self.coeffs);
        let delta = raw_delta * scale;
        let field = AffectField::new(&coeffs, AFFECT_BOUNDS);
        Stepper::SubSteppedEuler {
            substeps: TURN_SUBSTEPS,
        }
        .advance(&field, t, TURN_DT, &mut self.state, delta, None)?;

        let out = self.observe();
        let log = TurnLog {
            turn: self.turn,
            school: "Agent".to_string(),
            v_in: affect_in.valence,
            a_in: affect_in.arousal,
            delta,
            ritual,
            r: self.state[0],
            l: self.state[1],
            e: self.state[2],
            c: self.state[3],
            v_out: out.valence,
            a_out: out.arousal,
        };
        self.history.push(log.clone());
        self.turn += 1;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::ExternalPerception;

    #[test]
    fn test_insults_raise_resistance() {
        let mut agent = Agent::default();
        let r0 = agent.state()[0];
        for _ in 0..3 {
            agent.turn("this is useless, I hate it").unwrap();
        }
        assert!(agent.state()[0] > r0, "R should climb under abuse");
        assert!(agent.observe().valence < 0.0);
    }

    #[test]
    fn test_warmth_keeps_valence_pleasant() {
        let mut agent = Agent::default();
        for _ in 0..3 {
            agent.turn("thank you, that was helpful").unwrap();
        }
        assert!(agent.observe().valence > 0.0);
    }

    #[test]
    fn test_sustained_abuse_triggers_breath() {
        let mut agent = Agent::default();
        let mut fired = false;
        for _ in 0..10 {
            let log = agent.turn("stupid useless thing, I hate this").unwrap();
            if log.ritual == "BREATH" {
                fired = true;
                break;
            }
        }
        assert!(fired, "BREATH should auto-trigger under sustained abuse");
    }

    #[test]
    fn test_state_respects_kernel_bounds() {
        let mut agent = Agent::default();
        for i in 0..50 {
            let text = if i % 2 == 0 { "I hate this" } else { "thanks" };
            agent.turn(text).unwrap();
            for &v in agent.state() {
                assert!((AFFECT_BOUNDS.0..=AFFECT_BOUNDS.1).contains(&v));
            }
        }
    }

    #[test]
    fn test_injected_perception_backend() {
        // A backend that always reports a hard shock.
        let mut agent = Agent::new(Box::new(ExternalPerception::new(|_| {
            Affect::new(-1.0, 1.0)
        })));
        let log = agent.turn("anything at all").unwrap();
        // Δ = clamp(0.8·1.0 + 0.6·1.0) = 1.4 before any attenuation.
        assert!(log.delta > 1.0);
    }

    #[test]
    fn test_history_accumulates() {
        let mut agent = Agent::default();
        agent.turn("hello").unwrap();
        agent.turn("hello again").unwrap();
        assert_eq!(agent.history().len(), 2);
        assert_eq!(agent.history()[1].turn, 1);
    }
}
