// ─────────────────────────────────────────────────────────────────────
// Love-OS — Perception Backend Interface
// Mirrors: agent.py (perceive_delta)
// ─────────────────────────────────────────────────────────────────────
//! Text → affect estimation behind a trait. The keyword heuristic is
//! a deterministic stand-in for a real classifier; in production an
//! LLM or sentiment model runs behind the same trait, injected into
//! the agent. The word lists are parameters, not behavior.

use loveos_types::Affect;

/// Trait for perception backends: estimate the affect a user text
/// carries.
pub trait Perception: Send + Sync {
    fn estimate(&self, text: &str) -> Affect;
}

/// Keyword-lexicon estimator (bilingual defaults from the research
/// prototype). Matching is lowercase substring containment.
pub struct LexiconPerception {
    stress_words: Vec<String>,
    love_words: Vec<String>,
    /// Affect attributed to a stress hit.
    pub stress_affect: Affect,
    /// Affect attributed to a warmth hit.
    pub love_affect: Affect,
    /// Baseline affect for neutral text.
    pub neutral_affect: Affect,
}

impl Default for LexiconPerception {
    fn default() -> Self {
        Self::new(
            &[
                "stupid", "slow", "useless", "hate", "no good", "バカ", "遅い", "使えない",
                "嫌い", "ダメ",
            ],
            &[
                "thank you", "thanks", "love", "awesome", "helpful", "ありがとう", "好き",
                "すごい", "助かる",
            ],
        )
    }
}

impl LexiconPerception {
    pub fn new(stress_words: &[&str], love_words: &[&str]) -> Self {
        Self {
            stress_words: stress_words.iter().map(|w| w.to_lowercase()).collect(),
            love_words: love_words.iter().map(|w| w.to_lowercase()).collect(),
            stress_affect: Affect::new(-0.8, 0.9),
            love_affect: Affect::new(0.6, 0.3),
            neutral_affect: Affect::new(0.05, 0.2),
        }
    }
}

impl Perception for LexiconPerception {
    fn estimate(&self, text: &str) -> Affect {
        let t = text.to_lowercase();
        if self.stress_words.iter().any(|w| t.contains(w)) {
            return self.stress_affect;
        }
        if self.love_words.iter().any(|w| t.contains(w)) {
            return self.love_affect;
        }
        self.neutral_affect
    }
}

/// Perception backend delegating to an injected scoring function
/// (the seam for a real classifier or an LLM bridge).
type EstimateFn = Box<dyn Fn(&str) -> Affect + Send + Sync>;

pub struct ExternalPerception {
    estimate_fn: EstimateFn,
}

impl ExternalPerception {
    pub fn new(estimate_fn: impl Fn(&str) -> Affect + Send + Sync + 'static) -> Self {
        Self {
            estimate_fn: Box::new(estimate_fn),
        }
    }
}

impl Perception for ExternalPerception {
    fn estimate(&self, text: &str) -> Affect {
        (self.estimate_fn)(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_words_detected() {
        let p = LexiconPerception::default();
        let a = p.estimate("This is USELESS");
        assert!(a.valence < 0.0);
        assert!(a.arousal > 0.5);
    }

    #[test]
    fn test_bilingual_match() {
        let p = LexiconPerception::default();
        assert!(p.estimate("ダメだこれ").valence < 0.0);
        assert!(p.estimate("ありがとう！").valence > 0.0);
    }

    #[test]
    fn test_love_words_detected() {
        let p = LexiconPerception::default();
        let a = p.estimate("thanks, that was helpful");
        assert!(a.valence > 0.0);
    }

    #[test]
    fn test_neutral_baseline() {
        let p = LexiconPerception::default();
        let a = p.estimate("please sort the list by date");
        assert_eq!(a, p.neutral_affect);
    }

    #[test]
    fn test_stress_takes_priority_over_love() {
        // Mixed message: the shock wins, as in the source heuristic.
        let p = LexiconPerception::default();
        let a = p.estimate("thanks for nothing, this is useless");
        assert!(a.valence < 0.0);
    }

    #[test]
    fn test_custom_lexicon() {
        let p = LexiconPerception::new(&["deadline"], &["vacation"]);
        assert!(p.estimate("the deadline moved up").valence < 0.0);
        assert!(p.estimate("vacation starts monday").valence > 0.0);
    }

    #[test]
    fn test_external_backend() {
        let p = ExternalPerception::new(|_| Affect::new(0.42, 0.1));
        assert!((p.estimate("anything").valence - 0.42).abs() < 1e-12);
    }
}
