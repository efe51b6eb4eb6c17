// ─────────────────────────────────────────────────────────────────────
// Love-OS — Deterministic Noise Generator
// ─────────────────────────────────────────────────────────────────────
//! Minimal xorshift64 RNG for the stochastic model variants (no
//! external dep). Always explicitly seeded: deterministic replay of a
//! run requires that two simulations with the same seed draw the same
//! noise sequence.

/// Xorshift64 generator with Box–Muller normal sampling.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF_CAFE_BABE } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximate standard normal via Box–Muller.
    pub fn next_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-300);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u), "u={u} out of [0,1)");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimpleRng::new(123);
        let mut b = SimpleRng::new(123);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_remapped() {
        // Zero would be a xorshift fixed point.
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_normal_roughly_centred() {
        let mut rng = SimpleRng::new(42);
        let n = 10_000;
        let mean: f64 = (0..n).map(|_| rng.next_normal()).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "sample mean {mean} too far from 0");
    }
}
