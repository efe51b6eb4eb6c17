// ─────────────────────────────────────────────────────────────────────
// Love-OS — Affective State Field (R/L/E/C)
// Mirrors: core.py (LoveOS_Physics) + loveos_schools.py (RLEC)
// ─────────────────────────────────────────────────────────────────────
//! The canonical 4-dimensional affective model (v0.95):
//!
//!   dR = aR·Δ − bR·L·R − gR·C·R
//!   dL = aL·C − bL·E·R − dL·L + uL
//!   dE = aE·|Δ| − bE·L − dE·E + uE
//!   dC = −aC·R + bC·L − dC·C + uC
//!
//! R: unexplained info / prediction-error accumulation
//! L: love / integration capacity
//! E: ego / defensiveness (separation bias)
//! C: sense of control / agency
//!
//! Δ is the external forcing; uL/uC/uE are the ritual input
//! coefficients (base 0). Driven by sub-stepped Euler with hard
//! state saturation.

use serde::{Deserialize, Serialize};

use loveos_types::Affect;

use crate::effects::CoeffSet;
use crate::integrator::VectorField;

/// Component order of the state vector.
pub const AFFECT_DIM: usize = 4;
pub const AFFECT_COMPONENTS: [&str; AFFECT_DIM] = ["R", "L", "E", "C"];

/// Slightly positive stable initial state.
pub const AFFECT_DEFAULT_STATE: [f64; AFFECT_DIM] = [0.1, 0.5, 0.2, 0.5];

/// Saturation bounds of the conversational kernel.
pub const AFFECT_BOUNDS: (f64, f64) = (-2.0, 2.0);
/// Wider bounds used by the school digital twins.
pub const TWIN_BOUNDS: (f64, f64) = (-2.0, 3.0);

/// The standard v0.95 coefficient table (the "average" human).
pub fn base_coeffs() -> CoeffSet {
    CoeffSet::from_pairs(&[
        ("aR", 1.2),
        ("bR", 0.8),
        ("gR", 0.6),
        ("aL", 0.4),
        ("bL", 0.3),
        ("dL", 0.05),
        ("aE", 0.8),
        ("bE", 0.5),
        ("dE", 0.1),
        ("aC", 0.5),
        ("bC", 0.6),
        ("dC", 0.1),
    ])
}

/// Coefficient table resolved into a dense struct for the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffectParams {
    pub a_r: f64,
    pub b_r: f64,
    pub g_r: f64,
    pub a_l: f64,
    pub b_l: f64,
    pub d_l: f64,
    pub a_e: f64,
    pub b_e: f64,
    pub d_e: f64,
    pub a_c: f64,
    pub b_c: f64,
    pub d_c: f64,
    pub u_l: f64,
    pub u_c: f64,
    pub u_e: f64,
}

impl AffectParams {
    /// Resolve named coefficients once per external step. Absent
    /// input coefficients default to 0.
    pub fn from_coeffs(c: &CoeffSet) -> Self {
        Self {
            a_r: c.get("aR"),
            b_r: c.get("bR"),
            g_r: c.get("gR"),
            a_l: c.get("aL"),
            b_l: c.get("bL"),
            d_l: c.get("dL"),
            a_e: c.get("aE"),
            b_e: c.get("bE"),
            d_e: c.get("dE"),
            a_c: c.get("aC"),
            b_c: c.get("bC"),
            d_c: c.get("dC"),
            u_l: c.get("uL"),
            u_c: c.get("uC"),
            u_e: c.get("uE"),
        }
    }
}

/// R/L/E/C vector field with per-variant saturation bounds.
#[derive(Debug, Clone)]
pub struct AffectField {
    p: AffectParams,
    bounds: [(f64, f64); AFFECT_DIM],
}

impl AffectField {
    pub fn new(coeffs: &CoeffSet, bounds: (f64, f64)) -> Self {
        Self {
            p: AffectParams::from_coeffs(coeffs),
            bounds: [bounds; AFFECT_DIM],
        }
    }

    /// Conversational kernel: standard table, [-2, 2] saturation.
    pub fn default_params() -> Self {
        Self::new(&base_coeffs(), AFFECT_BOUNDS)
    }

    pub fn params(&self) -> &AffectParams {
        &self.p
    }

    /// Map internal state to observable affect.
    ///
    /// valence = tanh(−R + 0.8·L − E + 0.7·C)
    /// arousal = softplus(0.5·|R| + 0.5·E)
    pub fn observe(state: &[f64]) -> Affect {
        let (r, l, e, c) = (state[0], state[1], state[2], state[3]);
        let valence = (-r + 0.8 * l - e + 0.7 * c).tanh();
        let arousal = (0.5 * r.abs() + 0.5 * e).exp().ln_1p();
        Affect::new(valence, arousal)
    }
}

impl VectorField for AffectField {
    fn dim(&self) -> usize {
        AFFECT_DIM
    }

    fn derivative(
        &self,
        _t: f64,
        state: &[f64],
        forcing: f64,
        _partner: Option<&[f64]>,
        out: &mut [f64],
    ) {
        let p = &self.p;
        let (r, l, e, c) = (state[0], state[1], state[2], state[3]);
        out[0] = p.a_r * forcing - p.b_r * l * r - p.g_r * c * r;
        out[1] = p.a_l * c - p.b_l * e * r - p.d_l * l + p.u_l;
        out[2] = p.a_e * forcing.abs() - p.b_e * l - p.d_e * e + p.u_e;
        out[3] = -p.a_c * r + p.b_c * l - p.d_c * c + p.u_c;
    }

    fn clamp_bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }
}
