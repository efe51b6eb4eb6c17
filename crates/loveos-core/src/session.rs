// ─────────────────────────────────────────────────────────────────────
// Love-OS — Headless Batch Sessions
// Mirrors: loveos_complex_dashboard.py (simulate) + the demo schedules
// ─────────────────────────────────────────────────────────────────────
//! Non-interactive simulation drivers. A session owns its agents,
//! stimulus, and ritual schedule, and produces a trajectory a
//! collaborator can export or plot. The session never touches
//! process-wide state: everything it reads it owns.

use serde::{Deserialize, Serialize};

use loveos_physics::affect_field::{self, AffectField, AFFECT_BOUNDS, AFFECT_DEFAULT_STATE};
use loveos_physics::{
    kuramoto_r, step_dyad, CoeffSet, ComplexAgent, EffectScheduler, Stepper, Stimulus,
    StressWindow,
};
use loveos_types::{KernelResult, SimConfig, Trajectory};

use crate::rituals::{complex_ritual, intervention};

/// Which agent of a dyad a ritual window targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    Me,
    Other,
}

/// A ritual active over [t0, t1), scheduled when the window opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RitualWindow {
    pub t0: f64,
    pub t1: f64,
    pub name: String,
    pub who: AgentRole,
}

impl RitualWindow {
    pub fn new(t0: f64, t1: f64, name: &str, who: AgentRole) -> Self {
        Self {
            t0,
            t1,
            name: name.to_string(),
            who,
        }
    }

    fn opens_at(&self, t: f64, dt: f64) -> bool {
        (t - self.t0).abs() < dt / 2.0
    }
}

/// Single-agent R/L/E/C run driven by a stimulus and a ritual
/// schedule.
#[derive(Debug, Clone)]
pub struct SoloSession {
    pub config: SimConfig,
    pub coeffs: CoeffSet,
    pub initial_state: [f64; 4],
    pub stimulus: Stimulus,
    pub rituals: Vec<RitualWindow>,
}

impl SoloSession {
    pub fn new(config: SimConfig, stimulus: Stimulus) -> Self {
        Self {
            config,
            coeffs: affect_field::base_coeffs(),
            initial_state: AFFECT_DEFAULT_STATE,
            stimulus,
            rituals: Vec::new(),
        }
    }

    /// Run headless; columns R, L, E, C, delta, valence, arousal.
    pub fn run(&self) -> KernelResult<Trajectory> {
        self.config.validate()?;
        self.stimulus.validate()?;
        log::debug!("solo session: T={} dt={}", self.config.t_total, self.config.dt);

        let dt = self.config.dt;
        let steps = self.config.steps();
        let stepper = Stepper::SubSteppedEuler {
            substeps: self.config.substeps,
        };
        let mut scheduler = EffectScheduler::new();
        let mut state = self.initial_state;
        let mut trajectory = Trajectory::with_capacity(
            &["R", "L", "E", "C", "delta", "valence", "arousal"],
            steps + 1,
        );

        record_solo(&mut trajectory, 0.0, &state, 0.0)?;
        for i in 1..=steps {
            let t = (i - 1) as f64 * dt;
            for w in &self.rituals {
                if w.opens_at(t, dt) {
                    if let Some(spec) = intervention(&w.name) {
                        log::info!("solo session: ritual {} at t={t}", w.name);
                        scheduler.schedule(t, w.t1 - w.t0, spec.to_effect());
                    }
                }
            }

            let (coeffs, scale) = scheduler.effective(t, &self.coeffs);
            let delta = self.stimulus.evaluate(t) * scale;
            let field = AffectField::new(&coeffs, AFFECT_BOUNDS);
            stepper.advance(&field, t, dt, &mut state, delta, None)?;
            record_solo(&mut trajectory, i as f64 * dt, &state, delta)?;
        }
        Ok(trajectory)
    }
}

fn record_solo(trajectory: &mut Trajectory, t: f64, state: &[f64; 4], delta: f64) -> KernelResult<()> {
    let affect = AffectField::observe(state);
    trajectory.push(
        t,
        &[
            state[0],
            state[1],
            state[2],
            state[3],
            delta,
            affect.valence,
            affect.arousal,
        ],
    )
}

/// Two coupled complex agents under a shared stress schedule.
#[derive(Debug, Clone)]
pub struct DyadSession {
    pub config: SimConfig,
    /// Diffusive coupling gain between the agents.
    pub coupling_k: f64,
    pub stress: Stimulus,
    pub rituals: Vec<RitualWindow>,
    /// The other agent perceives attenuated stress…
    pub other_delta_scale: f64,
    /// …and couples at reduced gain.
    pub other_k_scale: f64,
}

/// Output of a dyad run: the full trajectory plus the accumulated
/// synchrony dissipation Q.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DyadRun {
    pub trajectory: Trajectory,
    pub dissipation: f64,
}

impl DyadSession {
    pub fn new(config: SimConfig, stress: Stimulus) -> Self {
        Self {
            config,
            coupling_k: 0.15,
            stress,
            rituals: Vec::new(),
            other_delta_scale: 0.7,
            other_k_scale: 0.8,
        }
    }

    /// The canonical demo: two stress pulses, each answered by a
    /// ritual on the self agent.
    pub fn demo() -> Self {
        let stress = Stimulus::Schedule {
            windows: vec![
                StressWindow {
                    t0: 10.0,
                    t1: 20.0,
                    amp: 1.0,
                },
                StressWindow {
                    t0: 35.0,
                    t1: 45.0,
                    amp: 0.9,
                },
            ],
        };
        let mut session = Self::new(SimConfig::default(), stress);
        session.rituals = vec![
            RitualWindow::new(20.0, 28.0, "BREATH", AgentRole::Me),
            RitualWindow::new(45.0, 54.0, "LABEL", AgentRole::Me),
        ];
        session
    }

    /// Run headless. Per-agent columns plus delta, the two-agent
    /// Kuramoto R over the ψ1 phases, and the running dissipation Q.
    pub fn run(&self) -> KernelResult<DyadRun> {
        self.config.validate()?;
        self.stress.validate()?;
        log::debug!("dyad session: T={} dt={}", self.config.t_total, self.config.dt);

        let dt = self.config.dt;
        let steps = self.config.steps();
        let mut me = ComplexAgent::new("self");
        let mut you = ComplexAgent::partner("other");

        let mut trajectory = Trajectory::with_capacity(
            &[
                "amp1_self",
                "amp2_self",
                "phi1_self",
                "phi2_self",
                "v_self",
                "a_self",
                "amp1_other",
                "amp2_other",
                "phi1_other",
                "phi2_other",
                "v_other",
                "a_other",
                "delta",
                "r_kuramoto",
                "q",
            ],
            steps,
        );
        let mut q = 0.0;

        for i in 0..steps {
            let t = i as f64 * dt;
            for w in &self.rituals {
                if w.opens_at(t, dt) {
                    if let Some(spec) = complex_ritual(&w.name) {
                        let target = match w.who {
                            AgentRole::Me => &mut me,
                            AgentRole::Other => &mut you,
                        };
                        log::info!("dyad session: ritual {} on {} at t={t}", w.name, target.name);
                        target.schedule_effect(t, w.t1 - w.t0, spec);
                    }
                }
            }

            let delta = self.stress.evaluate(t);
            step_dyad(
                &mut me,
                &mut you,
                t,
                dt,
                delta,
                self.coupling_k,
                self.other_delta_scale,
                self.other_k_scale,
            )?;

            // Synchrony dissipation: resistance drops as ψ1s align.
            let combined = (me.psi1() + you.psi1()).norm();
            q += 2.0 * (-0.5 * combined).exp() * dt;

            let (va, vb) = (me.observe(), you.observe());
            trajectory.push(
                t,
                &[
                    me.psi1().norm(),
                    me.psi2().norm(),
                    me.psi1().arg(),
                    me.psi2().arg(),
                    va.valence,
                    va.arousal,
                    you.psi1().norm(),
                    you.psi2().norm(),
                    you.psi1().arg(),
                    you.psi2().arg(),
                    vb.valence,
                    vb.arousal,
                    delta,
                    kuramoto_r(me.psi1().arg(), you.psi1().arg()),
                    q,
                ],
            )?;
        }

        Ok(DyadRun {
            trajectory,
            dissipation: q,
        })
    }
}
