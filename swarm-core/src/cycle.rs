use core::fmt;

use rand::Rng;

use crate::config::{CycleConfig, TransitionTuning};
use crate::transition::{TransitionContext, TransitionEffect};

/// Words and icons the swarm forms, in show order
pub const SHOW_SEQUENCE: [&str; 19] = [
    "407",
    "LOVE",
    "EOLA",
    "DTO",
    "UCF",
    "EPIC",
    "PRIDE",
    "VALOR",
    "VAMOS",
    "ORLANDO",
    "MAGIC",
    "LAKE",
    "SUNRAIL",
    "MICKEY",
    "UNIVERSAL",
    "FLAG",
    "CASTLE",
    "EPCOT",
    "EYE",
];

/// Ordered shape tokens with exactly one active at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSequence {
    tokens: Vec<String>,
    index: usize,
}

impl ShapeSequence {
    /// An empty token list falls back to the show sequence
    pub fn new(tokens: Vec<String>) -> Self {
        if tokens.is_empty() {
            return Self::show();
        }
        Self { tokens, index: 0 }
    }

    pub fn show() -> Self {
        Self {
            tokens: SHOW_SEQUENCE.iter().map(|t| t.to_string()).collect(),
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.tokens[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.tokens.len();
    }

    pub fn retreat(&mut self) {
        self.index = (self.index + self.tokens.len() - 1) % self.tokens.len();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Roaming,
    Assembling,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Roaming => f.write_str("ROAMING"),
            Phase::Assembling => f.write_str("ASSEMBLING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// Timer-driven roam / assemble cycle
    Auto,
    /// Shapes stepped by external commands, always assembling
    Manual,
}

/// A running transition and when it began on the cycle clock
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTransition {
    pub context: TransitionContext,
    pub started_ms: f64,
}

/// What changed during one [`CycleController::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleUpdate {
    /// The shape token advanced; targets must be recomputed
    pub shape_changed: bool,
    /// The phase flipped; targets must be (re)assigned with this enable flag
    pub reassign: Option<bool>,
    /// Left an assembled shape under the timer; a transition should start
    pub leaving_shape: bool,
    pub in_transition: bool,
    pub transition_ended: bool,
}

/// Timed roam / assemble state machine with transition bookkeeping
#[derive(Debug, Clone)]
pub struct CycleController {
    config: CycleConfig,
    shapes: ShapeSequence,
    mode: CycleMode,
    phase: Phase,
    previous_phase: Phase,
    clock_ms: f64,
    transition: Option<ActiveTransition>,
}

impl CycleController {
    pub fn new(config: CycleConfig, shapes: ShapeSequence) -> Self {
        Self {
            config,
            shapes,
            mode: CycleMode::Auto,
            phase: Phase::Roaming,
            previous_phase: Phase::Roaming,
            clock_ms: 0.0,
            transition: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> CycleMode {
        self.mode
    }

    pub fn shapes(&self) -> &ShapeSequence {
        &self.shapes
    }

    pub fn current_shape(&self) -> &str {
        self.shapes.current()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn transition(&self) -> Option<&TransitionContext> {
        self.transition.as_ref().map(|active| &active.context)
    }

    pub fn active_effect(&self) -> Option<TransitionEffect> {
        self.transition().map(TransitionContext::effect)
    }

    /// Particles seek their targets only while assembling with no effect running
    pub fn assembly_enabled(&self) -> bool {
        self.phase == Phase::Assembling && self.transition.is_none()
    }

    pub fn advance(&mut self, dt_ms: f64) -> CycleUpdate {
        let mut update = CycleUpdate::default();
        self.clock_ms += dt_ms.max(0.0);

        if self.mode == CycleMode::Auto {
            let t = self.clock_ms % self.config.cycle_ms;
            self.phase = if t > self.config.roam_ms {
                Phase::Assembling
            } else {
                Phase::Roaming
            };
        }

        if let Some(active) = &self.transition {
            if self.clock_ms - active.started_ms < self.config.transition_ms {
                update.in_transition = true;
            } else {
                log::debug!("transition {} finished", active.context.effect());
                self.transition = None;
                update.transition_ended = true;
            }
        }

        if self.phase != self.previous_phase {
            let entering = self.phase == Phase::Assembling;
            if entering && self.mode == CycleMode::Auto {
                self.shapes.advance();
                update.shape_changed = true;
                log::debug!(
                    "assembling '{}' (shape {} of {})",
                    self.shapes.current(),
                    self.shapes.index() + 1,
                    self.shapes.len()
                );
            }
            update.reassign = Some(entering && !update.in_transition);
            update.leaving_shape = !entering && self.mode == CycleMode::Auto;
            self.previous_phase = self.phase;
        }

        update
    }

    /// Start the effect for the shape being left: the forced one for the
    /// current token, otherwise a random pick that may be "none"
    pub fn start_transition<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        tuning: &TransitionTuning,
        rng: &mut R,
    ) -> Option<TransitionEffect> {
        let token = self.shapes.current().to_string();
        let forced = TransitionEffect::forced_for(&token).is_some();
        let effect = TransitionEffect::choose(&token, rng);
        let now = self.clock_ms;
        let duration = self.config.transition_ms;

        self.transition = effect.map(|effect| ActiveTransition {
            context: TransitionContext::create(effect, now, duration, width, height, tuning, rng),
            started_ms: now,
        });

        match effect {
            Some(effect) => log::debug!(
                "leaving '{}' with {} ({})",
                token,
                effect,
                if forced { "forced" } else { "random" }
            ),
            None => log::debug!("leaving '{}' without a transition", token),
        }
        effect
    }

    /// Manual step to the next (or previous) shape; assembles immediately
    pub fn step_shape(&mut self, forward: bool) {
        self.mode = CycleMode::Manual;
        self.transition = None;
        if forward {
            self.shapes.advance();
        } else {
            self.shapes.retreat();
        }
        self.phase = Phase::Assembling;
        self.previous_phase = Phase::Assembling;
        log::info!("manual shape '{}'", self.shapes.current());
    }

    /// Hand control back to the timer; the phase follows the clock from the next tick
    pub fn set_auto(&mut self) {
        if self.mode != CycleMode::Auto {
            log::info!("automatic cycling resumed");
        }
        self.mode = CycleMode::Auto;
    }
}
