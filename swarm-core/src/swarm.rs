use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::assign::assign_targets;
use crate::behavior::{self, SteeringEnv};
use crate::config::SwarmConfig;
use crate::cycle::{CycleController, CycleMode, Phase, ShapeSequence};
use crate::grid::NeighborGrid;
use crate::noise::FlowField;
use crate::particle::Particle;
use crate::shape::{Resolution, ShapeFrame, ShapeRasterizer};
use crate::slots::{SlotAllocator, TargetPoint};
use crate::transition::{TransitionContext, TransitionEffect};
use crate::Vector2D;

/// External commands the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetParticleCount(usize),
    Grow,
    Shrink,
    NextShape,
    PreviousShape,
    AutoCycle,
    ToggleDetail,
    Resize { width: f32, height: f32 },
}

/// Status readout for front ends
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSnapshot {
    pub phase: Phase,
    pub mode: CycleMode,
    pub shape: String,
    pub shape_index: usize,
    pub effect: Option<TransitionEffect>,
    pub particle_count: usize,
    pub target_count: usize,
    pub resolution: Resolution,
    pub tick: u64,
    pub clock_ms: f64,
}

/// The whole simulation: particles, shape targets and the cycle state, stepped
/// once per frame by a single driver
pub struct Swarm {
    config: SwarmConfig,
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    frame: ShapeFrame,
    resolution: Resolution,
    cycle: CycleController,
    slots: SlotAllocator,
    field: FlowField,
    rasterizer: Box<dyn ShapeRasterizer>,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Swarm {
    pub fn new<S>(
        config: SwarmConfig,
        width: f32,
        height: f32,
        count: usize,
        seed: u64,
        rasterizer: S,
    ) -> Self
    where
        S: ShapeRasterizer + 'static,
    {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = config.clamp_particle_count(count);
        let particles = (0..count)
            .map(|_| Particle::random(&mut rng, width, height, &config))
            .collect();

        let mut swarm = Self {
            config,
            particles,
            width,
            height,
            frame: ShapeFrame::for_canvas(
                width,
                height,
                config.shape_width_fraction,
                config.shape_aspect,
            ),
            resolution: Resolution::Standard,
            cycle: CycleController::new(config.cycle, ShapeSequence::show()),
            slots: SlotAllocator::new(),
            field: FlowField::new(seed),
            rasterizer: Box::new(rasterizer),
            rng,
            tick: 0,
        };
        swarm.recompute_targets();
        log::info!(
            "swarm of {} particles on {}x{} canvas (seed {})",
            count,
            width,
            height,
            seed
        );
        swarm
    }

    /// Replace the shape sequence; restarts the cycle from its first token
    pub fn with_shapes(mut self, shapes: ShapeSequence) -> Self {
        self.cycle = CycleController::new(self.config.cycle, shapes);
        self.recompute_targets();
        self
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn targets(&self) -> &[TargetPoint] {
        self.slots.targets()
    }

    pub fn cycle(&self) -> &CycleController {
        &self.cycle
    }

    pub fn shape_frame(&self) -> &ShapeFrame {
        &self.frame
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> SwarmSnapshot {
        SwarmSnapshot {
            phase: self.cycle.phase(),
            mode: self.cycle.mode(),
            shape: self.cycle.current_shape().to_string(),
            shape_index: self.cycle.shapes().index(),
            effect: self.cycle.active_effect(),
            particle_count: self.particles.len(),
            target_count: self.slots.targets().len(),
            resolution: self.resolution,
            tick: self.tick,
            clock_ms: self.cycle.clock_ms(),
        }
    }

    /// One frame: cycle bookkeeping, target redistribution, steering, integration
    pub fn step(&mut self, dt_ms: f64) {
        let update = self.cycle.advance(dt_ms);
        self.tick += 1;

        if update.shape_changed {
            self.recompute_targets();
        }
        if let Some(enable) = update.reassign {
            assign_targets(&mut self.particles, self.slots.targets(), enable, &mut self.rng);
        }
        if update.leaving_shape {
            let effect = self.cycle.start_transition(
                self.width,
                self.height,
                &self.config.transitions,
                &mut self.rng,
            );
            if effect == Some(TransitionEffect::Explosion) {
                self.explode();
            }
        }

        let in_transition = update.in_transition;
        let seek = self.cycle.phase() == Phase::Assembling && !in_transition;
        let transition = if in_transition {
            self.cycle.transition()
        } else {
            None
        };

        let separation = match transition {
            Some(TransitionContext::SchoolWide { .. }) => self.separation_forces(),
            _ => Vec::new(),
        };

        let env = SteeringEnv {
            field: &self.field,
            config: &self.config,
            frame: self.tick,
            now_ms: self.cycle.clock_ms(),
            center: self.frame.center,
            extent: self.width.max(self.height),
        };

        for (i, particle) in self.particles.iter_mut().enumerate() {
            if in_transition {
                let push = separation.get(i).copied().unwrap_or_default();
                particle.apply_transition(transition, &env, push);
            } else {
                particle.wander(&env);
            }
            particle.seek_target(seek, &self.config);
            particle.integrate();
            particle.wrap_bounds(self.width, self.height, self.config.edge_margin);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetParticleCount(count) => {
                self.set_particle_count(count);
            }
            Command::Grow => {
                self.grow();
            }
            Command::Shrink => {
                self.shrink();
            }
            Command::NextShape => self.step_shape(true),
            Command::PreviousShape => self.step_shape(false),
            Command::AutoCycle => self.cycle.set_auto(),
            Command::ToggleDetail => self.toggle_detail(),
            Command::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Grow by appending new random particles or shrink by dropping the tail;
    /// returns the clamped count
    pub fn set_particle_count(&mut self, count: usize) -> usize {
        let count = self.config.clamp_particle_count(count);
        let current = self.particles.len();
        if count == current {
            return count;
        }

        if count > current {
            for _ in current..count {
                let particle =
                    Particle::random(&mut self.rng, self.width, self.height, &self.config);
                self.particles.push(particle);
            }
        } else {
            self.particles.truncate(count);
        }
        log::info!("swarm size {} -> {}", current, count);

        self.refresh_targets();
        count
    }

    pub fn grow(&mut self) -> usize {
        self.set_particle_count(self.particles.len() + self.config.particle_step)
    }

    pub fn shrink(&mut self) -> usize {
        let count = self.particles.len().saturating_sub(self.config.particle_step);
        self.set_particle_count(count)
    }

    pub fn next_shape(&mut self) {
        self.step_shape(true);
    }

    pub fn previous_shape(&mut self) {
        self.step_shape(false);
    }

    pub fn set_auto_cycle(&mut self) {
        self.cycle.set_auto();
    }

    pub fn toggle_detail(&mut self) {
        self.resolution = self.resolution.toggled();
        log::info!("detail {:?}", self.resolution);
        self.refresh_targets();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.frame = ShapeFrame::for_canvas(
            self.width,
            self.height,
            self.config.shape_width_fraction,
            self.config.shape_aspect,
        );
        log::debug!("resized to {}x{}", self.width, self.height);
        self.refresh_targets();
    }

    fn step_shape(&mut self, forward: bool) {
        self.cycle.step_shape(forward);
        self.recompute_targets();
        assign_targets(&mut self.particles, self.slots.targets(), true, &mut self.rng);
    }

    fn recompute_targets(&mut self) {
        let (width, height) = self.resolution.dimensions();
        let token = self.cycle.current_shape();
        let mask = self.rasterizer.rasterize(token, width, height);
        self.slots.compute_targets(
            token,
            &mask,
            self.particles.len(),
            &self.frame,
            &mut self.rng,
        );
    }

    /// Recompute and reassign honoring the current phase and transition
    fn refresh_targets(&mut self) {
        self.recompute_targets();
        let enable = self.cycle.assembly_enabled();
        assign_targets(&mut self.particles, self.slots.targets(), enable, &mut self.rng);
    }

    fn explode(&mut self) {
        let center = self.frame.center;
        for particle in self.particles.iter_mut() {
            let velocity = behavior::explosion_velocity(
                particle,
                center,
                &self.config.transitions,
                &mut self.rng,
            );
            particle.velocity = velocity;
        }
    }

    /// Separation steering for every particle, read from the current positions
    fn separation_forces(&self) -> Vec<Vector2D> {
        let spacing = self.config.transitions.school_spacing;
        if self.config.use_neighbor_grid {
            let grid = NeighborGrid::build(self.particles.iter().map(|p| p.position), spacing);
            self.particles
                .iter()
                .map(|p| {
                    let neighbors = grid.candidates(p.position).map(|i| &self.particles[i]);
                    behavior::separation(p, neighbors, spacing)
                })
                .collect()
        } else {
            self.particles
                .iter()
                .map(|p| behavior::separation(p, self.particles.iter(), spacing))
                .collect()
        }
    }
}
