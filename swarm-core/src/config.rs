/// Configuration for the particle simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmConfig {
    pub max_speed: f32,
    pub max_force: f32,
    /// Steering cap while seeking a shape target; higher than `max_force`
    pub target_force: f32,
    pub min_initial_speed: f32,
    pub max_initial_speed: f32,
    pub capture_radius: f32,
    pub slowdown_radius: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub edge_margin: f32,
    pub min_particles: usize,
    pub max_particles: usize,
    pub default_particles: usize,
    pub particle_step: usize,
    /// Fraction of the smaller canvas dimension used for the shape width
    pub shape_width_fraction: f32,
    /// Shape frame height relative to its width
    pub shape_aspect: f32,
    pub use_neighbor_grid: bool,
    pub cycle: CycleConfig,
    pub transitions: TransitionTuning,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.04,
            target_force: 0.07,
            min_initial_speed: 0.4,
            max_initial_speed: 1.2,
            capture_radius: 3.0,
            slowdown_radius: 80.0,
            noise_scale: 0.0008,
            noise_speed: 0.0005,
            edge_margin: 40.0,
            min_particles: 100,
            max_particles: 2500,
            default_particles: 250,
            particle_step: 100,
            shape_width_fraction: 0.95,
            shape_aspect: 0.55,
            use_neighbor_grid: true,
            cycle: CycleConfig::default(),
            transitions: TransitionTuning::default(),
        }
    }
}

impl SwarmConfig {
    pub fn clamp_particle_count(&self, count: usize) -> usize {
        count.clamp(self.min_particles, self.max_particles)
    }
}

/// Timing of the roam / assemble cycle, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleConfig {
    pub cycle_ms: f64,
    pub roam_ms: f64,
    pub transition_ms: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cycle_ms: 30_000.0,
            roam_ms: 10_000.0,
            transition_ms: 5_000.0,
        }
    }
}

/// Constants for the transition effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTuning {
    pub firework_bursts: usize,
    pub burst_window_ms: f64,
    pub burst_radius: f32,
    pub burst_impulse: f32,
    pub school_spread: f32,
    pub school_wide_spread: f32,
    pub school_spacing: f32,
    pub explosion_min_speed: f32,
    pub explosion_max_speed: f32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            firework_bursts: 4,
            burst_window_ms: 900.0,
            burst_radius: 130.0,
            burst_impulse: 0.28,
            school_spread: core::f32::consts::FRAC_PI_6,
            school_wide_spread: core::f32::consts::FRAC_PI_4,
            school_spacing: 40.0,
            explosion_min_speed: 4.0,
            explosion_max_speed: 7.0,
        }
    }
}
