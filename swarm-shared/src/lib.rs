use serde::{Deserialize, Serialize};

/// Canvas position of a drawn particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// External command accepted by every front end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwarmCommand {
    SetParticleCount { count: usize },
    Grow,
    Shrink,
    NextShape,
    PreviousShape,
    /// Resume timed cycling; front ends also reset the scheme override
    AutoCycle,
    ToggleDetail,
    Resize { width: f32, height: f32 },
    /// Colour scheme override: auto, midnight, dawn, noon, dusk or camo
    SetScheme { scheme: String },
    /// Show or hide the status readout
    ToggleStatus,
}

/// A command to apply before the given tick is stepped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: SwarmCommand,
}

/// Status readout shown by front ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwarmStatus {
    pub phase: String,
    pub mode: String,
    pub shape: String,
    pub effect: Option<String>,
    pub particle_count: usize,
    pub target_count: usize,
    pub high_detail: bool,
    pub scheme: String,
    pub tick: u64,
    pub clock_ms: f64,
}

/// File-level simulation settings; missing fields take their defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SwarmSettings {
    pub particle_count: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub target_force: f32,
    pub capture_radius: f32,
    pub slowdown_radius: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub edge_margin: f32,
    pub cycle_ms: f64,
    pub roam_ms: f64,
    pub transition_ms: f64,
    pub use_neighbor_grid: bool,
    pub high_detail: bool,
    /// Replaces the show sequence when non-empty
    pub shapes: Vec<String>,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            particle_count: 250,
            max_speed: 2.0,
            max_force: 0.04,
            target_force: 0.07,
            capture_radius: 3.0,
            slowdown_radius: 80.0,
            noise_scale: 0.0008,
            noise_speed: 0.0005,
            edge_margin: 40.0,
            cycle_ms: 30_000.0,
            roam_ms: 10_000.0,
            transition_ms: 5_000.0,
            use_neighbor_grid: true,
            high_detail: false,
            shapes: Vec::new(),
        }
    }
}

/// One particle as drawn: position plus its final HSB display colour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParticleFrame {
    pub position: Position,
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub speed: f32,
}

/// Every particle at one tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: String,
    pub shape: String,
    pub effect: Option<String>,
    pub particles: Vec<ParticleFrame>,
}
