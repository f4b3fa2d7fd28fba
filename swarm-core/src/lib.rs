//! Particle swarm engine: free roaming, shape assembly and choreographed
//! transitions between shapes.
//!
//! The [`Swarm`] owns every piece of mutable state and is stepped once per
//! rendered frame. Shape silhouettes come in through the [`ShapeRasterizer`]
//! capability and display colors go out through [`PaletteProvider`].

pub mod assign;
pub mod behavior;
pub mod config;
pub mod cycle;
pub mod grid;
pub mod noise;
pub mod palette;
pub mod particle;
pub mod shape;
pub mod slots;
pub mod swarm;
pub mod transition;

pub use assign::assign_targets;
pub use config::{CycleConfig, SwarmConfig, TransitionTuning};
pub use cycle::{CycleController, CycleMode, CycleUpdate, Phase, ShapeSequence};
pub use noise::FlowField;
pub use palette::{Hsb, PaletteContext, PaletteProvider, SchemeOverride, ShowPalette};
pub use particle::Particle;
pub use shape::{Mask, Resolution, ShapeFrame, ShapeRasterizer};
pub use slots::{SlotAllocator, TargetPoint};
pub use swarm::{Command, Swarm, SwarmSnapshot};
pub use transition::{TransitionContext, TransitionEffect};

/// A 2D vector used for position, velocity and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle` (radians, clockwise in screen space)
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            let normalized = self.normalize();
            Self {
                x: normalized.x * max,
                y: normalized.y * max,
            }
        } else {
            *self
        }
    }

    pub fn with_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    /// Rotated a quarter turn; `(x, y)` becomes `(-y, x)`
    pub fn perpendicular(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Linear remap of `value` from `[start1, stop1]` onto `[start2, stop2]`, unclamped
pub(crate) fn remap(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}
