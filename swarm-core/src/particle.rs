use rand::seq::SliceRandom;
use rand::Rng;

use crate::behavior::{self, SteeringEnv};
use crate::config::SwarmConfig;
use crate::slots::TargetPoint;
use crate::transition::TransitionContext;
use crate::Vector2D;

/// Discrete rainbow hues (red to violet) a particle picks its base hue from
pub const RAINBOW_HUES: [f32; 7] = [0.0, 30.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// A single steering agent
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub hue: f32,
    pub target: Option<Vector2D>,
    pub target_hue: Option<f32>,
    pub max_speed: f32,
    pub max_force: f32,
    pub target_force: f32,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D, hue: f32, config: &SwarmConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            hue,
            target: None,
            target_hue: None,
            max_speed: config.max_speed,
            max_force: config.max_force,
            target_force: config.target_force,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, width: f32, height: f32, config: &SwarmConfig) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..width.max(1.0)),
            rng.gen_range(0.0..height.max(1.0)),
        );
        let heading = rng.gen_range(0.0..core::f32::consts::TAU);
        let speed = rng.gen_range(config.min_initial_speed..=config.max_initial_speed);
        let hue = RAINBOW_HUES.choose(rng).copied().unwrap_or(0.0);
        Self::new(position, Vector2D::from_angle(heading) * speed, hue, config)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    pub fn set_target(&mut self, slot: Option<&TargetPoint>) {
        self.target = slot.map(|slot| slot.position);
        self.target_hue = slot.and_then(|slot| slot.hue);
    }

    /// Hue used for display: the slot override while assigned, else the base hue
    pub fn display_hue(&self) -> f32 {
        self.target_hue.unwrap_or(self.hue)
    }

    pub fn wander(&mut self, env: &SteeringEnv) {
        let force = behavior::wander(self, env);
        self.apply_force(force);
    }

    pub fn seek_target(&mut self, enabled: bool, config: &SwarmConfig) {
        if !enabled {
            return;
        }
        let force = behavior::seek_target(self, config);
        self.apply_force(force);
    }

    /// Forces for the active transition; `None` falls back to wandering.
    /// `separation` is only read by the wide school.
    pub fn apply_transition(
        &mut self,
        transition: Option<&TransitionContext>,
        env: &SteeringEnv,
        separation: Vector2D,
    ) {
        match transition {
            Some(TransitionContext::Fireworks { bursts }) => {
                let impulse =
                    behavior::fireworks(self, bursts, env.now_ms, &env.config.transitions);
                self.apply_force(impulse);
                self.wander(env);
            }
            Some(TransitionContext::School { heading }) => {
                let force = behavior::school(self, *heading, env.frame);
                self.apply_force(force);
            }
            Some(TransitionContext::SchoolWide { heading }) => {
                let force = behavior::school_wide(self, *heading, separation, env.frame);
                self.apply_force(force);
            }
            Some(TransitionContext::Swan) => {
                let force = behavior::swan(self, env.center, env.extent, env.frame);
                self.apply_force(force);
            }
            Some(TransitionContext::Explosion) | None => self.wander(env),
        }
    }

    /// Semi-implicit Euler step; clears the accumulated acceleration
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
    }

    /// Toroidal wrap once a particle is `margin` past an edge
    pub fn wrap_bounds(&mut self, width: f32, height: f32, margin: f32) {
        if self.position.x < -margin {
            self.position.x = width + margin;
        } else if self.position.x > width + margin {
            self.position.x = -margin;
        }

        if self.position.y < -margin {
            self.position.y = height + margin;
        } else if self.position.y > height + margin {
            self.position.y = -margin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FlowField;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn still_particle(x: f32, y: f32) -> Particle {
        Particle::new(
            Vector2D::new(x, y),
            Vector2D::zero(),
            120.0,
            &SwarmConfig::default(),
        )
    }

    #[test]
    fn test_particle_update() {
        let mut particle = Particle::new(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 1.0),
            0.0,
            &SwarmConfig::default(),
        );

        particle.integrate();

        assert_eq!(particle.position.x, 1.0);
        assert_eq!(particle.position.y, 1.0);
    }

    #[test]
    fn test_integrate_without_force_stays_still() {
        let mut particle = still_particle(42.0, 17.0);
        for _ in 0..100 {
            particle.integrate();
        }
        assert_eq!(particle.position, Vector2D::new(42.0, 17.0));
        assert_eq!(particle.velocity, Vector2D::zero());
    }

    #[test]
    fn test_integrate_caps_speed_and_resets_acceleration() {
        let mut particle = still_particle(0.0, 0.0);
        particle.apply_force(Vector2D::new(50.0, 0.0));
        particle.integrate();
        assert!((particle.velocity.magnitude() - particle.max_speed).abs() < 1e-6);
        assert_eq!(particle.acceleration, Vector2D::zero());
    }

    #[test]
    fn test_wrap_right_edge_preserves_velocity() {
        let mut particle = still_particle(841.0, 300.0);
        particle.velocity = Vector2D::new(1.5, -0.5);
        particle.wrap_bounds(800.0, 600.0, 40.0);
        assert_eq!(particle.position.x, -40.0);
        assert_eq!(particle.position.y, 300.0);
        assert_eq!(particle.velocity, Vector2D::new(1.5, -0.5));
    }

    #[test]
    fn test_wrap_top_and_left_edges() {
        let mut particle = still_particle(-41.0, -41.0);
        particle.wrap_bounds(800.0, 600.0, 40.0);
        assert_eq!(particle.position, Vector2D::new(840.0, 640.0));
    }

    #[test]
    fn test_inside_margin_does_not_wrap() {
        let mut particle = still_particle(830.0, -30.0);
        particle.wrap_bounds(800.0, 600.0, 40.0);
        assert_eq!(particle.position, Vector2D::new(830.0, -30.0));
    }

    #[test]
    fn test_set_target_carries_hue_override() {
        let mut particle = still_particle(0.0, 0.0);
        let slot = TargetPoint {
            position: Vector2D::new(5.0, 5.0),
            hue: Some(240.0),
        };
        particle.set_target(Some(&slot));
        assert_eq!(particle.target, Some(Vector2D::new(5.0, 5.0)));
        assert_eq!(particle.display_hue(), 240.0);

        particle.set_target(None);
        assert_eq!(particle.target, None);
        assert_eq!(particle.display_hue(), 120.0);
    }

    #[test]
    fn test_seek_disabled_applies_nothing() {
        let mut particle = still_particle(0.0, 0.0);
        particle.target = Some(Vector2D::new(300.0, 0.0));
        particle.seek_target(false, &SwarmConfig::default());
        assert_eq!(particle.acceleration, Vector2D::zero());
        particle.seek_target(true, &SwarmConfig::default());
        assert!(particle.acceleration.x > 0.0);
    }

    #[test]
    fn test_missing_transition_falls_back_to_wander() {
        let field = FlowField::new(4);
        let config = SwarmConfig::default();
        let env = SteeringEnv {
            field: &field,
            config: &config,
            frame: 3,
            now_ms: 0.0,
            center: Vector2D::new(400.0, 300.0),
            extent: 800.0,
        };

        let mut wandering = still_particle(10.0, 20.0);
        wandering.wander(&env);
        let mut fallback = still_particle(10.0, 20.0);
        fallback.apply_transition(None, &env, Vector2D::zero());
        assert_eq!(wandering.acceleration, fallback.acceleration);

        let mut exploding = still_particle(10.0, 20.0);
        exploding.apply_transition(Some(&TransitionContext::Explosion), &env, Vector2D::zero());
        assert_eq!(wandering.acceleration, exploding.acceleration);
    }

    #[test]
    fn test_random_particle_inside_canvas() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = SwarmConfig::default();
        for _ in 0..100 {
            let particle = Particle::random(&mut rng, 320.0, 240.0, &config);
            assert!(particle.position.x >= 0.0 && particle.position.x < 320.0);
            assert!(particle.position.y >= 0.0 && particle.position.y < 240.0);
            let speed = particle.velocity.magnitude();
            assert!(speed >= 0.4 - 1e-4 && speed <= 1.2 + 1e-4);
            assert!(RAINBOW_HUES.contains(&particle.hue));
        }
    }
}
