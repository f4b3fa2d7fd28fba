//! Steering forces. Every function returns a force and leaves the particle
//! untouched; [`Particle`] decides which ones to apply.

use core::f32::consts::TAU;

use rand::Rng;

use crate::config::{SwarmConfig, TransitionTuning};
use crate::noise::FlowField;
use crate::particle::Particle;
use crate::transition::Burst;
use crate::{remap, Vector2D};

/// Per-tick inputs shared by every particle
#[derive(Debug, Clone, Copy)]
pub struct SteeringEnv<'a> {
    pub field: &'a FlowField,
    pub config: &'a SwarmConfig,
    pub frame: u64,
    pub now_ms: f64,
    /// Center of the shape frame
    pub center: Vector2D,
    /// Larger canvas dimension
    pub extent: f32,
}

/// Steer toward a heading read from the flow field at the particle position
pub fn wander(particle: &Particle, env: &SteeringEnv) -> Vector2D {
    let config = env.config;
    let angle = env.field.sample(
        particle.position.x * config.noise_scale,
        particle.position.y * config.noise_scale,
        env.frame as f32 * config.noise_speed,
    ) * TAU
        * 2.0;
    let desired = Vector2D::from_angle(angle) * particle.max_speed;
    (desired - particle.velocity).limit(particle.max_force)
}

/// Arrival steering toward the particle's target, zero once captured
pub fn seek_target(particle: &Particle, config: &SwarmConfig) -> Vector2D {
    let Some(target) = particle.target else {
        return Vector2D::zero();
    };

    let offset = target - particle.position;
    let distance = offset.magnitude();
    if distance < config.capture_radius {
        return Vector2D::zero();
    }

    let cruise = particle.max_speed * 0.9;
    let speed = if distance < config.slowdown_radius {
        remap(
            distance,
            0.0,
            config.slowdown_radius,
            particle.max_speed * 0.2,
            cruise,
        )
    } else {
        cruise
    };

    let desired = offset.with_magnitude(speed);
    (desired - particle.velocity).limit(particle.target_force)
}

/// Outward impulses from every burst that is currently firing
pub fn fireworks(
    particle: &Particle,
    bursts: &[Burst],
    now_ms: f64,
    tuning: &TransitionTuning,
) -> Vector2D {
    let mut impulse = Vector2D::zero();

    for burst in bursts {
        let since = now_ms - burst.start_ms;
        if since < 0.0 || since > tuning.burst_window_ms {
            continue;
        }
        let away = particle.position - burst.center;
        let distance = away.magnitude();
        if distance < tuning.burst_radius && distance > 2.0 {
            let falloff = 1.0 - distance / tuning.burst_radius;
            impulse += away.normalize() * (tuning.burst_impulse * falloff);
        }
    }

    impulse
}

/// Tight school: strong alignment to one heading plus a lateral wobble
pub fn school(particle: &Particle, heading: Vector2D, frame: u64) -> Vector2D {
    let desired = heading * (particle.max_speed * 0.9);
    let steer = (desired - particle.velocity).limit(particle.max_force * 1.6);
    let wobble = (frame as f32 * 0.06 + particle.position.x * 0.01).sin() * 0.06;
    steer + Vector2D::new(0.0, wobble)
}

/// Wide school: alignment, precomputed separation steering and a softer wobble
pub fn school_wide(
    particle: &Particle,
    heading: Vector2D,
    separation: Vector2D,
    frame: u64,
) -> Vector2D {
    let desired = heading * (particle.max_speed * 0.9);
    let align = (desired - particle.velocity).limit(particle.max_force * 1.3);
    let wobble = (frame as f32 * 0.04 + particle.position.y * 0.008).sin() * 0.05;
    align + separation + Vector2D::new(0.0, wobble)
}

/// Steering away from every neighbor closer than `spacing`
pub fn separation<'a, I>(particle: &Particle, others: I, spacing: f32) -> Vector2D
where
    I: Iterator<Item = &'a Particle>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = particle.position.distance(&other.position);
        if distance > 0.0 && distance < spacing {
            let diff = (particle.position - other.position).normalize() / distance;
            steering += diff;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }

    steering = steering / count as f32;
    if steering.magnitude() > 0.0 {
        steering = steering.with_magnitude(particle.max_speed);
        steering = steering - particle.velocity;
        steering = steering.limit(particle.max_force * 1.9);
    }

    steering
}

/// Tangential orbit around `center`, held in by a weak centripetal pull
pub fn swan(particle: &Particle, center: Vector2D, extent: f32, frame: u64) -> Vector2D {
    let to_center = center - particle.position;
    let distance = to_center.magnitude();
    if distance <= 0.0 {
        return Vector2D::zero();
    }

    let orbit = to_center.perpendicular().normalize() * (particle.max_speed * 0.6);
    let steer_orbit = (orbit - particle.velocity).limit(particle.max_force * 1.5);

    let strength = remap(distance, 0.0, extent.max(1.0), 0.06, 0.02);
    let pull = to_center.normalize() * strength;

    let bob = (frame as f32 * 0.05 + particle.position.x * 0.01).sin() * 0.03;
    steer_orbit + pull + Vector2D::new(0.0, bob)
}

/// Radial kick away from `center` used when an explosion starts
pub fn explosion_velocity<R: Rng>(
    particle: &Particle,
    center: Vector2D,
    tuning: &TransitionTuning,
    rng: &mut R,
) -> Vector2D {
    let mut direction = particle.position - center;
    if direction.magnitude() < 10.0 {
        direction = Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
    }
    let speed = rng.gen_range(tuning.explosion_min_speed..=tuning.explosion_max_speed);
    direction.normalize() * speed
}
