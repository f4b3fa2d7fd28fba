use core::fmt;

use rand::Rng;

use crate::config::TransitionTuning;
use crate::Vector2D;

/// Choreographed group motion played when the swarm leaves a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionEffect {
    Fireworks,
    School,
    SchoolWide,
    Explosion,
    Swan,
}

impl TransitionEffect {
    pub const ALL: [TransitionEffect; 5] = [
        TransitionEffect::Fireworks,
        TransitionEffect::School,
        TransitionEffect::SchoolWide,
        TransitionEffect::Explosion,
        TransitionEffect::Swan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransitionEffect::Fireworks => "fireworks",
            TransitionEffect::School => "school",
            TransitionEffect::SchoolWide => "schoolWide",
            TransitionEffect::Explosion => "explosion",
            TransitionEffect::Swan => "swan",
        }
    }

    /// Unknown names map to `None`, which means plain wandering
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }

    /// Fixed effect for shapes that always leave the same way
    pub fn forced_for(token: &str) -> Option<Self> {
        match token {
            "CASTLE" => Some(TransitionEffect::Fireworks),
            "MICKEY" => Some(TransitionEffect::School),
            "UNIVERSAL" => Some(TransitionEffect::SchoolWide),
            "EPIC" => Some(TransitionEffect::Explosion),
            "EOLA" => Some(TransitionEffect::Swan),
            _ => None,
        }
    }

    /// Forced effect if the token has one, otherwise a uniform pick that
    /// includes "no effect"
    pub fn choose<R: Rng>(token: &str, rng: &mut R) -> Option<Self> {
        if let Some(forced) = Self::forced_for(token) {
            return Some(forced);
        }
        let pick = rng.gen_range(0..=Self::ALL.len());
        Self::ALL.get(pick).copied()
    }
}

impl fmt::Display for TransitionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A firework burst center that fires at `start_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub center: Vector2D,
    pub start_ms: f64,
}

/// Effect-specific state, alive only while the effect runs
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionContext {
    Fireworks { bursts: Vec<Burst> },
    School { heading: Vector2D },
    SchoolWide { heading: Vector2D },
    Explosion,
    Swan,
}

impl TransitionContext {
    pub fn create<R: Rng>(
        effect: TransitionEffect,
        started_ms: f64,
        duration_ms: f64,
        width: f32,
        height: f32,
        tuning: &TransitionTuning,
        rng: &mut R,
    ) -> Self {
        match effect {
            TransitionEffect::Fireworks => {
                let count = tuning.firework_bursts.max(1);
                let stagger = duration_ms / count as f64;
                let bursts = (0..count)
                    .map(|i| Burst {
                        center: Vector2D::new(
                            rng.gen_range(width * 0.2..=width * 0.8),
                            rng.gen_range(height * 0.2..=height * 0.8),
                        ),
                        start_ms: started_ms + i as f64 * stagger,
                    })
                    .collect();
                TransitionContext::Fireworks { bursts }
            }
            TransitionEffect::School => TransitionContext::School {
                heading: random_heading(tuning.school_spread, rng),
            },
            TransitionEffect::SchoolWide => TransitionContext::SchoolWide {
                heading: random_heading(tuning.school_wide_spread, rng),
            },
            TransitionEffect::Explosion => TransitionContext::Explosion,
            TransitionEffect::Swan => TransitionContext::Swan,
        }
    }

    pub fn effect(&self) -> TransitionEffect {
        match self {
            TransitionContext::Fireworks { .. } => TransitionEffect::Fireworks,
            TransitionContext::School { .. } => TransitionEffect::School,
            TransitionContext::SchoolWide { .. } => TransitionEffect::SchoolWide,
            TransitionContext::Explosion => TransitionEffect::Explosion,
            TransitionContext::Swan => TransitionEffect::Swan,
        }
    }
}

fn random_heading<R: Rng>(spread: f32, rng: &mut R) -> Vector2D {
    Vector2D::from_angle(rng.gen_range(-spread..=spread))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_forced_effects_ignore_randomness() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(
                TransitionEffect::choose("CASTLE", &mut rng),
                Some(TransitionEffect::Fireworks)
            );
            assert_eq!(
                TransitionEffect::choose("EOLA", &mut rng),
                Some(TransitionEffect::Swan)
            );
        }
    }

    #[test]
    fn test_random_choice_covers_every_outcome() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut saw_none = false;
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            match TransitionEffect::choose("LOVE", &mut rng) {
                Some(effect) => {
                    seen.insert(effect);
                }
                None => saw_none = true,
            }
        }
        assert!(saw_none);
        assert_eq!(seen.len(), TransitionEffect::ALL.len());
    }

    #[test]
    fn test_names_round_trip_and_unknown_falls_back() {
        for effect in TransitionEffect::ALL {
            assert_eq!(TransitionEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(TransitionEffect::from_name("confetti"), None);
    }

    #[test]
    fn test_fireworks_bursts_are_staggered_inside_canvas() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let tuning = TransitionTuning::default();
        let context = TransitionContext::create(
            TransitionEffect::Fireworks,
            1_000.0,
            5_000.0,
            800.0,
            600.0,
            &tuning,
            &mut rng,
        );
        let TransitionContext::Fireworks { bursts } = context else {
            panic!("expected fireworks context");
        };
        assert_eq!(bursts.len(), 4);
        let starts: Vec<f64> = bursts.iter().map(|b| b.start_ms).collect();
        assert_eq!(starts, vec![1_000.0, 2_250.0, 3_500.0, 4_750.0]);
        for burst in &bursts {
            assert!(burst.center.x >= 160.0 && burst.center.x <= 640.0);
            assert!(burst.center.y >= 120.0 && burst.center.y <= 480.0);
        }
    }

    #[test]
    fn test_school_heading_within_spread() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let tuning = TransitionTuning::default();
        for _ in 0..50 {
            let context = TransitionContext::create(
                TransitionEffect::School,
                0.0,
                5_000.0,
                800.0,
                600.0,
                &tuning,
                &mut rng,
            );
            let TransitionContext::School { heading } = context else {
                panic!("expected school context");
            };
            assert!((heading.magnitude() - 1.0).abs() < 1e-4);
            assert!(heading.y.atan2(heading.x).abs() <= tuning.school_spread + 1e-4);
        }
    }
}
