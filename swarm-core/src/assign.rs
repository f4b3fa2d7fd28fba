use rand::seq::SliceRandom;
use rand::Rng;

use crate::particle::Particle;
use crate::slots::TargetPoint;

/// Hand every particle a slot of the current shape, or clear all targets.
///
/// Slots are visited through a shuffled permutation so creation order does not
/// correlate with shape position; particle `i` takes `permutation[i % len]`, so
/// every particle gets a slot even when particles outnumber slots. With no slots
/// the targets are cleared and the swarm keeps roaming.
pub fn assign_targets<R: Rng>(
    particles: &mut [Particle],
    targets: &[TargetPoint],
    enable: bool,
    rng: &mut R,
) {
    if !enable || targets.is_empty() {
        for particle in particles.iter_mut() {
            particle.set_target(None);
        }
        return;
    }

    let mut permutation: Vec<usize> = (0..targets.len()).collect();
    permutation.shuffle(rng);

    for (i, particle) in particles.iter_mut().enumerate() {
        let slot = &targets[permutation[i % permutation.len()]];
        particle.set_target(Some(slot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwarmConfig;
    use crate::Vector2D;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn swarm(count: usize) -> Vec<Particle> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        (0..count)
            .map(|_| Particle::random(&mut rng, 800.0, 600.0, &SwarmConfig::default()))
            .collect()
    }

    fn slots(count: usize) -> Vec<TargetPoint> {
        (0..count)
            .map(|i| TargetPoint {
                position: Vector2D::new(i as f32, 0.0),
                hue: None,
            })
            .collect()
    }

    #[test]
    fn test_every_particle_gets_a_target_with_wraparound_coverage() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for count in [100, 137, 250, 1000, 2500] {
            let mut particles = swarm(count);
            let targets = slots(73);
            assign_targets(&mut particles, &targets, true, &mut rng);

            assert!(particles.iter().all(|p| p.target.is_some()));

            let mut uses = vec![0usize; targets.len()];
            for particle in &particles {
                let index = particle.target.map(|t| t.x as usize).unwrap();
                uses[index] += 1;
            }
            let floor = count / targets.len();
            assert!(uses.iter().all(|&u| u >= floor), "count {}", count);
        }
    }

    #[test]
    fn test_disable_clears_targets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut particles = swarm(120);
        assign_targets(&mut particles, &slots(40), true, &mut rng);
        assign_targets(&mut particles, &slots(40), false, &mut rng);
        assert!(particles.iter().all(|p| p.target.is_none() && p.target_hue.is_none()));
    }

    #[test]
    fn test_empty_target_set_leaves_swarm_roaming() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut particles = swarm(120);
        assign_targets(&mut particles, &slots(40), true, &mut rng);
        assign_targets(&mut particles, &[], true, &mut rng);
        assert!(particles.iter().all(|p| p.target.is_none()));
    }

    #[test]
    fn test_assignment_is_shuffled() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut particles = swarm(200);
        assign_targets(&mut particles, &slots(200), true, &mut rng);
        let in_order = particles
            .iter()
            .enumerate()
            .filter(|(i, p)| p.target.map(|t| t.x as usize) == Some(*i))
            .count();
        assert!(in_order < 20);
    }

    #[test]
    fn test_hue_override_follows_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut particles = swarm(100);
        let targets = vec![TargetPoint {
            position: Vector2D::new(1.0, 1.0),
            hue: Some(60.0),
        }];
        assign_targets(&mut particles, &targets, true, &mut rng);
        assert!(particles.iter().all(|p| p.target_hue == Some(60.0)));
    }
}
