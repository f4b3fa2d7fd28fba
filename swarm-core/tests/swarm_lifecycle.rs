use swarm_core::{
    Command, CycleMode, Mask, Phase, ShapeSequence, Swarm, SwarmConfig, SwarmSnapshot,
    TransitionEffect,
};

const FRAME_MS: f64 = 16.0;

/// Rasterizer that fills the middle of the canvas for every token
fn slab(_token: &str, width: usize, height: usize) -> Mask {
    let mut mask = Mask::new(width, height);
    for y in height / 3..height * 2 / 3 {
        for x in width / 5..width * 4 / 5 {
            mask.set(x, y, true);
        }
    }
    mask
}

fn swarm_with(shapes: &[&str], count: usize, seed: u64) -> Swarm {
    let tokens = shapes.iter().map(|s| s.to_string()).collect();
    Swarm::new(SwarmConfig::default(), 800.0, 600.0, count, seed, slab)
        .with_shapes(ShapeSequence::new(tokens))
}

/// Step until the predicate holds; gives up after `limit_ms` of simulated time
fn run_until(
    swarm: &mut Swarm,
    limit_ms: f64,
    mut done: impl FnMut(&SwarmSnapshot) -> bool,
) -> Option<SwarmSnapshot> {
    let mut elapsed = 0.0;
    while elapsed < limit_ms {
        swarm.step(FRAME_MS);
        elapsed += FRAME_MS;
        let snapshot = swarm.snapshot();
        if done(&snapshot) {
            return Some(snapshot);
        }
    }
    None
}

fn mean_distance_to_target(swarm: &Swarm) -> f32 {
    let particles = swarm.particles();
    let total: f32 = particles
        .iter()
        .filter_map(|p| p.target.map(|t| p.position.distance(&t)))
        .sum();
    total / particles.len() as f32
}

fn mean_nearest_neighbor(swarm: &Swarm) -> f32 {
    let particles = swarm.particles();
    let total: f32 = particles
        .iter()
        .enumerate()
        .map(|(i, p)| {
            particles
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, q)| p.position.distance(&q.position))
                .fold(f32::MAX, f32::min)
        })
        .sum();
    total / particles.len() as f32
}

#[test]
fn test_auto_cycle_roams_then_assembles_next_shape() {
    let mut swarm = swarm_with(&["ONE", "TWO", "THREE"], 250, 1);
    let start = swarm.snapshot();
    assert_eq!(start.phase, Phase::Roaming);
    assert_eq!(start.shape, "ONE");

    let assembling = run_until(&mut swarm, 12_000.0, |s| s.phase == Phase::Assembling)
        .expect("assembly never started");
    assert_eq!(assembling.shape, "TWO");
    assert!(assembling.clock_ms > 10_000.0);
    assert!(swarm.particles().iter().all(|p| p.target.is_some()));
}

#[test]
fn test_castle_always_leaves_with_fireworks() {
    for seed in 0..4 {
        let mut swarm = swarm_with(&["EYE", "CASTLE"], 150, seed);
        run_until(&mut swarm, 12_000.0, |s| s.shape == "CASTLE").expect("castle never assembled");

        let leaving = run_until(&mut swarm, 25_000.0, |s| s.phase == Phase::Roaming)
            .expect("never left the castle");
        assert_eq!(leaving.effect, Some(TransitionEffect::Fireworks));
        assert!(swarm.particles().iter().all(|p| p.target.is_none()));
    }
}

#[test]
fn test_universal_school_spreads_crowded_particles() {
    let mut swarm = swarm_with(&["EYE", "UNIVERSAL"], 1000, 12);
    run_until(&mut swarm, 12_000.0, |s| s.shape == "UNIVERSAL").expect("universal never assembled");
    let leaving = run_until(&mut swarm, 25_000.0, |s| s.phase == Phase::Roaming)
        .expect("never left universal");
    assert_eq!(leaving.effect, Some(TransitionEffect::SchoolWide));
    let packed = mean_nearest_neighbor(&swarm);

    for _ in 0..60 {
        swarm.step(FRAME_MS);
    }
    assert_eq!(swarm.snapshot().effect, Some(TransitionEffect::SchoolWide));
    let spread = mean_nearest_neighbor(&swarm);
    assert!(spread > packed, "packed {} spread {}", packed, spread);
}

#[test]
fn test_mickey_leaves_as_a_tight_school() {
    let mut swarm = swarm_with(&["EYE", "MICKEY"], 200, 13);
    run_until(&mut swarm, 12_000.0, |s| s.shape == "MICKEY").expect("mickey never assembled");
    let leaving = run_until(&mut swarm, 25_000.0, |s| s.phase == Phase::Roaming)
        .expect("never left mickey");
    assert_eq!(leaving.effect, Some(TransitionEffect::School));

    for _ in 0..90 {
        swarm.step(FRAME_MS);
    }
    // Everyone has turned onto the shared heading
    let particles = swarm.particles();
    let mean = particles
        .iter()
        .fold(swarm_core::Vector2D::zero(), |acc, p| acc + p.velocity.normalize())
        / particles.len() as f32;
    assert!(mean.magnitude() > 0.9, "alignment {}", mean.magnitude());
}

#[test]
fn test_transition_ends_after_its_duration() {
    let mut swarm = swarm_with(&["EYE", "EOLA"], 150, 9);
    run_until(&mut swarm, 40_000.0, |s| s.effect == Some(TransitionEffect::Swan))
        .expect("swan never started");
    let started = swarm.snapshot().clock_ms;

    let ended = run_until(&mut swarm, 6_000.0, |s| s.effect.is_none()).expect("swan never ended");
    let lasted = ended.clock_ms - started;
    assert!((5_000.0..5_100.0).contains(&lasted), "lasted {}", lasted);
}

#[test]
fn test_next_shape_assembles_immediately() {
    let mut swarm = swarm_with(&["ONE", "TWO"], 300, 4);
    swarm.apply(Command::NextShape);

    let snapshot = swarm.snapshot();
    assert_eq!(snapshot.mode, CycleMode::Manual);
    assert_eq!(snapshot.phase, Phase::Assembling);
    assert_eq!(snapshot.shape, "TWO");
    assert_eq!(snapshot.target_count, 300);
    assert_eq!(snapshot.clock_ms, 0.0);
}

#[test]
fn test_manual_mode_ignores_timer() {
    let mut swarm = swarm_with(&["ONE", "TWO", "THREE"], 120, 4);
    swarm.apply(Command::NextShape);
    run_until(&mut swarm, 35_000.0, |_| false);

    let snapshot = swarm.snapshot();
    assert_eq!(snapshot.phase, Phase::Assembling);
    assert_eq!(snapshot.shape, "TWO");
    assert_eq!(snapshot.effect, None);
}

#[test]
fn test_resume_auto_follows_clock() {
    let mut swarm = swarm_with(&["ONE", "TWO", "THREE"], 120, 4);
    swarm.apply(Command::PreviousShape);
    assert_eq!(swarm.snapshot().shape, "THREE");

    swarm.apply(Command::AutoCycle);
    swarm.step(FRAME_MS);
    let snapshot = swarm.snapshot();
    assert_eq!(snapshot.mode, CycleMode::Auto);
    assert_eq!(snapshot.phase, Phase::Roaming);
}

#[test]
fn test_assembling_particles_converge_on_targets() {
    let mut swarm = swarm_with(&["ONE", "TWO"], 200, 21);
    swarm.next_shape();
    let before = mean_distance_to_target(&swarm);

    run_until(&mut swarm, 20_000.0, |_| false);
    let after = mean_distance_to_target(&swarm);
    assert!(after < before * 0.3, "before {} after {}", before, after);
}

#[test]
fn test_particles_stay_within_wrap_margin() {
    let mut swarm = swarm_with(&["ONE"], 400, 2);
    let margin = swarm.config().edge_margin;
    for _ in 0..2_000 {
        swarm.step(FRAME_MS);
        for p in swarm.particles() {
            assert!(p.position.x >= -margin - 2.5 && p.position.x <= 800.0 + margin + 2.5);
            assert!(p.position.y >= -margin - 2.5 && p.position.y <= 600.0 + margin + 2.5);
        }
    }
}

#[test]
fn test_shrink_keeps_leading_particles() {
    let mut swarm = swarm_with(&["ONE"], 300, 8);
    for _ in 0..30 {
        swarm.step(FRAME_MS);
    }
    let head: Vec<_> = swarm.particles()[..200].to_vec();

    swarm.apply(Command::SetParticleCount(200));
    assert_eq!(swarm.particles().len(), 200);
    for (kept, before) in swarm.particles().iter().zip(head.iter()) {
        assert_eq!(kept.position, before.position);
        assert_eq!(kept.velocity, before.velocity);
    }
}

#[test]
fn test_tiny_shape_caps_targets_at_pixel_count() {
    let square = |_: &str, width: usize, height: usize| {
        let mut mask = Mask::new(width, height);
        for y in 0..10 {
            for x in 0..10 {
                mask.set(x, y, true);
            }
        }
        mask
    };
    let mut swarm = Swarm::new(SwarmConfig::default(), 800.0, 600.0, 250, 5, square)
        .with_shapes(ShapeSequence::new(vec!["A".into(), "B".into()]));
    swarm.next_shape();

    assert_eq!(swarm.targets().len(), 100);
    assert!(swarm.particles().iter().all(|p| p.target.is_some()));
}

#[test]
fn test_resize_during_assembly_moves_targets() {
    let mut swarm = swarm_with(&["ONE", "TWO"], 200, 6);
    swarm.next_shape();
    let before: Vec<_> = swarm.targets().iter().map(|t| t.position).collect();

    swarm.apply(Command::Resize {
        width: 400.0,
        height: 300.0,
    });
    assert_eq!(swarm.targets().len(), 200);
    assert!(swarm.targets().iter().all(|t| t.position.x <= 400.0));
    assert_ne!(before, swarm.targets().iter().map(|t| t.position).collect::<Vec<_>>());
}
