//! End-to-end simulation scenarios

use bubble_drift::config::{CollisionConfig, SimConfig, SpeedRange};
use bubble_drift::renderer::MeshBuilder;
use bubble_drift::sim::{Bubble, SimState, TickReport, Trace, Viewport, tick};
use bubble_drift::{Driver, FrameOutcome};
use glam::Vec2;

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

fn state_with(bubbles: Vec<Bubble>, damping: f32) -> SimState {
    let config = SimConfig {
        speed: SpeedRange::new(5.0, 10.0),
        radius: 80.0,
        collision: CollisionConfig {
            force: 0.3,
            damping,
        },
        entity_count: bubbles.len(),
        seed: Some(1),
    };
    SimState::with_bubbles(config, bubbles, 1)
}

#[test]
fn bubble_past_left_wall_is_clamped_and_reflected() {
    for damping in [1.0, 0.8] {
        let mut state = state_with(
            vec![Bubble::new(0, Vec2::new(75.0, 100.0), Vec2::new(-6.0, 0.0), 80.0)],
            damping,
        );

        tick(&mut state, VIEWPORT);

        let b = &state.bubbles[0];
        assert_eq!(b.pos.x, 80.0);
        assert_eq!(b.pos.y, 100.0);
        assert!((b.vel.x - 6.0 * damping).abs() < 1e-6);
        assert_eq!(b.vel.y, 0.0);
    }
}

#[test]
fn overlapping_pair_gets_equal_and_opposite_impulses() {
    let mut state = state_with(
        vec![
            Bubble::new(0, Vec2::new(100.0, 100.0), Vec2::new(6.0, 0.0), 80.0),
            Bubble::new(1, Vec2::new(150.0, 100.0), Vec2::new(-6.0, 0.0), 80.0),
        ],
        1.0,
    );

    let report = tick(&mut state, VIEWPORT);

    let (a, b) = (&state.bubbles[0], &state.bubbles[1]);
    // Each side pushes once: 6 - 0.3 - 0.3
    assert!((a.vel.x - 5.4).abs() < 1e-4, "a.vel = {:?}", a.vel);
    assert!((b.vel.x - -5.4).abs() < 1e-4, "b.vel = {:?}", b.vel);
    assert!((a.vel + b.vel).length() < 1e-4);
    assert!(a.vel.y.abs() < 1e-4 && b.vel.y.abs() < 1e-4);
    for bubble in [a, b] {
        let s = bubble.speed();
        assert!((5.0..=10.0).contains(&s), "speed = {}", s);
    }
    assert_eq!(report.contacts, 2);
}

#[test]
fn distant_bubbles_only_drift() {
    let mut state = state_with(
        vec![
            Bubble::new(0, Vec2::new(200.0, 200.0), Vec2::new(5.0, 5.0), 80.0),
            Bubble::new(1, Vec2::new(600.0, 400.0), Vec2::new(-5.0, -5.0), 80.0),
        ],
        1.0,
    );

    let report = tick(&mut state, VIEWPORT);

    assert_eq!(report.contacts, 0);
    assert_eq!(state.bubbles[0].pos, Vec2::new(205.0, 205.0));
    assert_eq!(state.bubbles[0].vel, Vec2::new(5.0, 5.0));
    assert_eq!(state.bubbles[1].pos, Vec2::new(595.0, 395.0));
    assert_eq!(state.bubbles[1].vel, Vec2::new(-5.0, -5.0));
}

/// Two bubbles closing head-on plus one bouncing off the top edge, with
/// positions and velocities worked out by hand. No speed ever hits zero, so
/// the RNG is never consulted and the trajectory depends only on the step.
const GOLDEN_PAIR: &[(u64, u32, [f32; 2], [f32; 2])] = &[
    (0, 0, [100.0, 150.0], [6.0, 0.0]),
    (0, 1, [300.0, 150.0], [-6.0, 0.0]),
    (0, 2, [700.0, 70.0], [0.0, -6.0]),
    (3, 2, [700.0, 52.0], [0.0, -6.0]),
    (4, 2, [700.0, 50.0], [0.0, 6.0]),
    (8, 0, [148.0, 150.0], [6.0, 0.0]),
    (8, 1, [252.0, 150.0], [-6.0, 0.0]),
    // First contact: each side pushes once
    (9, 0, [154.0, 150.0], [5.4, 0.0]),
    (9, 1, [246.3, 150.0], [-5.4, 0.0]),
    // Second push drops both to 4.8, boosted back to the minimum
    (10, 0, [159.4, 150.0], [5.0, 0.0]),
    (10, 1, [241.2, 150.0], [-5.0, 0.0]),
    (11, 0, [164.4, 150.0], [5.0, 0.0]),
    (11, 1, [236.2, 150.0], [-5.0, 0.0]),
    (11, 2, [700.0, 92.0], [0.0, 6.0]),
];

#[test]
fn golden_pair_trajectory() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = SimConfig {
        radius: 50.0,
        ..Default::default()
    };
    let bubbles = vec![
        Bubble::new(0, Vec2::new(100.0, 150.0), Vec2::new(6.0, 0.0), 50.0),
        Bubble::new(1, Vec2::new(300.0, 150.0), Vec2::new(-6.0, 0.0), 50.0),
        Bubble::new(2, Vec2::new(700.0, 70.0), Vec2::new(0.0, -6.0), 50.0),
    ];
    let mut state = SimState::with_bubbles(config, bubbles, 20240601);

    let trace = Trace::capture(&mut state, viewport, 11);

    assert_eq!(trace.len(), 12);
    for &(tick, id, pos, vel) in GOLDEN_PAIR {
        let b = &trace.frames[tick as usize].bubbles[id as usize];
        assert_eq!(b.id, id);
        assert!(
            (b.pos - Vec2::from(pos)).length() < 1e-3,
            "tick {} bubble {} pos {:?}, expected {:?}",
            tick,
            id,
            b.pos,
            pos
        );
        assert!(
            (b.vel - Vec2::from(vel)).length() < 1e-3,
            "tick {} bubble {} vel {:?}, expected {:?}",
            tick,
            id,
            b.vel,
            vel
        );
    }
}

#[test]
fn golden_pair_reports() {
    let viewport = Viewport::new(800.0, 400.0);
    let bubbles = vec![
        Bubble::new(0, Vec2::new(100.0, 150.0), Vec2::new(6.0, 0.0), 50.0),
        Bubble::new(1, Vec2::new(300.0, 150.0), Vec2::new(-6.0, 0.0), 50.0),
        Bubble::new(2, Vec2::new(700.0, 70.0), Vec2::new(0.0, -6.0), 50.0),
    ];
    let mut state = SimState::with_bubbles(SimConfig::default(), bubbles, 1);

    let reports: Vec<TickReport> = (0..11).map(|_| tick(&mut state, viewport)).collect();

    // Ticks 1..=8 only drift, tick 4 bounces bubble 2 off the top
    for (i, report) in reports[..8].iter().enumerate() {
        assert_eq!(report.contacts, 0, "tick {}", i + 1);
    }
    assert_eq!(reports[3].wall_bounces, 1);
    assert_eq!(reports[8].contacts, 2);
    assert_eq!(reports[8].speed_fixes, 0);
    assert_eq!(reports[9].speed_fixes, 2);
    assert_eq!(reports[10].speed_fixes, 4);

    let mut total = TickReport::default();
    for report in reports {
        total += report;
    }
    assert_eq!(
        total,
        TickReport {
            contacts: 6,
            wall_bounces: 1,
            speed_fixes: 6,
            redirects: 0,
        }
    );
}

#[test]
fn same_seed_replays_identically() {
    let viewport = Viewport::new(1280.0, 720.0);
    let first = Trace::run(SimConfig::default(), viewport, 20240601, 600).unwrap();
    let replay = Trace::run(SimConfig::default(), viewport, 20240601, 600).unwrap();

    assert_eq!(first.len(), 601);
    assert_eq!(first.first_divergence(&replay), None);

    let other = Trace::run(SimConfig::default(), viewport, 20240602, 600).unwrap();
    assert_eq!(first.first_divergence(&other), Some(0));
}

#[test]
fn spawned_headings_point_every_way() {
    let viewport = Viewport::new(1280.0, 720.0);
    let config = SimConfig {
        entity_count: 200,
        radius: 10.0,
        ..Default::default()
    };
    let state = SimState::new(config, viewport, 20240601).unwrap();

    let up = state.bubbles.iter().filter(|b| b.vel.y < 0.0).count();
    let left = state.bubbles.iter().filter(|b| b.vel.x < 0.0).count();
    assert!((50..=150).contains(&up), "{} of 200 heading up", up);
    assert!((50..=150).contains(&left), "{} of 200 heading left", left);
}

#[test]
fn long_run_keeps_invariants() {
    let viewport = Viewport::new(1024.0, 768.0);
    let trace = Trace::run(SimConfig::default(), viewport, 7, 1200).unwrap();

    for frame in &trace.frames {
        for b in &frame.bubbles {
            assert!(b.pos.is_finite() && b.vel.is_finite());
            assert!(b.pos.x >= b.radius && b.pos.x <= viewport.width - b.radius);
            assert!(b.pos.y >= b.radius && b.pos.y <= viewport.height - b.radius);
            let s = b.speed();
            assert!(s >= 5.0 - 1e-3 && s <= 10.0 + 1e-3, "tick {} speed {}", frame.tick, s);
        }
    }
}

#[test]
fn driver_renders_every_bubble_each_frame() {
    let config = SimConfig {
        entity_count: 10,
        ..Default::default()
    };
    let state = SimState::new(config, VIEWPORT, 3).unwrap();
    let mut driver = Driver::new(state, VIEWPORT, MeshBuilder::default());

    for _ in 0..30 {
        assert!(matches!(driver.frame().unwrap(), FrameOutcome::Rendered(_)));
        assert_eq!(driver.renderer().bubbles_drawn(), 10);
    }

    driver.stop_handle().stop();
    assert_eq!(driver.frame().unwrap(), FrameOutcome::Stopped);
    assert_eq!(driver.state().time_ticks, 30);
}
