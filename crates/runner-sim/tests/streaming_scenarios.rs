//! End-to-end streaming behaviour through the public engine API.

use std::sync::{Arc, Mutex};

use runner_sim::core::commands::RunCommand;
use runner_sim::core::config::StreamingConfig;
use runner_sim::core::constants::DT;
use runner_sim::core::enums::{EntityCategory, PowerUpKind, RunPhase};
use runner_sim::core::events::RunEvent;
use runner_sim::engine::{RunEngine, SimConfig};
use runner_sim::pool::ObjectPool;

fn engine_with(streaming: StreamingConfig, seed: u64) -> RunEngine {
    RunEngine::with_default_pools(SimConfig { seed, streaming }).unwrap()
}

fn default_engine() -> RunEngine {
    engine_with(StreamingConfig::default(), 42)
}

fn segment_spawns(events: &[RunEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::SegmentSpawned { z, .. } => Some(*z),
            _ => None,
        })
        .collect()
}

// ---- Scenarios ----

#[test]
fn test_start_segment_only_on_creation() {
    let engine = default_engine();
    let counts = engine.active_counts();
    assert_eq!(counts.segments, 1);
    assert_eq!(counts.coins + counts.obstacles + counts.power_ups, 0);
    assert_eq!(engine.frontier().z, 0.0);
    assert_eq!(engine.phase(), RunPhase::Running);
}

#[test]
fn test_player_at_31_spawns_one_segment_at_50() {
    let streaming = StreamingConfig {
        spawn_trigger_distance: 20.0,
        ..Default::default()
    };
    let coins_per_segment = streaming.placement.coins_per_segment as usize;
    let mut engine = engine_with(streaming, 7);

    let snap = engine.tick(31.0, DT);

    assert_eq!(snap.frontier_z, 50.0);
    assert_eq!(segment_spawns(&snap.events), vec![0.0, 50.0]);
    assert_eq!(snap.active.segments, 2);

    let coins = engine.positions(EntityCategory::Coin);
    assert_eq!(coins.len(), coins_per_segment);
    let lane_x = coins[0].1.x;
    for (i, (_, position)) in coins.iter().enumerate() {
        assert_eq!(position.x, lane_x, "all coins share one lane");
        assert_eq!(position.z, 52.0 + 2.0 * i as f32);
    }
}

#[test]
fn test_at_most_one_segment_per_tick() {
    let mut engine = default_engine();
    // Far past the frontier: still one segment per tick.
    let snap = engine.tick(1_000.0, DT);
    assert_eq!(snap.frontier_z, 50.0);
    let snap = engine.tick(1_000.0, DT);
    assert_eq!(snap.frontier_z, 100.0);
}

#[test]
fn test_pool_size_two_reuses_first_handle_on_third_acquire() {
    let mut pool = ObjectPool::new();
    pool.warm_up("Coin", EntityCategory::Coin, 2).unwrap();
    let handles: Vec<_> = (0..5)
        .map(|i| {
            pool.acquire("Coin", glam::Vec3::new(0.0, 1.0, i as f32), glam::Quat::IDENTITY)
                .unwrap()
        })
        .collect();
    assert_eq!(handles[2], handles[0]);
    assert_eq!(pool.stats("Coin").unwrap().active, 2);
}

// ---- Properties ----

#[test]
fn test_pool_bound_and_segment_order_over_long_run() {
    let mut engine = default_engine();
    let mut z = 0.0_f32;
    for _ in 0..5_000 {
        z += 0.5;
        let snap = engine.tick(z, DT);
        for view in &snap.pools {
            assert!(
                view.active <= view.size,
                "pool {} has {} active of {}",
                view.tag,
                view.active,
                view.size
            );
        }

        let zs: Vec<f32> = engine.active().segments.iter().map(|e| e.z).collect();
        assert!(zs.windows(2).all(|w| w[0] < w[1]), "segments out of order: {zs:?}");
    }
    assert_eq!(
        engine.diagnostics().forced_reuses,
        0,
        "default pool sizes cover the in-flight maximum"
    );
}

#[test]
fn test_frontier_monotonic_by_offset() {
    let mut engine = default_engine();
    let offset = engine.config().segment_offset.z;
    let mut last = engine.frontier().z;
    let mut z = 0.0_f32;
    for step in 0..2_000 {
        // Uneven advance, including standing still.
        z += (step % 7) as f32 * 0.4;
        let snap = engine.tick(z, DT);
        let delta = snap.frontier_z - last;
        assert!(delta == 0.0 || delta == offset, "frontier jumped by {delta}");
        last = snap.frontier_z;
    }
    assert!(last > 0.0);
}

#[test]
fn test_no_net_growth() {
    let mut engine = default_engine();
    let mut z = 0.0_f32;
    for _ in 0..300 {
        z += 1.0;
        engine.tick(z, DT);
    }
    assert!(engine.pool().total_active() > 0);

    // Jump far ahead: anything spawned on this tick is already behind.
    engine.tick(1.0e6, DT);

    assert!(engine.active().is_empty(), "{:?}", engine.active_counts());
    assert_eq!(engine.pool().total_active(), 0);
}

#[test]
fn test_undersized_pools_stay_bounded_and_never_hide_new_owner() {
    let streaming = StreamingConfig::default();
    let mut pool = ObjectPool::new();
    for tag in &streaming.tags.segments {
        pool.warm_up(tag, EntityCategory::Segment, 1).unwrap();
    }
    pool.warm_up(&streaming.tags.coin, EntityCategory::Coin, 3).unwrap();
    let mut engine = RunEngine::new(SimConfig { seed: 3, streaming }, pool).unwrap();

    let mut z = 0.0_f32;
    for _ in 0..400 {
        z += 1.0;
        let snap = engine.tick(z, DT);
        let coin = snap.pools.iter().find(|p| p.tag == "Coin").unwrap();
        assert!(coin.active <= 3);
    }
    let diagnostics = engine.diagnostics();
    assert!(diagnostics.forced_reuses > 0);
    assert!(diagnostics.unknown_tags > 0, "obstacle and power-up tags have no pool");

    // The newest coin is visible even though older entries share its handle.
    let (handle, _) = *engine.positions(EntityCategory::Coin).last().unwrap();
    assert!(engine.pool().is_active(handle));

    // Restart reports exactly the instances that were on the track,
    // not the stale entries that shared them.
    let live = engine.pool().total_active();
    engine.snapshot();
    engine.restart();
    let reclaimed = engine
        .snapshot()
        .events
        .iter()
        .filter(|e| matches!(e, RunEvent::EntityReclaimed { .. }))
        .count();
    assert_eq!(reclaimed, live);
}

#[test]
fn test_placement_exhaustion_is_counted_not_fatal() {
    let mut streaming = StreamingConfig::default();
    streaming.placement.obstacle_count_min = 3;
    streaming.placement.obstacle_count_max = 3;
    streaming.placement.obstacle_min_separation = 1_000.0;
    let mut engine = engine_with(streaming, 5);

    let snap = engine.tick(0.0, DT);
    assert_eq!(snap.active.obstacles, 1);
    assert_eq!(snap.diagnostics.placement_exhausted, 2);
}

// ---- Pickups and run state ----

#[test]
fn test_collect_coin_counts_once() {
    let mut engine = default_engine();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.subscribe(move |event| {
        if let RunEvent::CoinCountChanged { coins } = event {
            sink.lock().unwrap().push(*coins);
        }
    });

    engine.tick(0.0, DT);
    let (coin, _) = engine.positions(EntityCategory::Coin)[0];
    let before = engine.active_counts().coins;

    assert!(engine.collect_coin(coin));
    assert!(!engine.pool().is_active(coin));
    assert_eq!(engine.active_counts().coins, before - 1);
    assert_eq!(*seen.lock().unwrap(), vec![1]);

    assert!(!engine.collect_coin(coin), "second pickup is ignored");
    assert_eq!(engine.result().coins, 1);
}

#[test]
fn test_moved_coin_is_reclaimed_by_spawn_z() {
    let mut engine = default_engine();
    engine.tick(0.0, DT);
    let (coin, p) = engine.positions(EntityCategory::Coin)[0];

    let pulled = glam::Vec3::new(p.x, p.y, p.z + 500.0);
    assert!(engine.move_coin(coin, pulled));
    assert_eq!(engine.positions(EntityCategory::Coin)[0], (coin, pulled));

    // Spawn z is far enough behind; where the coin was moved to does not matter.
    engine.tick(p.z + 61.0, DT);
    assert!(engine.positions(EntityCategory::Coin).iter().all(|(h, _)| *h != coin));
    assert!(!engine.move_coin(coin, p), "reclaimed coins cannot be moved");
}

#[test]
fn test_move_coin_refused_after_collect_and_game_over() {
    let mut engine = default_engine();
    engine.tick(0.0, DT);
    let coins = engine.positions(EntityCategory::Coin);
    let (collected, p) = coins[0];
    let (other, q) = coins[1];

    assert!(engine.collect_coin(collected));
    assert!(!engine.move_coin(collected, p));

    engine.game_over();
    assert!(!engine.move_coin(other, q));
}

#[test]
fn test_collect_power_up() {
    let mut streaming = StreamingConfig::default();
    streaming.placement.power_up_chance = 1.0;
    streaming.placement.invisibility_weight = 0.0;
    let mut engine = engine_with(streaming, 9);

    engine.tick(0.0, DT);
    let (power_up, _) = engine.positions(EntityCategory::PowerUp)[0];
    assert_eq!(engine.collect_power_up(power_up), Some(PowerUpKind::Magnet));
    assert_eq!(engine.collect_power_up(power_up), None);

    let snap = engine.snapshot();
    assert!(snap.events.contains(&RunEvent::PowerUpActivated {
        kind: PowerUpKind::Magnet
    }));
}

#[test]
fn test_score_uses_elapsed_time() {
    let mut engine = default_engine();
    let rate = engine.config().score_rate;
    for _ in 0..8 {
        engine.tick(0.0, 0.25);
    }
    assert_eq!(engine.result().score, (rate * 2.0) as u32);
    assert_eq!(engine.time().tick, 8);
    assert_eq!(engine.time().elapsed_secs, 2.0);
}

#[test]
fn test_game_over_freezes_streaming() {
    let mut engine = default_engine();
    engine.tick(10.0, DT);
    engine.queue_command(RunCommand::GameOver);
    let snap = engine.tick(10.0, DT);
    assert_eq!(snap.phase, RunPhase::GameOver);
    assert_eq!(
        snap.events
            .iter()
            .filter(|e| matches!(e, RunEvent::GameOver { .. }))
            .count(),
        1
    );

    let frozen = snap.frontier_z;
    let counts = snap.active;
    let score = snap.score;
    let snap = engine.tick(5_000.0, 1.0);
    assert_eq!(snap.frontier_z, frozen);
    assert_eq!(snap.active, counts);
    assert_eq!(snap.score, score);

    let (coin, _) = engine.positions(EntityCategory::Coin)[0];
    assert!(!engine.collect_coin(coin));

    let first = engine.game_over();
    assert_eq!(engine.game_over(), first);
    assert!(engine.snapshot().events.is_empty());
}

#[test]
fn test_restart_returns_everything_to_pool() {
    let mut engine = default_engine();
    let mut z = 0.0;
    for _ in 0..100 {
        z += 1.0;
        engine.tick(z, 0.1);
    }
    engine.game_over();
    engine.queue_command(RunCommand::Restart);
    let snap = engine.tick(0.0, 0.0);

    assert_eq!(snap.phase, RunPhase::Running);
    assert_eq!(snap.coins, 0);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.frontier_z, 50.0, "first tick of the new run spawns one segment");
    assert_eq!(engine.pool().total_active(), engine.active_counts().total());
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = engine_with(StreamingConfig::default(), 12345);
    let mut b = engine_with(StreamingConfig::default(), 12345);
    let mut z = 0.0_f32;
    for _ in 0..300 {
        z += 0.75;
        let json_a = serde_json::to_string(&a.tick(z, DT)).unwrap();
        let json_b = serde_json::to_string(&b.tick(z, DT)).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = engine_with(StreamingConfig::default(), 111);
    let mut b = engine_with(StreamingConfig::default(), 222);
    a.tick(0.0, DT);
    b.tick(0.0, DT);
    let coins_a = a.positions(EntityCategory::Coin);
    let coins_b = b.positions(EntityCategory::Coin);
    let obstacles_a = a.positions(EntityCategory::Obstacle);
    let obstacles_b = b.positions(EntityCategory::Obstacle);
    let same = coins_a.iter().map(|c| c.1).eq(coins_b.iter().map(|c| c.1))
        && obstacles_a.iter().map(|o| o.1).eq(obstacles_b.iter().map(|o| o.1));
    assert!(!same, "different seeds should lay out different tracks");
}

#[test]
fn test_invalid_config_fails_at_construction() {
    let mut streaming = StreamingConfig::default();
    streaming.placement.obstacle_margin = 30.0;
    assert!(RunEngine::with_default_pools(SimConfig {
        seed: 1,
        streaming
    })
    .is_err());
}
