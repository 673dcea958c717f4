#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use runner_core::config::PlacementConfig;
    use runner_core::enums::PowerUpKind;
    use runner_core::types::planar_distance;

    use crate::coins::place_coins;
    use crate::layout::layout_segment;
    use crate::obstacles::place_obstacles;
    use crate::power_ups::place_power_up;
    use crate::span::ZSpan;

    const LENGTH: f32 = 50.0;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_coins_one_lane_even_spacing() {
        let config = PlacementConfig::default();
        let anchor = Vec3::new(0.0, 0.0, 50.0);
        let (lane, coins) = place_coins(anchor, &config, &mut rng(1)).unwrap();

        assert_eq!(coins.len(), config.coins_per_segment as usize);
        for (i, coin) in coins.iter().enumerate() {
            assert_eq!(coin.x, config.lanes[lane]);
            assert_eq!(coin.y, config.coin_height);
            assert_eq!(coin.z, 52.0 + 2.0 * i as f32);
        }
    }

    #[test]
    fn test_coin_lane_varies_across_segments() {
        let config = PlacementConfig::default();
        let mut r = rng(7);
        let mut lanes = std::collections::HashSet::new();
        for i in 0..50 {
            let anchor = Vec3::new(0.0, 0.0, i as f32 * LENGTH);
            let (lane, _) = place_coins(anchor, &config, &mut r).unwrap();
            lanes.insert(lane);
        }
        assert_eq!(lanes.len(), config.lanes.len(), "every lane should get coins eventually");
    }

    #[test]
    fn test_no_coins_without_lanes() {
        let config = PlacementConfig {
            lanes: Vec::new(),
            ..Default::default()
        };
        assert!(place_coins(Vec3::ZERO, &config, &mut rng(1)).is_none());
    }

    #[test]
    fn test_obstacle_spacing_holds_for_many_segments() {
        let config = PlacementConfig::default();
        let mut r = rng(99);
        for i in 0..500 {
            let anchor = Vec3::new(0.0, 0.0, i as f32 * LENGTH);
            let outcome = place_obstacles(anchor, LENGTH, &config, 2, &mut r);
            for (a_idx, a) in outcome.placed.iter().enumerate() {
                for b in &outcome.placed[a_idx + 1..] {
                    assert!(
                        planar_distance(a.position, b.position) >= config.obstacle_min_separation,
                        "obstacles too close: {:?} vs {:?}",
                        a.position,
                        b.position
                    );
                }
                assert!(a.variant < 2);
                assert!(a.position.z >= anchor.z + config.obstacle_margin);
                assert!(a.position.z <= anchor.z + LENGTH - config.obstacle_margin);
            }
        }
    }

    #[test]
    fn test_obstacle_count_within_range_with_wide_separation() {
        let config = PlacementConfig {
            obstacle_min_separation: 20.0,
            obstacle_count_max: 3,
            ..Default::default()
        };
        let mut exhausted_total = 0;
        for seed in 0..200 {
            let outcome = place_obstacles(Vec3::ZERO, LENGTH, &config, 2, &mut rng(seed));
            assert!((1..=3).contains(&outcome.requested));
            assert!(outcome.placed.len() <= 3);
            assert_eq!(
                outcome.placed.len() + outcome.exhausted.len(),
                outcome.requested as usize
            );
            // The first slot can never collide with anything.
            assert!(!outcome.placed.is_empty());
            for e in &outcome.exhausted {
                assert_eq!(e.attempts, config.obstacle_retry_budget);
                assert!(e.slot > 0);
            }
            exhausted_total += outcome.exhausted.len();
        }
        // Logged rather than asserted on: exhaustion is an allowed outcome.
        eprintln!("PlacementExhausted slots over 200 segments: {exhausted_total}");
    }

    #[test]
    fn test_impossible_separation_places_only_first() {
        let config = PlacementConfig {
            obstacle_min_separation: 1_000.0,
            obstacle_count_min: 3,
            obstacle_count_max: 3,
            ..Default::default()
        };
        let outcome = place_obstacles(Vec3::ZERO, LENGTH, &config, 2, &mut rng(3));
        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.placed.len(), 1);
        assert_eq!(outcome.exhausted.len(), 2);
    }

    #[test]
    fn test_no_obstacles_without_variants() {
        let config = PlacementConfig::default();
        let outcome = place_obstacles(Vec3::ZERO, LENGTH, &config, 0, &mut rng(3));
        assert_eq!(outcome.requested, 0);
        assert!(outcome.placed.is_empty());
    }

    #[test]
    fn test_degenerate_span_collapses_without_panicking() {
        let span = ZSpan::within(100.0, 10.0, 8.0);
        assert!(span.is_point());
        assert_eq!(span.lo, 108.0);
        assert_eq!(span.sample(&mut rng(1)), 108.0);

        // Margin larger than the segment clamps to the segment end.
        let span = ZSpan::within(0.0, 10.0, 50.0);
        assert_eq!(span.lo, 10.0);

        let config = PlacementConfig {
            obstacle_margin: 40.0,
            obstacle_min_separation: 0.0,
            ..Default::default()
        };
        let outcome = place_obstacles(Vec3::ZERO, LENGTH, &config, 1, &mut rng(5));
        assert!(outcome.placed.iter().all(|o| o.position.z == 40.0));
    }

    #[test]
    fn test_power_up_chance_extremes() {
        let never = PlacementConfig {
            power_up_chance: 0.0,
            ..Default::default()
        };
        let always = PlacementConfig {
            power_up_chance: 1.0,
            invisibility_weight: 1.0,
            ..Default::default()
        };
        let mut r = rng(11);
        for i in 0..100 {
            let anchor = Vec3::new(0.0, 0.0, i as f32 * LENGTH);
            assert!(place_power_up(anchor, LENGTH, &never, &mut r).is_none());

            let p = place_power_up(anchor, LENGTH, &always, &mut r).unwrap();
            assert_eq!(p.kind, PowerUpKind::Invisibility);
            assert!(p.position.z >= anchor.z + always.power_up_margin);
            assert!(p.position.z <= anchor.z + LENGTH - always.power_up_margin);
            assert_eq!(p.position.y, always.power_up_height);
        }
    }

    #[test]
    fn test_power_up_weight_zero_gives_magnets() {
        let config = PlacementConfig {
            power_up_chance: 1.0,
            invisibility_weight: 0.0,
            ..Default::default()
        };
        let p = place_power_up(Vec3::ZERO, LENGTH, &config, &mut rng(2)).unwrap();
        assert_eq!(p.kind, PowerUpKind::Magnet);
    }

    #[test]
    fn test_layout_deterministic_for_seed() {
        let config = PlacementConfig::default();
        let anchor = Vec3::new(0.0, 0.0, 150.0);
        let a = layout_segment(anchor, LENGTH, &config, 2, &mut rng(42));
        let b = layout_segment(anchor, LENGTH, &config, 2, &mut rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_obstacles_sorted_by_z() {
        let config = PlacementConfig::default();
        let mut r = rng(8);
        for i in 0..50 {
            let layout = layout_segment(Vec3::new(0.0, 0.0, i as f32 * LENGTH), LENGTH, &config, 2, &mut r);
            let zs: Vec<f32> = layout.obstacles.placed.iter().map(|o| o.position.z).collect();
            assert!(zs.windows(2).all(|w| w[0] <= w[1]));
            assert!(layout.coin_lane.is_some());
        }
    }
}
