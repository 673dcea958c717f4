#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::RunCommand;
    use crate::config::{PoolSpec, StreamingConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::RunEvent;
    use crate::state::RunSnapshot;
    use crate::types::{planar_distance, EntityHandle, SimTime};

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(StreamingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_non_positive_offset_rejected() {
        let mut config = StreamingConfig::default();
        config.segment_offset = Vec3::new(0.0, 0.0, -5.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveOffset(-5.0))
        );
    }

    #[test]
    fn test_obstacle_margin_must_leave_a_span() {
        let mut config = StreamingConfig::default();
        // 50 - 25 > 25 fails: the span collapses to a point.
        config.placement.obstacle_margin = 25.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySpan {
                which: "obstacle",
                ..
            })
        ));
    }

    #[test]
    fn test_power_up_span_ignored_when_power_ups_disabled() {
        let mut config = StreamingConfig::default();
        config.placement.power_up_margin = 40.0;
        assert!(config.validate().is_err());
        config.placement.power_up_chance = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_coin_row_must_fit_segment() {
        let mut config = StreamingConfig::default();
        config.placement.coins_per_segment = 30;
        // 2 + 29 * 2 = 60 > 50
        assert_eq!(
            config.validate(),
            Err(ConfigError::CoinRowOverflow {
                end: 60.0,
                length: 50.0
            })
        );
    }

    #[test]
    fn test_inverted_obstacle_range_rejected() {
        let mut config = StreamingConfig::default();
        config.placement.obstacle_count_min = 4;
        config.placement.obstacle_count_max = 2;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedCountRange { min: 4, max: 2 })
        );
    }

    #[test]
    fn test_probability_bounds() {
        let mut config = StreamingConfig::default();
        config.placement.power_up_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { .. })
        ));
    }

    #[test]
    fn test_empty_lanes_and_tags_rejected() {
        let mut config = StreamingConfig::default();
        config.placement.lanes.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoLanes));

        let mut config = StreamingConfig::default();
        config.tags.segments.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoTags { list: "segment" })
        );
    }

    #[test]
    fn test_toml_overrides_only_named_fields() {
        let config = StreamingConfig::from_toml_str(
            r#"
            segment_offset = [0.0, 0.0, 30.0]
            destroy_distance = 40.0

            [placement]
            coins_per_segment = 5
            lanes = [-2.0, 2.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.segment_length(), 30.0);
        assert_eq!(config.destroy_distance, 40.0);
        assert_eq!(config.placement.coins_per_segment, 5);
        assert_eq!(config.placement.lanes, vec![-2.0, 2.0]);
        // Untouched fields keep their defaults.
        assert_eq!(
            config.spawn_trigger_distance,
            StreamingConfig::default().spawn_trigger_distance
        );
    }

    #[test]
    fn test_toml_invalid_values_fail_fast() {
        let err = StreamingConfig::from_toml_str("destroy_distance = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Negative { .. }));

        let err = StreamingConfig::from_toml_str("destroy_distance = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_default_pool_specs_cover_every_tag() {
        let config = StreamingConfig::default();
        let specs = PoolSpec::defaults_for(&config);
        // 3 segments + coin + 2 obstacles + 2 power-ups
        assert_eq!(specs.len(), 8);

        // (100 + 60) / 50 = 3.2 -> 4 live segments, plus headroom.
        let segment = specs.iter().find(|s| s.tag == "Segment1").unwrap();
        assert_eq!(segment.size, 6);
        let coin = specs.iter().find(|s| s.tag == "Coin").unwrap();
        assert_eq!(coin.category, EntityCategory::Coin);
        assert_eq!(coin.size, 60);
    }

    #[test]
    fn test_sim_time_uses_given_dt() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 100.0, 4.0);
        assert!((planar_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_command_serde() {
        let commands = vec![
            RunCommand::CollectCoin {
                entity: EntityHandle::from_bits(7),
            },
            RunCommand::CollectPowerUp {
                entity: EntityHandle::from_bits(9),
            },
            RunCommand::GameOver,
            RunCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: RunCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_run_event_tagged_json() {
        let event = RunEvent::CoinCountChanged { coins: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"CoinCountChanged\""));
        let back: RunEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_default_snapshot_is_running() {
        let snap = RunSnapshot::default();
        assert_eq!(snap.phase, RunPhase::Running);
        assert_eq!(snap.active.total(), 0);
    }
}
