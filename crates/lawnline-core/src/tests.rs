#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::Health;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::{CommandError, PlacementRejection, RemovalRejection};
    use crate::events::SimEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{GridCell, Position, SimTime};

    /// Verify the wave-phase enum round-trips through serde_json, payload included.
    #[test]
    fn test_wave_phase_serde() {
        let variants = vec![
            WavePhase::EarlyWave(1),
            WavePhase::EarlyWave(3),
            WavePhase::Transitioning,
            WavePhase::Endless,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: WavePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// PlayerCommand is an internally tagged union so the frontend can build it by hand.
    #[test]
    fn test_player_command_tagged_json() {
        let json = r#"{"type":"PlaceDefender","row":2,"col":3,"kind":"IceShooter"}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            PlayerCommand::PlaceDefender { row, col, kind } => {
                assert_eq!((row, col), (2, 3));
                assert_eq!(kind, DefenderKind::IceShooter);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let select = PlayerCommand::Select {
            selection: Selection::Shovel,
        };
        let json = serde_json::to_string(&select).unwrap();
        assert!(json.contains(r#""type":"Select""#), "got {json}");
    }

    #[test]
    fn test_command_rejected_event_serde() {
        let event = SimEvent::CommandRejected {
            error: CommandError::Placement(PlacementRejection::OnCooldown),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_error_messages() {
        let err: CommandError = PlacementRejection::InsufficientResource.into();
        assert_eq!(
            err.to_string(),
            "placement rejected: not enough resource"
        );
        let err: CommandError = RemovalRejection::NothingToRemove.into();
        assert_eq!(err.to_string(), "removal rejected: nothing to remove");
        let err = CommandError::InvalidCell { row: -1, col: 4 };
        assert_eq!(err.to_string(), "cell (-1, 4) is outside the lane grid");
    }

    /// Verify GameStateSnapshot can be serialized to JSON and stays small when empty.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_defender_profiles_match_tuning() {
        assert_eq!(defender_profile(DefenderKind::Shooter).cost, 100);
        assert_eq!(defender_profile(DefenderKind::MelonShooter).cost, 225);
        assert_eq!(defender_profile(DefenderKind::Wall).cooldown_ms, 50_000);
        assert_eq!(defender_profile(DefenderKind::Wall).max_health, 400.0);
        for kind in DefenderKind::ALL {
            let profile = defender_profile(kind);
            assert_eq!(
                profile.fire_interval_ticks.is_some(),
                kind.is_shooter(),
                "{kind:?} fire interval should match shooter flag"
            );
        }
    }

    #[test]
    fn test_attacker_profiles_gate_armored_types() {
        assert_eq!(attacker_profile(AttackerKind::Basic).first_wave, 1);
        assert_eq!(
            attacker_profile(AttackerKind::ArmoredLight).first_wave,
            ARMORED_FIRST_WAVE
        );
        assert!(
            attacker_profile(AttackerKind::ArmoredHeavy).max_health
                > attacker_profile(AttackerKind::ArmoredLight).max_health
        );
    }

    #[test]
    fn test_health_ratio() {
        let mut health = Health::full(80.0);
        assert_eq!(health.ratio(), 1.0);
        health.current = 20.0;
        assert!((health.ratio() - 0.25).abs() < 1e-12);
        health.current = -3.0;
        assert!(health.is_depleted());
        assert_eq!(health.ratio(), 0.0);
    }

    #[test]
    fn test_sim_time_never_runs_backwards() {
        let mut time = SimTime::started_at(1_000);
        time.advance(1_016);
        time.advance(1_010);
        assert_eq!(time.tick, 2);
        assert_eq!(time.now_ms, 1_016);
        assert_eq!(time.elapsed_ms(), 16);
    }

    #[test]
    fn test_geometry() {
        assert_eq!(GridCell::new(2, 3).centre_x(), 3.5);
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_pickup_phase_collectable() {
        assert!(PickupPhase::Falling.is_collectable());
        assert!(PickupPhase::Fading.is_collectable());
        assert!(!PickupPhase::Expired.is_collectable());
        assert!(!PickupPhase::Collected.is_collectable());
    }
}
