#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use lawnline_core::constants::*;
    use lawnline_core::enums::{AttackerKind, WavePhase};

    use crate::fsm::{evaluate, WaveState, WaveTransition};
    use crate::ramp::{attacker_for_roll, draw_attacker, endless_interval_ms};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Drive a fixed wave: spawn everything, kill everything, return the decision that advanced.
    fn clear_wave(state: &mut WaveState, rng: &mut ChaCha8Rng) -> crate::WaveDecision {
        let target = state.target();
        for _ in 0..target {
            let d = evaluate(state, 0, rng);
            assert!(d.spawn.is_some());
        }
        for _ in 0..target {
            state.record_kill();
        }
        evaluate(state, 0, rng)
    }

    #[test]
    fn test_wave_one_spawns_once_then_polls() {
        let mut state = WaveState::default();
        let mut rng = rng();

        let first = evaluate(&mut state, 0, &mut rng);
        assert_eq!(first.spawn, Some(AttackerKind::Basic));
        assert_eq!(first.next_delay_ms, EARLY_WAVE_INTERVALS_MS[0]);
        assert_eq!(state.spawned, 1);

        // Nothing killed yet: scheduler idles on the poll interval.
        let idle = evaluate(&mut state, 0, &mut rng);
        assert_eq!(idle.spawn, None);
        assert_eq!(idle.next_delay_ms, WAVE_POLL_INTERVAL_MS);
        assert_eq!(state.phase, WavePhase::EarlyWave(1));
    }

    #[test]
    fn test_single_kill_advances_to_wave_two() {
        let mut state = WaveState::default();
        let mut rng = rng();

        evaluate(&mut state, 0, &mut rng);
        state.record_kill();
        let decision = evaluate(&mut state, 0, &mut rng);

        assert_eq!(state.phase, WavePhase::EarlyWave(2));
        assert_eq!(state.wave, 2);
        assert_eq!(
            decision.transitions,
            vec![WaveTransition::WaveAdvanced(2)]
        );
        // The first attacker of wave 2 spawns in the same callback.
        assert!(decision.spawn.is_some());
        assert_eq!(decision.next_delay_ms, EARLY_WAVE_INTERVALS_MS[1]);
        assert_eq!(state.spawned, 1);
        assert_eq!(state.killed, 0);
    }

    #[test]
    fn test_wave_targets_follow_wave_number() {
        let mut state = WaveState::default();
        let mut rng = rng();

        clear_wave(&mut state, &mut rng);
        assert_eq!(state.target(), 2);
        // One of wave 2 already spawned by the advancing callback.
        let d = evaluate(&mut state, 0, &mut rng);
        assert!(d.spawn.is_some());
        assert_eq!(state.spawned, 2);
        let d = evaluate(&mut state, 0, &mut rng);
        assert_eq!(d.spawn, None, "wave 2 stops at two spawns");
    }

    #[test]
    fn test_partial_kills_do_not_advance() {
        let mut state = WaveState::default();
        let mut rng = rng();
        clear_wave(&mut state, &mut rng);
        evaluate(&mut state, 0, &mut rng);
        state.record_kill();
        let d = evaluate(&mut state, 0, &mut rng);
        assert_eq!(d.spawn, None);
        assert_eq!(state.phase, WavePhase::EarlyWave(2));
    }

    #[test]
    fn test_wave_three_clear_enters_endless_with_base_reset() {
        let mut state = WaveState::new(ENDLESS_BASE_INTERVAL_MS);
        let mut rng = rng();

        // Wave 1 -> 2, wave 2 -> 3.
        evaluate(&mut state, 0, &mut rng);
        for wave in 1..=3u32 {
            while state.spawned < wave {
                evaluate(&mut state, 0, &mut rng);
            }
            for _ in 0..wave {
                state.record_kill();
            }
            if wave < 3 {
                evaluate(&mut state, 0, &mut rng);
                assert_eq!(state.phase, WavePhase::EarlyWave(wave + 1));
            }
        }
        state.base_interval_ms = 1234;

        let decision = evaluate(&mut state, 0, &mut rng);
        assert!(state.in_endless_mode());
        assert_eq!(state.base_interval_ms, ENDLESS_BASE_INTERVAL_MS);
        assert_eq!(state.wave, 4);
        assert_eq!(
            decision.transitions,
            vec![
                WaveTransition::Transitioning,
                WaveTransition::EndlessStarted
            ]
        );
        assert!(decision.spawn.is_some());
        assert_eq!(decision.next_delay_ms, ENDLESS_BASE_INTERVAL_MS);
    }

    #[test]
    fn test_endless_spawns_every_callback() {
        let mut state = WaveState::default();
        state.phase = WavePhase::Endless;
        state.wave = 4;
        let mut rng = rng();

        for _ in 0..20 {
            let d = evaluate(&mut state, 61_000, &mut rng);
            assert!(d.spawn.is_some());
            assert_eq!(d.next_delay_ms, 9000);
        }
        assert_eq!(state.current_interval_ms, 9000);
    }

    #[test]
    fn test_endless_interval_ramp() {
        assert_eq!(endless_interval_ms(10_000, 0), 10_000);
        assert_eq!(endless_interval_ms(10_000, 29_999), 10_000);
        assert_eq!(endless_interval_ms(10_000, 30_000), 9500);
        assert_eq!(endless_interval_ms(10_000, 95_000), 8500);
        // max(base - floor(E / 30000) * 500, 1000)
        for elapsed in [0u64, 12_345, 300_000, 540_000, 570_000, 10_000_000] {
            let expected = (10_000i64 - (elapsed / 30_000) as i64 * 500).max(1000) as u64;
            assert_eq!(endless_interval_ms(10_000, elapsed), expected);
        }
    }

    #[test]
    fn test_early_waves_only_basic() {
        for roll in [0.0, 0.1, 0.3, 0.99] {
            for wave in 1..ARMORED_FIRST_WAVE {
                assert_eq!(attacker_for_roll(wave, roll), AttackerKind::Basic);
            }
        }
    }

    #[test]
    fn test_draw_respects_profile_wave_gate() {
        for (roll, kind) in [
            (0.0, AttackerKind::ArmoredHeavy),
            (0.3, AttackerKind::ArmoredLight),
        ] {
            let gate = attacker_profile(kind).first_wave;
            assert_eq!(attacker_for_roll(gate - 1, roll), AttackerKind::Basic);
            assert_eq!(attacker_for_roll(gate, roll), kind);
        }
    }

    #[test]
    fn test_armored_draw_thresholds() {
        assert_eq!(attacker_for_roll(4, 0.0), AttackerKind::ArmoredHeavy);
        assert_eq!(attacker_for_roll(4, 0.19), AttackerKind::ArmoredHeavy);
        assert_eq!(attacker_for_roll(4, 0.2), AttackerKind::ArmoredLight);
        assert_eq!(attacker_for_roll(4, 0.49), AttackerKind::ArmoredLight);
        assert_eq!(attacker_for_roll(4, 0.5), AttackerKind::Basic);
        assert_eq!(attacker_for_roll(9, 0.95), AttackerKind::Basic);
    }

    #[test]
    fn test_armored_draw_distribution() {
        let mut rng = rng();
        let mut heavy = 0;
        let mut light = 0;
        let n = 10_000;
        for _ in 0..n {
            match draw_attacker(4, &mut rng) {
                AttackerKind::ArmoredHeavy => heavy += 1,
                AttackerKind::ArmoredLight => light += 1,
                AttackerKind::Basic => {}
            }
        }
        let heavy_share = heavy as f64 / n as f64;
        let light_share = light as f64 / n as f64;
        assert!((heavy_share - 0.2).abs() < 0.03, "heavy share {heavy_share}");
        assert!((light_share - 0.3).abs() < 0.03, "light share {light_share}");
    }
}
