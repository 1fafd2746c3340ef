//! Unit tests for live-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BehaviorId, EntityId};

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
        assert_eq!(BehaviorId::Auto(3).to_string(), "#3");
        assert_eq!(BehaviorId::from("patrol").to_string(), "patrol");
    }

    #[test]
    fn namespaces_are_disjoint() {
        assert_ne!(BehaviorId::Auto(0), BehaviorId::Named("0"));
        assert_eq!(BehaviorId::from("patrol"), BehaviorId::Named("patrol"));
        assert!(EntityId(3) < EntityId(4));
    }
}

#[cfg(test)]
mod tags {
    use crate::{GroupTag, PauseStates, PauseTag};

    #[test]
    fn literal_and_owned_tags_compare_equal() {
        assert_eq!(PauseTag::from("menu"), PauseTag::from(String::from("menu")));
        assert_eq!(GroupTag::new("enemy").as_str(), "enemy");
    }

    #[test]
    fn push_is_deduplicated() {
        let mut states = PauseStates::new();
        assert!(states.push("menu"));
        assert!(!states.push("menu"));
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut states: PauseStates = ["menu", "cutscene"].into_iter().collect();
        assert!(states.remove("menu"));
        assert!(!states.remove("menu"));
        assert!(states.contains("cutscene"));
    }

    #[test]
    fn untagged_is_never_paused() {
        let states: PauseStates = ["menu"].into_iter().collect();
        assert!(!states.pauses(None));
        assert!(states.pauses(Some(&PauseTag::from("menu"))));
        assert!(!states.pauses(Some(&PauseTag::from("cutscene"))));
    }

    #[test]
    fn empty_states_pause_nothing() {
        let states = PauseStates::new();
        assert!(!states.pauses(Some(&PauseTag::from("menu"))));
    }

    #[test]
    fn iteration_keeps_activation_order() {
        let states: PauseStates = ["b", "a", "c"].into_iter().collect();
        let order: Vec<&str> = states.iter().map(|t| t.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, FrameClock, ManualClock, Tick, TickRate};

    #[test]
    fn per_tick_uses_plus_one_divisor() {
        let rate = TickRate::new(10.0).unwrap();
        assert_eq!(rate.divisor(), 11.0);
        assert_eq!(rate.per_tick(5.0), 5.0 / 11.0);
    }

    #[test]
    fn rejects_bad_rates() {
        assert!(TickRate::new(0.0).is_err());
        assert!(TickRate::new(-30.0).is_err());
        assert!(TickRate::new(f32::NAN).is_err());
        assert!(TickRate::new(f32::INFINITY).is_err());
    }

    #[test]
    fn frame_clock_elapsed() {
        let mut clock = FrameClock::new(TickRate::new(4.0).unwrap());
        for _ in 0..6 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(6));
        assert_eq!(clock.elapsed_secs(), 1.5);
        assert_eq!(clock.to_string(), "T6 (1.500s @ 4 tps)");
    }

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new();
        let reader = clock.shared();
        assert_eq!(reader.now(), 0.0);
        clock.advance(1.25);
        assert_eq!(reader.now(), 1.25);
        clock.set(10.0);
        assert_eq!(reader.now(), 10.0);
    }
}

#[cfg(test)]
mod countdown {
    use crate::{Countdown, ManualClock};

    #[test]
    fn counts_down_to_zero() {
        let clock = ManualClock::new();
        let timer = Countdown::start(&clock.shared(), 2.0);
        assert_eq!(timer.remaining(), 2.0);
        clock.advance(0.5);
        assert_eq!(timer.remaining(), 1.5);
        clock.advance(5.0);
        assert_eq!(timer.remaining(), 0.0);
        assert!(timer.is_expired());
    }

    #[test]
    fn compares_against_numbers() {
        let clock = ManualClock::new();
        let timer = Countdown::start(&clock.shared(), 1.0);
        assert!(timer > 0.0);
        assert!(timer < 2.0);
        clock.advance(1.0);
        assert!(!(timer > 0.0));
        assert!(timer == 0.0);
        assert_eq!(f64::from(&timer), 0.0);
    }

    #[test]
    fn deadline_captured_at_construction() {
        let clock = ManualClock::new();
        clock.set(100.0);
        let timer = Countdown::start(&clock.shared(), 3.0);
        clock.set(101.0);
        assert_eq!(timer.remaining(), 2.0);
    }

    #[test]
    fn display_shows_remaining() {
        let clock = ManualClock::new();
        let timer = Countdown::start(&clock.shared(), 1.5);
        assert_eq!(timer.to_string(), "1.500s");
    }
}

#[cfg(test)]
mod config {
    use crate::{FailurePolicy, SceneConfig, TimeSource};

    #[test]
    fn defaults_are_valid() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.failure_policy, FailurePolicy::Isolate);
        assert_eq!(cfg.time_source, TimeSource::Wall);
        assert_eq!(cfg.validate().unwrap().ticks_per_second(), 60.0);
    }

    #[test]
    fn invalid_rate_is_config_error() {
        let cfg = SceneConfig { tick_rate: 0.0, ..SceneConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, crate::LiveError::Config(_)), "got {err:?}");
    }
}
