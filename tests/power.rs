mod tests {
    use myrtio_radio_light::{PowerState, SleepSchedule};

    #[test]
    fn test_default_schedule_sleeps_before_evening() {
        let schedule = SleepSchedule::default();
        for hour in 0..17 {
            assert_eq!(PowerState::next(true, hour, &schedule), PowerState::Sleeping);
        }
        for hour in 17..24 {
            assert_eq!(PowerState::next(true, hour, &schedule), PowerState::Awake);
        }
    }

    #[test]
    fn test_switch_off_keeps_node_awake() {
        let schedule = SleepSchedule::default();
        for hour in 0..24 {
            assert_eq!(PowerState::next(false, hour, &schedule), PowerState::Awake);
        }
    }

    #[test]
    fn test_window_past_midnight() {
        let schedule = SleepSchedule::new(17, 2);
        assert!(schedule.is_awake_hour(17));
        assert!(schedule.is_awake_hour(23));
        assert!(schedule.is_awake_hour(0));
        assert!(schedule.is_awake_hour(1));
        assert!(!schedule.is_awake_hour(2));
        assert!(!schedule.is_awake_hour(16));
        assert_eq!(PowerState::next(true, 1, &schedule), PowerState::Awake);
        assert_eq!(PowerState::next(true, 3, &schedule), PowerState::Sleeping);
    }
}
