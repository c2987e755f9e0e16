use super::*;

const SEC: Duration = Duration::from_secs(1);

#[test]
fn counts_down_whole_seconds_then_fires() {
    let mut cd = AutoCapture::new();
    let token = cd.start(2, 3);
    assert!(cd.is_running());
    assert_eq!(cd.target_slot(), Some(2));

    assert_eq!(cd.tick(SEC), Some(CountdownEvent::Tick { remaining_secs: 2 }));
    assert_eq!(cd.tick(SEC), Some(CountdownEvent::Tick { remaining_secs: 1 }));
    assert_eq!(cd.tick(SEC), Some(CountdownEvent::Fire { slot: 2, token }));
    assert!(!cd.is_running());
    assert_eq!(cd.tick(SEC), None);
    assert!(cd.is_current(token));
}

#[test]
fn sub_second_ticks_announce_each_boundary_once() {
    let mut cd = AutoCapture::new();
    cd.start(0, 2);
    let step = Duration::from_millis(250);
    let events: Vec<_> = (0..8).filter_map(|_| cd.tick(step)).collect();
    assert_eq!(
        events[0],
        CountdownEvent::Tick { remaining_secs: 1 }
    );
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], CountdownEvent::Fire { slot: 0, .. }));
}

#[test]
fn a_large_step_fires_immediately() {
    let mut cd = AutoCapture::new();
    cd.start(1, 3);
    assert!(matches!(cd.tick(Duration::from_secs(10)), Some(CountdownEvent::Fire { slot: 1, .. })));
}

#[test]
fn cancelled_countdown_never_fires() {
    let mut cd = AutoCapture::new();
    let token = cd.start(0, 1);
    cd.cancel();
    assert!(!cd.is_current(token));
    assert_eq!(cd.tick(Duration::from_secs(5)), None);
    assert_eq!(cd.remaining(), None);
}

#[test]
fn restarting_invalidates_the_previous_token() {
    let mut cd = AutoCapture::new();
    let first = cd.start(0, 3);
    let second = cd.start(1, 3);
    assert!(!cd.is_current(first));
    assert!(cd.is_current(second));
    assert_eq!(cd.target_slot(), Some(1));
}
