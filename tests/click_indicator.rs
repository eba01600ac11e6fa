use key_mon::indicator::ClickIndicator;
use std::time::{Duration, Instant};

#[test]
fn rapid_triggers_coalesce_into_one_hide() {
    let mut indicator = ClickIndicator::new(1.0);
    let t0 = Instant::now();
    let t1 = t0 + Duration::from_millis(500);

    assert!(indicator.trigger(t0));
    assert!(indicator.trigger(t1));
    assert!(indicator.is_visible());

    // The first deadline (t0 + 1s) must not hide anything.
    assert!(!indicator.tick(t0 + Duration::from_secs(1)));
    assert!(indicator.is_visible());

    // Exactly one hide, at t1 + timeout.
    assert!(indicator.tick(t1 + Duration::from_secs(1)));
    assert!(!indicator.is_visible());
    assert!(!indicator.tick(t1 + Duration::from_secs(2)));
}

#[test]
fn hide_fires_only_after_the_deadline() {
    let mut indicator = ClickIndicator::new(0.2);
    let t0 = Instant::now();
    indicator.trigger(t0);
    assert!(!indicator.tick(t0));
    assert!(!indicator.tick(t0 + Duration::from_millis(199)));
    assert!(indicator.tick(t0 + Duration::from_millis(200)));
}

#[test]
fn zero_timeout_disables_the_indicator() {
    let mut indicator = ClickIndicator::new(0.0);
    assert!(!indicator.enabled());
    assert!(!indicator.trigger(Instant::now()));
    assert!(!indicator.is_visible());
    assert!(!indicator.tick(Instant::now()));
}

#[test]
fn negative_timeout_disables_the_indicator() {
    let mut indicator = ClickIndicator::new(-1.0);
    assert!(!indicator.enabled());
    assert!(!indicator.trigger(Instant::now()));
    assert!(!indicator.is_visible());
}
