use super::*;

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn fires_once_at_deadline() {
    let t0 = Instant::now();
    let mut timer = CloseTimer::new(DELAY);
    timer.arm(t0);

    assert!(!timer.fire(t0 + Duration::from_millis(299)));
    assert!(timer.fire(t0 + DELAY));
    assert!(!timer.is_pending());
    assert!(!timer.fire(t0 + Duration::from_secs(5)));
}

#[test]
fn rearming_replaces_the_pending_deadline() {
    let t0 = Instant::now();
    let mut timer = CloseTimer::new(DELAY);
    timer.arm(t0);
    timer.arm(t0 + Duration::from_millis(200));

    assert_eq!(timer.deadline(), Some(t0 + Duration::from_millis(500)));
    assert!(!timer.fire(t0 + DELAY));
    assert!(timer.fire(t0 + Duration::from_millis(500)));
}

#[test]
fn cancel_clears_the_deadline() {
    let t0 = Instant::now();
    let mut timer = CloseTimer::new(DELAY);
    timer.arm(t0);
    timer.cancel();

    assert_eq!(timer.deadline(), None);
    assert!(!timer.fire(t0 + DELAY));
}
