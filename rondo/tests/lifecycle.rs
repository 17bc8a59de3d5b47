//! Lifecycle contract: one-way created -> running -> stopped.

use std::time::Duration;

use rondo::{ActionTask, TimeWheelBuilder, WheelError};

#[tokio::test(flavor = "multi_thread")]
async fn start_and_stop_are_idempotent() {
    let wheel = TimeWheelBuilder::new()
        .tick_duration(Duration::from_millis(50))
        .wheel_size(16)
        .pool_size(2)
        .build()
        .expect("valid tuning");

    assert!(!wheel.is_running());
    wheel.start().expect("start");
    wheel.start().expect("repeat start is a no-op");
    assert!(wheel.is_running());

    wheel.stop().await;
    wheel.stop().await;
    assert!(!wheel.is_running());
}

#[tokio::test(flavor = "multi_thread")]
async fn stopped_wheel_cannot_be_restarted() {
    let wheel = TimeWheelBuilder::new()
        .tick_duration(Duration::from_millis(50))
        .wheel_size(16)
        .pool_size(2)
        .build()
        .expect("valid tuning");

    wheel.start().expect("start");
    wheel.stop().await;

    assert!(matches!(wheel.start(), Err(WheelError::AlreadyStopped)));
    assert!(matches!(
        wheel.submit(ActionTask::new(100, || {})),
        Err(WheelError::NotRunning)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn ticking_advances_the_pointer_and_stop_halts_it() {
    let wheel = TimeWheelBuilder::new()
        .tick_duration(Duration::from_millis(50))
        .wheel_size(16)
        .pool_size(2)
        .build()
        .expect("valid tuning");

    wheel.start().expect("start");
    assert_eq!(wheel.current_slot(), 0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(wheel.current_slot() > 0, "pointer never advanced");

    wheel.stop().await;
    let parked = wheel.current_slot();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(wheel.current_slot(), parked, "pointer moved after stop");
}

#[tokio::test(flavor = "multi_thread")]
async fn status_snapshot_tracks_the_lifecycle() {
    let wheel = TimeWheelBuilder::new()
        .tick_duration(Duration::from_millis(50))
        .wheel_size(16)
        .pool_size(2)
        .build()
        .expect("valid tuning");

    let status = wheel.status();
    assert!(!status.running);
    assert_eq!(status.wheel_size, 16);
    assert_eq!(status.tick_duration_ms, 50);
    assert_eq!(status.current_slot, 0);

    wheel.start().expect("start");
    assert!(wheel.status().running);

    wheel.stop().await;
    assert!(!wheel.status().running);
}
