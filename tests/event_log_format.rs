use key_mon::event_log::{unix_seconds, EventLog};
use key_mon::event_source::EventKind;
use std::time::{Duration, UNIX_EPOCH};

#[path = "mock_backend.rs"]
mod mock_backend;
use mock_backend::event_at;

#[test]
fn one_line_per_event_with_five_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = EventLog::create(dir.path()).unwrap();

    log.record(&event_at(EventKind::Key, 30, 1, 1500)).unwrap();
    log.record(&event_at(EventKind::Button, 272, 0, 2025)).unwrap();

    // Flushed per write: readable before close.
    let content = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(content, "1.50000;KEY;30;1\n2.02500;BTN;272;0\n");

    log.close().unwrap();
}

#[test]
fn log_name_derives_from_process_start_time() {
    let dir = tempfile::tempdir().unwrap();
    let log = EventLog::create(dir.path()).unwrap();
    let name = log.path().file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("key-mon-log-"), "unexpected name {name}");
    // key-mon-log-YYYYmmdd-HHMMSS
    assert_eq!(name.len(), "key-mon-log-".len() + 15);
}

#[test]
fn unix_seconds_is_epoch_based() {
    let t = UNIX_EPOCH + Duration::from_millis(1234);
    assert!((unix_seconds(t) - 1.234).abs() < 1e-9);
}
