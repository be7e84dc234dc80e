use std::sync::{Arc, Mutex};

use microlog::{Config, Event, Level, Logger};

#[test]
fn panics_are_logged_at_fatal() {
    let logger: &'static Logger = Box::leak(Box::new(Logger::new(Config {
        color: false,
        extra_outputs: 1,
        ..Config::default()
    })));
    logger.set_stdout_writer(std::io::sink()).unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    logger
        .output_add(
            move |ev: &Event<'_>| sink.lock().unwrap().push((ev.level(), ev.message())),
            Level::TRACE,
        )
        .unwrap();
    logger.log_panics();

    let result = std::panic::catch_unwind(|| panic!("boom {}", 7));
    assert!(result.is_err());
    let _ = std::panic::take_hook();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, Level::FATAL);
    assert!(events[0].1.starts_with("PANIC at 'tests/panic_test.rs:"));
    assert!(events[0].1.ends_with("': boom 7"));
}
