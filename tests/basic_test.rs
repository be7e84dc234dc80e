use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use microlog::{ulog_debug, ulog_error, ulog_info, ulog_topic_info, ulog_trace, Level, Target};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn take_lines(&self) -> Vec<String> {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The global logger is shared by every test in this binary, so it is only
// touched from this one test.
#[test]
fn test_global_logger() {
    let logger = microlog::logger();
    let console = SharedBuffer::default();
    logger.set_stdout_writer(console.clone()).unwrap();
    logger.color_config(false).unwrap();
    logger.time_config(false).unwrap();
    logger.source_location_config(true).unwrap();
    logger.output_level_set_all(Level::TRACE).unwrap();

    ulog_info!("test message {}", 1);
    let lines = console.take_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("INFO tests/basic_test.rs:"));
    assert!(lines[0].ends_with(": test message 1"));

    logger.output_level_set_all(Level::INFO).unwrap();
    ulog_trace!("hidden");
    ulog_debug!("hidden");
    ulog_error!("shown");
    assert_eq!(console.take_lines().len(), 1);

    logger.topic_add("global", Target::All, true).unwrap();
    ulog_topic_info!("global", "from a topic");
    assert!(console.take_lines()[0].contains("[global] "));

    logger.color_config(true).unwrap();
    ulog_error!("in color");
    let line = console.take_lines().remove(0);
    assert!(line.starts_with("\x1b[31m"));
    assert!(line.ends_with("\x1b[0m"));

    logger.set_quiet(true).unwrap();
    ulog_error!("silenced");
    assert!(console.take_lines().is_empty());

    logger.set_quiet(false).unwrap();
    logger.cleanup().unwrap();
    ulog_topic_info!("global", "topic is gone");
    assert!(console.take_lines().is_empty());
}
