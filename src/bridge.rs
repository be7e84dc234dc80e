use log::{LevelFilter, Log, Metadata, Record};

use crate::error::LoggerError;
use crate::levels::Level;
use crate::output::Target;
use crate::prelude::Logger;

/// Forwards records of the `log` facade to a [`Logger`].
///
/// A record whose target names an existing topic is logged under that topic.
pub struct LogBridge {
    logger: &'static Logger,
}

impl LogBridge {
    pub fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }
}

pub(crate) fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::ERROR,
        log::Level::Warn => Level::WARN,
        log::Level::Info => Level::INFO,
        log::Level::Debug => Level::DEBUG,
        log::Level::Trace => Level::TRACE,
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record.target();
        let topic = self.logger.topic_get_id(target).map(|_| target);
        self.logger.log(
            Target::All,
            map_level(record.level()),
            record.file().unwrap_or(target),
            record.line().unwrap_or(0),
            topic,
            *record.args(),
        );
    }

    fn flush(&self) {}
}

/// Installs a [`LogBridge`] for `logger` as the `log` crate's logger.
///
/// Fails with `Bridge` when another `log` logger is already installed.
pub fn init_log_bridge(logger: &'static Logger, max_level: LevelFilter) -> Result<(), LoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(max_level);
    Ok(())
}
