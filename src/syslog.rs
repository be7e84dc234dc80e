//! Syslog severities on top of the eight generic level slots.
//!
//! ```no_run
//! use microlog::syslog::{self, SyslogStyle};
//!
//! let logger = microlog::logger();
//! syslog::enable(logger, SyslogStyle::Long).unwrap();
//! microlog::ulog_log!(syslog::NOTICE, "Starting ({})", 42);
//! syslog::disable(logger).unwrap();
//! ```
use crate::error::LoggerError;
use crate::levels::{Level, LevelDescriptor};
use crate::prelude::Logger;

pub const DEBUG: Level = Level::LEVEL_0;
pub const INFO: Level = Level::LEVEL_1;
pub const NOTICE: Level = Level::LEVEL_2;
pub const WARN: Level = Level::LEVEL_3;
pub const ERR: Level = Level::LEVEL_4;
pub const CRIT: Level = Level::LEVEL_5;
pub const ALERT: Level = Level::LEVEL_6;
pub const EMERG: Level = Level::LEVEL_7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyslogStyle {
    /// Fixed-width names so messages line up.
    Long,
    Short,
}

const LONG: LevelDescriptor = LevelDescriptor {
    max_level: EMERG,
    names: [
        Some("DEBUG "), Some("INFO  "), Some("NOTICE"), Some("WARN  "),
        Some("ERR   "), Some("CRIT  "), Some("ALERT "), Some("EMERG "),
    ],
};

const SHORT: LevelDescriptor = LevelDescriptor {
    max_level: EMERG,
    names: [
        Some("DBG"), Some("INF"), Some("NTC"), Some("WRN"),
        Some("ERR"), Some("CRT"), Some("ALR"), Some("EMG"),
    ],
};

pub fn descriptor(style: SyslogStyle) -> LevelDescriptor {
    match style {
        SyslogStyle::Long => LONG,
        SyslogStyle::Short => SHORT,
    }
}

pub fn enable(logger: &Logger, style: SyslogStyle) -> Result<(), LoggerError> {
    logger.level_set_new_levels(descriptor(style))
}

/// Restores the default level names.
pub fn disable(logger: &Logger) -> Result<(), LoggerError> {
    logger.level_reset_levels()
}

/// Whether `logger` currently uses one of the syslog descriptors. Installing
/// another descriptor afterwards turns this off.
pub fn is_active(logger: &Logger) -> Result<bool, LoggerError> {
    let levels = logger.config()?.levels;
    Ok(levels == LONG || levels == SHORT)
}
