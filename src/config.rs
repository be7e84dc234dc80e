use std::env;

use crate::levels::{Level, LevelDescriptor};
use crate::package::BuildOptions;

/// Prefix buffer size used when nothing else is configured.
pub const DEFAULT_PREFIX_SIZE: usize = 64;

/// Number of extra output slots when the `extra_outputs` option is on.
pub const DEFAULT_EXTRA_OUTPUTS: usize = 8;

/// How topics are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicsMode {
    /// At most `n` topics. `Static(0)` turns topics off.
    Static(usize),
    /// Topics are allocated on demand.
    Dynamic,
}

impl TopicsMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, TopicsMode::Static(0))
    }
}

/// Logger configuration.
///
/// The display switches (`color`, `time`, `prefix`, `source_location`,
/// `topics`) and `levels` can be changed on a running logger. `extra_outputs`
/// and `topics_mode` size the logger's tables and are fixed once the logger
/// is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub color: bool,
    pub time: bool,
    pub prefix: bool,
    pub source_location: bool,
    pub topics: bool,
    pub prefix_size: usize,
    pub level: Level,
    pub extra_outputs: usize,
    pub topics_mode: TopicsMode,
    pub levels: LevelDescriptor,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self {
            color: false,
            time: false,
            prefix: true,
            source_location: true,
            topics: true,
            prefix_size: DEFAULT_PREFIX_SIZE,
            level: Level::TRACE,
            extra_outputs: 0,
            topics_mode: TopicsMode::Dynamic,
            levels: LevelDescriptor::DEFAULT,
        };
        BuildOptions::enabled().apply(&mut config);
        config
    }
}

impl Config {
    /// Builds the default configuration and applies environment overrides.
    ///
    /// Recognised variables: `ULOG_COLOR`, `ULOG_TIME`,
    /// `ULOG_SOURCE_LOCATION`, `ULOG_LEVEL` and `NO_COLOR`. Values that do
    /// not parse keep the default.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(color) = lookup("ULOG_COLOR").as_deref().and_then(parse_switch) {
            self.color = color;
        }
        if lookup("NO_COLOR").is_some() {
            self.color = false;
        }
        if let Some(time) = lookup("ULOG_TIME").as_deref().and_then(parse_switch) {
            self.time = time;
        }
        if let Some(location) = lookup("ULOG_SOURCE_LOCATION").as_deref().and_then(parse_switch) {
            self.source_location = location;
        }
        if let Some(level) = lookup("ULOG_LEVEL").and_then(|l| l.parse().ok()) {
            self.level = level;
        }
        self
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
