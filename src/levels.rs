use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

/// Number of level slots a [`LevelDescriptor`] can name.
pub const LEVELS_TOTAL: usize = 8;

/// Severity of an event. A higher value is more severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const TRACE: Level = Level(0);
    pub const DEBUG: Level = Level(1);
    pub const INFO: Level = Level(2);
    pub const WARN: Level = Level(3);
    pub const ERROR: Level = Level(4);
    pub const FATAL: Level = Level(5);

    pub const LEVEL_0: Level = Level(0);
    pub const LEVEL_1: Level = Level(1);
    pub const LEVEL_2: Level = Level(2);
    pub const LEVEL_3: Level = Level(3);
    pub const LEVEL_4: Level = Level(4);
    pub const LEVEL_5: Level = Level(5);
    pub const LEVEL_6: Level = Level(6);
    pub const LEVEL_7: Level = Level(7);

    /// Wraps a raw level. Values outside the active descriptor are rejected
    /// where they are used, not here.
    pub const fn new(raw: u8) -> Self {
        Level(raw)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" | "warning" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            "fatal" => Ok(Level::FATAL),
            _ => Err(LoggerError::InvalidArgument),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(LevelDescriptor::DEFAULT.name(*self))
    }
}

/// Built-in level naming schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStyle {
    Default,
    Short,
}

/// Maps levels to the names printed in front of each message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub max_level: Level,
    pub names: [Option<&'static str>; LEVELS_TOTAL],
}

impl LevelDescriptor {
    pub const DEFAULT: LevelDescriptor = LevelDescriptor {
        max_level: Level::FATAL,
        names: [
            Some("TRACE"), Some("DEBUG"), Some("INFO"),
            Some("WARN"), Some("ERROR"), Some("FATAL"),
            None, None,
        ],
    };

    pub const SHORT: LevelDescriptor = LevelDescriptor {
        max_level: Level::FATAL,
        names: [
            Some("T"), Some("D"), Some("I"),
            Some("W"), Some("E"), Some("F"),
            None, None,
        ],
    };

    pub fn from_style(style: LevelStyle) -> Self {
        match style {
            LevelStyle::Default => Self::DEFAULT,
            LevelStyle::Short => Self::SHORT,
        }
    }

    /// Name of `level`, or `"?"` when the descriptor does not cover it.
    pub fn name(&self, level: Level) -> &'static str {
        if !self.contains(level) {
            return "?";
        }
        self.names[level.index()].unwrap_or("?")
    }

    pub fn contains(&self, level: Level) -> bool {
        level <= self.max_level && level.index() < LEVELS_TOTAL
    }

    pub(crate) fn validate(&self) -> Result<(), LoggerError> {
        if self.max_level.index() >= LEVELS_TOTAL {
            return Err(LoggerError::InvalidArgument);
        }
        if self.names[..=self.max_level.index()].iter().any(Option::is_none) {
            return Err(LoggerError::InvalidArgument);
        }
        Ok(())
    }
}

impl Default for LevelDescriptor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const LEVEL_COLORS: [&str; LEVELS_TOTAL] = [
    "\x1b[37m", // white
    "\x1b[36m", // cyan
    "\x1b[32m", // green
    "\x1b[33m", // yellow
    "\x1b[31m", // red
    "\x1b[35m", // magenta
    "\x1b[91m", // bright red
    "\x1b[95m", // bright magenta
];

pub(crate) const COLOR_RESET: &str = "\x1b[0m";

pub(crate) fn color_of(level: Level) -> &'static str {
    LEVEL_COLORS.get(level.index()).copied().unwrap_or(COLOR_RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names() {
        let d = LevelDescriptor::DEFAULT;
        assert_eq!(d.name(Level::TRACE), "TRACE");
        assert_eq!(d.name(Level::INFO), "INFO");
        assert_eq!(d.name(Level::FATAL), "FATAL");
        assert_eq!(LevelDescriptor::SHORT.name(Level::WARN), "W");
    }

    #[test]
    fn out_of_range_is_question_mark() {
        let d = LevelDescriptor::DEFAULT;
        assert_eq!(d.name(Level::LEVEL_6), "?");
        assert_eq!(d.name(Level::new(123)), "?");
    }

    #[test]
    fn descriptor_validation() {
        assert!(LevelDescriptor::DEFAULT.validate().is_ok());

        let missing_name = LevelDescriptor {
            max_level: Level::LEVEL_6,
            ..LevelDescriptor::DEFAULT
        };
        assert!(matches!(missing_name.validate(), Err(LoggerError::InvalidArgument)));

        let too_high = LevelDescriptor {
            max_level: Level::new(8),
            names: [Some("x"); LEVELS_TOTAL],
        };
        assert!(matches!(too_high.validate(), Err(LoggerError::InvalidArgument)));
    }

    #[test]
    fn parse_level_names() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::INFO);
        assert_eq!(" WARN ".parse::<Level>().unwrap(), Level::WARN);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::FATAL > Level::ERROR);
        assert!(Level::TRACE < Level::DEBUG);
    }
}
