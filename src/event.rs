use std::fmt::{self, Write};

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::levels::{self, Level, LevelDescriptor};
use crate::topic::TopicId;

/// Display switches captured when an event is created, so rendering does not
/// need the logger's lock.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Style {
    pub(crate) color: bool,
    pub(crate) time: bool,
    pub(crate) prefix: bool,
    pub(crate) source_location: bool,
    pub(crate) topics: bool,
    pub(crate) levels: LevelDescriptor,
}

impl Style {
    pub(crate) fn of(config: &Config) -> Self {
        Self {
            color: config.color,
            time: config.time,
            prefix: config.prefix,
            source_location: config.source_location,
            topics: config.topics,
            levels: config.levels,
        }
    }
}

/// Where a rendered line is going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `HH:MM:SS`, colored when the logger has color on.
    Console,
    /// `YYYY-MM-DD HH:MM:SS`, never colored.
    File,
    /// `HH:MM:SS`, never colored. Used by `Display`.
    Plain,
}

/// A single log call, as seen by outputs and prefix functions.
#[derive(Clone, Copy, Debug)]
pub struct Event<'a> {
    pub(crate) level: Level,
    pub(crate) file: &'a str,
    pub(crate) line: u32,
    pub(crate) topic: Option<(TopicId, &'a str)>,
    pub(crate) time: Option<DateTime<Local>>,
    pub(crate) message: fmt::Arguments<'a>,
    pub(crate) prefix: Option<&'a str>,
    pub(crate) style: Style,
}

impl<'a> Event<'a> {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn topic(&self) -> Option<TopicId> {
        self.topic.map(|(id, _)| id)
    }

    pub fn topic_name(&self) -> Option<&'a str> {
        self.topic.map(|(_, name)| name)
    }

    /// Local time of the call; `None` unless timestamps are on.
    pub fn time(&self) -> Option<DateTime<Local>> {
        self.time
    }

    /// The formatted message without any decoration.
    pub fn message(&self) -> String {
        fmt::format(self.message)
    }

    pub fn args(&self) -> fmt::Arguments<'a> {
        self.message
    }

    /// Name of the event's level under the logger's active descriptor.
    pub fn level_name(&self) -> &'static str {
        self.style.levels.name(self.level)
    }

    pub fn render(&self, layout: Layout) -> String {
        let mut line = String::with_capacity(64);
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut line, layout);
        line
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, layout: Layout) -> fmt::Result {
        let color = layout == Layout::Console && self.style.color;
        if color {
            out.write_str(levels::color_of(self.level))?;
        }

        let mut head = false;
        if self.style.time {
            if let Some(time) = self.time {
                match layout {
                    Layout::File => write!(out, "{}", time.format("%Y-%m-%d %H:%M:%S"))?,
                    Layout::Console | Layout::Plain => write!(out, "{}", time.format("%H:%M:%S"))?,
                }
                head = true;
            }
        }
        if self.style.prefix {
            if let Some(prefix) = self.prefix {
                out.write_str(prefix)?;
                head = true;
            }
        }
        if head {
            out.write_char(' ')?;
        }

        write!(out, "{} ", self.level_name())?;

        if self.style.topics {
            if let Some(name) = self.topic_name() {
                write!(out, "[{}] ", name)?;
            }
        }
        if self.style.source_location {
            write!(out, "{}:{}: ", self.file, self.line)?;
        }

        out.write_fmt(self.message)?;

        if color {
            out.write_str(levels::COLOR_RESET)?;
        }
        Ok(())
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, Layout::Plain)
    }
}
