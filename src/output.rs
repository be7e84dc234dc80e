use std::io::{self, Write};

use crate::error::LoggerError;
use crate::event::{Event, Layout};
use crate::levels::Level;

/// Handle of a registered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputId(usize);

impl OutputId {
    /// The console output. Always present, never removable.
    pub const STDOUT: OutputId = OutputId(0);

    /// Builds an id from a raw index. Unknown ids are rejected where used.
    pub const fn new(index: usize) -> Self {
        OutputId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Which outputs a log call addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    All,
    Output(OutputId),
}

impl Target {
    /// Outputs addressed by both `self` and `other`, if any.
    pub(crate) fn intersect(self, other: Target) -> Option<Target> {
        match (self, other) {
            (Target::All, t) | (t, Target::All) => Some(t),
            (Target::Output(a), Target::Output(b)) if a == b => Some(self),
            _ => None,
        }
    }
}

impl From<OutputId> for Target {
    fn from(id: OutputId) -> Self {
        Target::Output(id)
    }
}

/// Destination for events.
///
/// Any `FnMut(&Event) + Send` closure is an output.
pub trait Output: Send {
    fn write_event(&mut self, event: &Event<'_>);
}

impl<F> Output for F
where
    F: FnMut(&Event<'_>) + Send,
{
    fn write_event(&mut self, event: &Event<'_>) {
        self(event)
    }
}

/// Writes one file-layout line per event and flushes after each line.
pub struct FileOutput<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> FileOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> Output for FileOutput<W> {
    fn write_event(&mut self, event: &Event<'_>) {
        let line = event.render(Layout::File);
        // A failing sink must not take the caller down with it.
        let _ = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
    }
}

/// The console output.
pub(crate) struct Console {
    writer: Box<dyn Write + Send>,
}

impl Console {
    pub(crate) fn stdout() -> Self {
        Self { writer: Box::new(io::stdout()) }
    }

    pub(crate) fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl Output for Console {
    fn write_event(&mut self, event: &Event<'_>) {
        let line = event.render(Layout::Console);
        let _ = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
    }
}

pub(crate) struct Slot {
    handler: Box<dyn Output>,
    level: Level,
}

impl Slot {
    fn deliver(&mut self, event: &Event<'_>) {
        if event.level >= self.level {
            self.handler.write_event(event);
        }
    }
}

/// The console plus a fixed number of extra slots.
pub(crate) struct Outputs {
    console: Slot,
    quiet: bool,
    extra: Vec<Option<Slot>>,
}

impl Outputs {
    pub(crate) fn new(extra: usize, level: Level) -> Self {
        Self {
            console: Slot {
                handler: Box::new(Console::stdout()),
                level,
            },
            quiet: false,
            extra: (0..extra).map(|_| None).collect(),
        }
    }

    pub(crate) fn add(&mut self, handler: Box<dyn Output>, level: Level) -> Result<OutputId, LoggerError> {
        if self.extra.is_empty() {
            return Err(LoggerError::Disabled);
        }
        let index = self
            .extra
            .iter()
            .position(Option::is_none)
            .ok_or(LoggerError::OutputsFull)?;
        self.extra[index] = Some(Slot { handler, level });
        Ok(OutputId(index + 1))
    }

    pub(crate) fn remove(&mut self, id: OutputId) -> Result<(), LoggerError> {
        if id == OutputId::STDOUT {
            return Err(LoggerError::ProtectedOutput);
        }
        let slot = self.extra_slot(id).ok_or(LoggerError::InvalidArgument)?;
        if slot.take().is_none() {
            return Err(LoggerError::InvalidArgument);
        }
        Ok(())
    }

    fn extra_slot(&mut self, id: OutputId) -> Option<&mut Option<Slot>> {
        id.0.checked_sub(1).and_then(|i| self.extra.get_mut(i))
    }

    fn slot_mut(&mut self, id: OutputId) -> Option<&mut Slot> {
        if id == OutputId::STDOUT {
            return Some(&mut self.console);
        }
        self.extra_slot(id).and_then(Option::as_mut)
    }

    pub(crate) fn set_level(&mut self, id: OutputId, level: Level) -> Result<(), LoggerError> {
        let slot = self.slot_mut(id).ok_or(LoggerError::InvalidArgument)?;
        slot.level = level;
        Ok(())
    }

    pub(crate) fn set_level_all(&mut self, level: Level) {
        self.console.level = level;
        for slot in self.extra.iter_mut().flatten() {
            slot.level = level;
        }
    }

    pub(crate) fn set_console(&mut self, writer: Box<dyn Write + Send>) {
        self.console.handler = Box::new(Console::new(writer));
    }

    pub(crate) fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub(crate) fn clear(&mut self, level: Level) {
        for slot in self.extra.iter_mut() {
            *slot = None;
        }
        self.console.level = level;
    }

    pub(crate) fn dispatch(&mut self, target: Target, event: &Event<'_>) {
        match target {
            Target::All => {
                if !self.quiet {
                    self.console.deliver(event);
                }
                for slot in self.extra.iter_mut().flatten() {
                    slot.deliver(event);
                }
            }
            Target::Output(OutputId::STDOUT) => {
                if !self.quiet {
                    self.console.deliver(event);
                }
            }
            Target::Output(id) => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.deliver(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> Box<dyn Output> {
        Box::new(|_: &Event<'_>| {})
    }

    #[test]
    fn intersect_targets() {
        let a = Target::Output(OutputId::new(1));
        let b = Target::Output(OutputId::new(2));
        assert_eq!(Target::All.intersect(Target::All), Some(Target::All));
        assert_eq!(Target::All.intersect(a), Some(a));
        assert_eq!(a.intersect(Target::All), Some(a));
        assert_eq!(a.intersect(a), Some(a));
        assert_eq!(a.intersect(b), None);
    }

    #[test]
    fn slots_fill_and_reuse() {
        let mut outputs = Outputs::new(2, Level::TRACE);
        let first = outputs.add(sink(), Level::TRACE).unwrap();
        let second = outputs.add(sink(), Level::TRACE).unwrap();
        assert_eq!(first, OutputId::new(1));
        assert_eq!(second, OutputId::new(2));
        assert!(matches!(outputs.add(sink(), Level::TRACE), Err(LoggerError::OutputsFull)));

        outputs.remove(second).unwrap();
        assert_eq!(outputs.add(sink(), Level::TRACE).unwrap(), second);
    }

    #[test]
    fn no_slots_means_disabled() {
        let mut outputs = Outputs::new(0, Level::TRACE);
        assert!(matches!(outputs.add(sink(), Level::INFO), Err(LoggerError::Disabled)));
    }

    #[test]
    fn remove_rules() {
        let mut outputs = Outputs::new(2, Level::TRACE);
        assert!(matches!(outputs.remove(OutputId::STDOUT), Err(LoggerError::ProtectedOutput)));
        assert!(matches!(outputs.remove(OutputId::new(1)), Err(LoggerError::InvalidArgument)));
        assert!(matches!(outputs.remove(OutputId::new(999)), Err(LoggerError::InvalidArgument)));
    }

    #[test]
    fn level_on_unknown_output() {
        let mut outputs = Outputs::new(1, Level::TRACE);
        assert!(outputs.set_level(OutputId::STDOUT, Level::INFO).is_ok());
        assert!(matches!(
            outputs.set_level(OutputId::new(5), Level::INFO),
            Err(LoggerError::InvalidArgument)
        ));
    }
}
