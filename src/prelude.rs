use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use lazy_static::lazy_static;

pub use crate::config::{Config, TopicsMode};
pub use crate::error::LoggerError;
pub use crate::event::{Event, Layout};
pub use crate::levels::{Level, LevelDescriptor, LevelStyle};
pub use crate::output::{FileOutput, Output, OutputId, Target};
pub use crate::sync::Lock;
pub use crate::topic::TopicId;

use crate::event::Style;
use crate::output::Outputs;
use crate::sync::{self, DispatchGuard, HookGuard};
use crate::topic::Topics;

/// Computes the prefix printed in front of each line.
pub type PrefixFn = dyn Fn(&Event<'_>) -> String + Send + Sync;

lazy_static! {
    static ref LOGGER: Logger = Logger::new(Config::from_env());
}

/// The process-wide logger used by the `ulog_*!` macros.
///
/// Created on first use from [`Config::from_env`].
pub fn logger() -> &'static Logger {
    &LOGGER
}

struct State {
    config: Config,
    outputs: Outputs,
    topics: Topics,
    prefix_fn: Option<Arc<PrefixFn>>,
    lock: Option<Arc<dyn Lock>>,
}

/// Everything a log call needs, copied out of the state so the prefix
/// function runs without the state lock held.
struct Snapshot {
    style: Style,
    prefix_size: usize,
    target: Target,
    topic: Option<(TopicId, String)>,
    prefix_fn: Option<Arc<PrefixFn>>,
    lock: Option<Arc<dyn Lock>>,
}

/// A logger with a console output, optional extra outputs and topics.
///
/// `Logger` is `Sync`; share it by reference or through an `Arc`. Most code
/// uses the global instance through [`logger()`] and the `ulog_*!` macros.
pub struct Logger {
    state: Mutex<State>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Logger {
    /// Constructs a new instance of `Logger`.
    ///
    /// `config.extra_outputs` and `config.topics_mode` size the logger for
    /// its whole lifetime.
    pub fn new(config: Config) -> Self {
        let outputs = Outputs::new(config.extra_outputs, config.level);
        let topics = Topics::new(config.topics_mode);
        Self {
            state: Mutex::new(State {
                config,
                outputs,
                topics,
                prefix_fn: None,
                lock: None,
            }),
        }
    }

    // A panicking output must not take the logger down with it. Nothing in
    // `State` is left half-updated by an output, so the guard is reused.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Logs a message.
    ///
    /// Usually reached through the `ulog_*!` macros. Events above the active
    /// level descriptor, for unknown or disabled topics, or issued from
    /// inside an output are dropped.
    ///
    /// # Arguments
    ///
    /// * `target` - Outputs the event is addressed to.
    /// * `level` - Severity of the event.
    /// * `file`, `line` - Source location of the call.
    /// * `topic` - Optional topic name.
    /// * `args` - The message.
    pub fn log(
        &self, target: Target, level: Level, file: &str, line: u32,
        topic: Option<&str>, args: fmt::Arguments<'_>,
    ) {
        // Outputs that log would need the state lock they are called under.
        if sync::dispatching() {
            return;
        }

        let snapshot = match self.snapshot(target, level, topic) {
            Some(snapshot) => snapshot,
            None => return,
        };

        let event = Event {
            level,
            file,
            line,
            topic: snapshot.topic.as_ref().map(|(id, name)| (*id, name.as_str())),
            time: snapshot.style.time.then(Local::now),
            message: args,
            prefix: None,
            style: snapshot.style,
        };

        let prefix = match (&snapshot.prefix_fn, snapshot.style.prefix) {
            (Some(prefix_fn), true) => Some(truncate(prefix_fn(&event), snapshot.prefix_size)),
            _ => None,
        };
        let event = Event { prefix: prefix.as_deref(), ..event };

        self.dispatch(snapshot.lock.as_deref(), snapshot.target, &event);
    }

    fn snapshot(&self, target: Target, level: Level, topic: Option<&str>) -> Option<Snapshot> {
        let state = self.state();
        if !state.config.levels.contains(level) {
            return None;
        }

        let (target, topic) = match topic {
            None => (target, None),
            Some(name) => {
                let (id, topic) = state.topics.get(name)?;
                if !topic.enabled || level < topic.level {
                    return None;
                }
                (target.intersect(topic.target)?, Some((id, topic.name.clone())))
            }
        };

        Some(Snapshot {
            style: Style::of(&state.config),
            prefix_size: state.config.prefix_size,
            target,
            topic,
            prefix_fn: state.prefix_fn.clone(),
            lock: state.lock.clone(),
        })
    }

    fn dispatch(&self, hook: Option<&dyn Lock>, target: Target, event: &Event<'_>) {
        let _dispatching = match DispatchGuard::enter() {
            Some(guard) => guard,
            None => return,
        };
        let _hook = match hook.map(HookGuard::acquire).transpose() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        self.state().outputs.dispatch(target, event);
    }

    /// Adds an output that receives every event at `level` or above.
    ///
    /// # Returns
    ///
    /// The new output's id, `Disabled` when the logger has no extra slots or
    /// `OutputsFull` when every slot is taken.
    pub fn output_add<O>(&self, output: O, level: Level) -> Result<OutputId, LoggerError>
    where
        O: Output + 'static,
    {
        let mut state = self.state();
        check_level(&state.config, level)?;
        state.outputs.add(Box::new(output), level)
    }

    /// Adds a writer that receives one line per event with a full date.
    pub fn output_add_file<W>(&self, writer: W, level: Level) -> Result<OutputId, LoggerError>
    where
        W: Write + Send + 'static,
    {
        self.output_add(FileOutput::new(writer), level)
    }

    pub fn output_remove(&self, id: OutputId) -> Result<(), LoggerError> {
        self.state().outputs.remove(id)
    }

    pub fn output_level_set(&self, id: OutputId, level: Level) -> Result<(), LoggerError> {
        let mut state = self.state();
        check_level(&state.config, level)?;
        state.outputs.set_level(id, level)
    }

    pub fn output_level_set_all(&self, level: Level) -> Result<(), LoggerError> {
        let mut state = self.state();
        check_level(&state.config, level)?;
        state.outputs.set_level_all(level);
        Ok(())
    }

    /// Replaces the writer behind [`OutputId::STDOUT`].
    pub fn set_stdout_writer<W>(&self, writer: W) -> Result<(), LoggerError>
    where
        W: Write + Send + 'static,
    {
        self.state().outputs.set_console(Box::new(writer));
        Ok(())
    }

    /// Silences the console output. Other outputs are unaffected.
    pub fn set_quiet(&self, quiet: bool) -> Result<(), LoggerError> {
        self.state().outputs.set_quiet(quiet);
        Ok(())
    }

    pub fn topic_add(&self, name: &str, target: Target, enabled: bool) -> Result<TopicId, LoggerError> {
        self.state().topics.add(name, target, enabled)
    }

    pub fn topic_get_id(&self, name: &str) -> Option<TopicId> {
        self.state().topics.get_id(name)
    }

    pub fn topic_enable(&self, name: &str) -> Result<(), LoggerError> {
        self.state().topics.set_enabled(name, true)
    }

    pub fn topic_disable(&self, name: &str) -> Result<(), LoggerError> {
        self.state().topics.set_enabled(name, false)
    }

    pub fn topic_enable_all(&self) -> Result<(), LoggerError> {
        self.state().topics.set_all_enabled(true)
    }

    pub fn topic_disable_all(&self) -> Result<(), LoggerError> {
        self.state().topics.set_all_enabled(false)
    }

    pub fn topic_level_set(&self, name: &str, level: Level) -> Result<(), LoggerError> {
        let mut state = self.state();
        check_level(&state.config, level)?;
        state.topics.set_level(name, level)
    }

    pub fn topic_remove(&self, name: &str) -> Result<(), LoggerError> {
        self.state().topics.remove(name)
    }

    /// Installs the prefix function. It may log; those calls are delivered
    /// normally.
    pub fn prefix_set_fn<F>(&self, prefix_fn: F) -> Result<(), LoggerError>
    where
        F: Fn(&Event<'_>) -> String + Send + Sync + 'static,
    {
        self.state().prefix_fn = Some(Arc::new(prefix_fn));
        Ok(())
    }

    /// Installs or removes the dispatch lock hook.
    pub fn lock_set(&self, lock: Option<Arc<dyn Lock>>) -> Result<(), LoggerError> {
        self.state().lock = lock;
        Ok(())
    }

    pub fn color_config(&self, enabled: bool) -> Result<(), LoggerError> {
        self.state().config.color = enabled;
        Ok(())
    }

    pub fn time_config(&self, enabled: bool) -> Result<(), LoggerError> {
        self.state().config.time = enabled;
        Ok(())
    }

    pub fn prefix_config(&self, enabled: bool) -> Result<(), LoggerError> {
        self.state().config.prefix = enabled;
        Ok(())
    }

    pub fn source_location_config(&self, enabled: bool) -> Result<(), LoggerError> {
        self.state().config.source_location = enabled;
        Ok(())
    }

    /// Shows or hides topic names. Topic filtering stays in effect.
    pub fn topic_config(&self, enabled: bool) -> Result<(), LoggerError> {
        let mut state = self.state();
        if !state.config.topics_mode.is_enabled() {
            return Err(LoggerError::Disabled);
        }
        state.config.topics = enabled;
        Ok(())
    }

    pub fn level_config(&self, style: LevelStyle) -> Result<(), LoggerError> {
        self.level_set_new_levels(LevelDescriptor::from_style(style))
    }

    pub fn level_set_new_levels(&self, levels: LevelDescriptor) -> Result<(), LoggerError> {
        levels.validate()?;
        self.state().config.levels = levels;
        Ok(())
    }

    pub fn level_reset_levels(&self) -> Result<(), LoggerError> {
        self.level_set_new_levels(LevelDescriptor::DEFAULT)
    }

    pub fn level_to_string(&self, level: Level) -> &'static str {
        self.state().config.levels.name(level)
    }

    /// The current configuration.
    pub fn config(&self) -> Result<Config, LoggerError> {
        Ok(self.state().config.clone())
    }

    /// Removes every extra output, every topic and the prefix function, and
    /// resets the console level to `Config::level`.
    ///
    /// The console writer, quiet mode, the lock hook and the display
    /// switches are kept; reset them with their own setters.
    pub fn cleanup(&self) -> Result<(), LoggerError> {
        let mut state = self.state();
        let level = state.config.level;
        state.outputs.clear(level);
        state.topics.clear();
        state.prefix_fn = None;
        Ok(())
    }

    /// Logs a panic event at `FATAL`.
    ///
    /// # Arguments
    ///
    /// * `payload` - The panic payload.
    /// * `location` - Where the panic happened, if known.
    pub fn send_panic(&self, payload: &(dyn std::any::Any + Send), location: Option<&std::panic::Location<'_>>) {
        let message = match payload.downcast_ref::<&str>() {
            Some(s) => s.to_string(),
            None => match payload.downcast_ref::<String>() {
                Some(s) => s.clone(),
                None => "Panic with unknown payload".to_string(),
            },
        };

        let (file, line) = location.map_or(("<unknown>", 0), |l| (l.file(), l.line()));
        self.log(
            Target::All, Level::FATAL, file, line, None,
            format_args!("PANIC at '{}:{}': {}", file, line, message),
        );
    }

    /// All panics after this call will be logged.
    pub fn log_panics(&'static self) {
        std::panic::set_hook(Box::new(move |info| {
            self.send_panic(info.payload(), info.location());
        }));
    }
}

fn check_level(config: &Config, level: Level) -> Result<(), LoggerError> {
    if config.levels.contains(level) {
        Ok(())
    } else {
        Err(LoggerError::InvalidArgument)
    }
}

fn truncate(mut prefix: String, max_chars: usize) -> String {
    if let Some((index, _)) = prefix.char_indices().nth(max_chars) {
        prefix.truncate(index);
    }
    prefix
}
