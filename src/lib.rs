#![cfg_attr(docsrs, feature(doc_cfg))]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
//! <br><br>
//!
//! ## You're probably looking for:
//! * [`logger`](logger) and the [`ulog_info!`](ulog_info) family of macros
//! * [`Logger`](Logger)
//! * [`Config`](Config)

#[macro_use]
mod macros;

pub mod prelude;
pub mod error;
pub mod batch;
pub mod bridge;
pub mod syslog;
pub(crate) mod config;
pub(crate) mod event;
pub(crate) mod levels;
pub(crate) mod output;
pub(crate) mod package;
pub(crate) mod sync;
pub(crate) mod topic;

pub use prelude::{
    logger, Config, Event, FileOutput, Layout, Level, LevelDescriptor, LevelStyle, Lock,
    Logger, LoggerError, Output, OutputId, PrefixFn, Target, TopicId, TopicsMode,
};
pub use batch::{BatchHandle, BatchOutput, Setup, Sink, WriterSink};
pub use bridge::{init_log_bridge, LogBridge};
pub use config::{DEFAULT_EXTRA_OUTPUTS, DEFAULT_PREFIX_SIZE};
pub use levels::LEVELS_TOTAL;
pub use package::{BuildOptions, PackageInfo, Requirement, PACKAGE};
