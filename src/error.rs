use std::fmt::Formatter;
use tokio::sync::mpsc::error::SendError;
use crate::batch::BatchMessage;

pub enum LoggerError {
    InvalidArgument,
    NotFound,
    Disabled,
    OutputsFull,
    TopicsFull,
    ProtectedOutput,
    Busy,
    Poisoned,
    Closed,
    Io(std::io::Error),
    SendError(SendError<BatchMessage>),
    Bridge(log::SetLoggerError),
    InvalidRequirement(String),
    PackageMismatch { required: String, provided: String },
    VersionMismatch { required: String, provided: String },
}

fn format_logger_error(l: &LoggerError, fmt: &mut Formatter) -> std::fmt::Result {
    match l {
        LoggerError::InvalidArgument => {
            write!(fmt, "Invalid Argument")
        }
        LoggerError::NotFound => {
            write!(fmt, "Not Found")
        }
        LoggerError::Disabled => {
            write!(fmt, "Feature Disabled")
        }
        LoggerError::OutputsFull => {
            write!(fmt, "No Free Output Slot")
        }
        LoggerError::TopicsFull => {
            write!(fmt, "No Free Topic Slot")
        }
        LoggerError::ProtectedOutput => {
            write!(fmt, "Output Cannot Be Removed")
        }
        LoggerError::Busy => {
            write!(fmt, "Busy")
        }
        LoggerError::Poisoned => {
            write!(fmt, "Poisoned")
        }
        LoggerError::Closed => {
            write!(fmt, "Worker Stopped")
        }
        LoggerError::Io(e) => {
            write!(fmt, "Io: {}", e)
        }
        LoggerError::SendError(e) => {
            write!(fmt, "SendError: {:?}", e)
        }
        LoggerError::Bridge(e) => {
            write!(fmt, "Bridge: {}", e)
        }
        LoggerError::InvalidRequirement(r) => {
            write!(fmt, "Invalid Requirement: '{}'", r)
        }
        LoggerError::PackageMismatch { required, provided } => {
            write!(fmt, "Package Mismatch: required '{}', provided '{}'", required, provided)
        }
        LoggerError::VersionMismatch { required, provided } => {
            write!(fmt, "Version Mismatch: required '{}', provided '{}'", required, provided)
        }
    }
}

impl From<SendError<BatchMessage>> for LoggerError {
    fn from(e: SendError<BatchMessage>) -> Self {
        LoggerError::SendError(e)
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> Self {
        LoggerError::Io(e)
    }
}

impl From<log::SetLoggerError> for LoggerError {
    fn from(e: log::SetLoggerError) -> Self {
        LoggerError::Bridge(e)
    }
}

impl<T> From<std::sync::PoisonError<T>> for LoggerError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        LoggerError::Poisoned
    }
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}

impl std::fmt::Debug for LoggerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}

impl std::error::Error for LoggerError {}
