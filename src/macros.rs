//! Logging macros.
//!
//! Every macro logs through the global [`logger()`](crate::logger) unless the
//! call starts with `logger: <expr>,`. File and line of the call site are
//! recorded.

/// Logs at an explicit level.
///
/// ```no_run
/// microlog::ulog_log!(microlog::Level::INFO, "answer is {}", 42);
/// ```
#[macro_export]
macro_rules! ulog_log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::Target::All,
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::None,
            ::core::format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::ulog_log!(logger: $crate::logger(), $level, $($arg)+)
    };
}

/// Logs at an explicit level under a topic. Unknown topics are dropped.
#[macro_export]
macro_rules! ulog_topic_log {
    (logger: $logger:expr, $level:expr, $topic:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::Target::All,
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::Some($topic),
            ::core::format_args!($($arg)+),
        )
    };
    ($level:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $crate::logger(), $level, $topic, $($arg)+)
    };
}

/// Logs to a single output.
#[macro_export]
macro_rules! ulog_output_log {
    (logger: $logger:expr, $output:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::Target::from($output),
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::None,
            ::core::format_args!($($arg)+),
        )
    };
    ($output:expr, $level:expr, $($arg:tt)+) => {
        $crate::ulog_output_log!(logger: $crate::logger(), $output, $level, $($arg)+)
    };
}

/// Logs to a single output under a topic. Nothing is written when the topic
/// is bound to a different output.
#[macro_export]
macro_rules! ulog_topic_output_log {
    (logger: $logger:expr, $output:expr, $level:expr, $topic:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::Target::from($output),
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::Some($topic),
            ::core::format_args!($($arg)+),
        )
    };
    ($output:expr, $level:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_output_log!(logger: $crate::logger(), $output, $level, $topic, $($arg)+)
    };
}

#[macro_export]
macro_rules! ulog_trace {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::TRACE, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::TRACE, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_debug {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::DEBUG, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::DEBUG, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_info {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::INFO, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::INFO, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_warn {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::WARN, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::WARN, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_error {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::ERROR, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::ERROR, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_fatal {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::ulog_log!(logger: $logger, $crate::Level::FATAL, $($arg)+) };
    ($($arg:tt)+) => { $crate::ulog_log!($crate::Level::FATAL, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_trace {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::TRACE, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::TRACE, $topic, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_debug {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::DEBUG, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::DEBUG, $topic, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_info {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::INFO, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::INFO, $topic, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_warn {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::WARN, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::WARN, $topic, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_error {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::ERROR, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::ERROR, $topic, $($arg)+) };
}

#[macro_export]
macro_rules! ulog_topic_fatal {
    (logger: $logger:expr, $topic:expr, $($arg:tt)+) => {
        $crate::ulog_topic_log!(logger: $logger, $crate::Level::FATAL, $topic, $($arg)+)
    };
    ($topic:expr, $($arg:tt)+) => { $crate::ulog_topic_log!($crate::Level::FATAL, $topic, $($arg)+) };
}
