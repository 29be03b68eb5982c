//! Pluggable diagnostic logging for the layout engine.
//!
//! Mirrors the teacher's optional `tracing`/`tracing-subscriber` dependency pair and its
//! `tracing` cargo feature: with the feature on, [`TracingLogger`] maps each [`LogLevel`]
//! onto the matching `tracing` macro; with it off, [`StdioLogger`] is the default,
//! writing `Error`/`Warn` to stderr and everything else to stdout, matching §6's
//! specified default embedding-API behavior.
//!
//! Logging is tracing output only — cache hits/misses, which of the 11 algorithm steps
//! ran, which shortcut fired — never an error channel. See [`crate::error`] for that.

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Verbose,
}

/// A sink for the engine's diagnostic tracing.
pub trait Logger: Send + Sync {
  fn log(&self, level: LogLevel, message: &str);
}

/// Writes `Error`/`Warn` to stderr, everything else to stdout. Used when the `tracing`
/// feature is disabled, or when a caller hasn't installed a logger of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioLogger;

impl Logger for StdioLogger {
  fn log(&self, level: LogLevel, message: &str) {
    match level {
      LogLevel::Error | LogLevel::Warn => eprintln!("[{level:?}] {message}"),
      LogLevel::Info | LogLevel::Debug | LogLevel::Verbose => println!("[{level:?}] {message}"),
    }
  }
}

/// Swallows everything. Handy for tests that don't want to assert on log output or pay
/// for formatting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
  fn log(&self, _level: LogLevel, _message: &str) {}
}

#[cfg(feature = "tracing")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
  fn log(&self, level: LogLevel, message: &str) {
    match level {
      LogLevel::Error => tracing::error!("{message}"),
      LogLevel::Warn => tracing::warn!("{message}"),
      LogLevel::Info => tracing::info!("{message}"),
      LogLevel::Debug => tracing::debug!("{message}"),
      LogLevel::Verbose => tracing::trace!("{message}"),
    }
  }
}

/// The logger a fresh [`crate::context::LayoutContext`] installs by default: `TracingLogger`
/// when the `tracing` feature is enabled, `StdioLogger` otherwise.
pub fn default_logger() -> Box<dyn Logger> {
  #[cfg(feature = "tracing")]
  {
    Box::new(TracingLogger)
  }
  #[cfg(not(feature = "tracing"))]
  {
    Box::new(StdioLogger)
  }
}
