//! The build-process logger contract and a simple in-memory sink.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while forwarding an event to a sink.
///
/// Sinks backed by files or sockets surface their I/O failures here;
/// purpose-built sinks can report anything else through `Sink`.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("build log I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("build log sink failed: {message}")]
    Sink { message: String },
}

impl LogError {
    pub fn sink(message: impl Into<String>) -> Self {
        LogError::Sink {
            message: message.into(),
        }
    }
}

/// Sink for path-level build events.
///
/// Implementations persist (or forward) the facts a build emits: output
/// paths deleted before a step, files compiled by a builder. The
/// [`BatchLogger`](crate::BatchLogger) decorator implements this same
/// contract, so it drops in front of any sink.
pub trait BuildProcessLogger {
    /// Whether the sink records anything at all. Callers may skip event
    /// assembly entirely when this is false.
    fn is_enabled(&self) -> bool;

    /// Record that `paths` were deleted, in order.
    fn log_deleted_paths(&mut self, paths: &[String]) -> Result<(), LogError>;

    /// Record that `builder_id` compiled `files`, in order, with a
    /// free-form `description` of the step.
    fn log_compiled_paths(
        &mut self,
        files: &[PathBuf],
        builder_id: &str,
        description: &str,
    ) -> Result<(), LogError>;

    /// Everything recorded so far, rendered as text.
    fn get_collected_data(&mut self) -> Result<String, LogError>;
}

/// In-memory sink: one line per recorded fact.
///
/// Deleted paths render as `deleted <path>`, compiled files as
/// `compiled [<builder_id>] <file>`; a non-empty description follows its
/// compile lines as-is. Used by driver tests and as the default sink for
/// in-process builds.
#[derive(Debug)]
pub struct MemoryLogger {
    enabled: bool,
    lines: Vec<String>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        MemoryLogger {
            enabled: true,
            lines: Vec::new(),
        }
    }

    /// A sink that ignores every event.
    pub fn disabled() -> Self {
        MemoryLogger {
            enabled: false,
            lines: Vec::new(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildProcessLogger for MemoryLogger {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn log_deleted_paths(&mut self, paths: &[String]) -> Result<(), LogError> {
        if self.enabled {
            for path in paths {
                self.lines.push(format!("deleted {path}"));
            }
        }
        Ok(())
    }

    fn log_compiled_paths(
        &mut self,
        files: &[PathBuf],
        builder_id: &str,
        description: &str,
    ) -> Result<(), LogError> {
        if self.enabled {
            for file in files {
                self.lines
                    .push(format!("compiled [{builder_id}] {}", display_path(file)));
            }
            if !description.is_empty() {
                self.lines.push(description.to_owned());
            }
        }
        Ok(())
    }

    fn get_collected_data(&mut self) -> Result<String, LogError> {
        Ok(self.lines.join("\n"))
    }
}

/// Forward-slash rendering, so collected data is stable across platforms.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
