//! Event batching in front of a build-process logger.
//!
//! While a batch is open, successive same-kind events are merged instead of
//! hitting the sink one by one: deleted-path events concatenate their path
//! lists, compiled-path events concatenate files per builder identity.
//! Merging only ever targets the most recent pending event, so chronological
//! order is preserved and each incoming event costs O(1).
//!
//! When the batch stops, pending events are flushed to the delegate in the
//! order they accumulated. The pending buffer is moved out before the flush
//! loop runs, so a failing delegate call can never leave stale events behind
//! to be re-flushed later.

use std::mem;
use std::path::PathBuf;

use crate::logger::{BuildProcessLogger, LogError};

/// An accumulated, not-yet-flushed event.
#[derive(Debug)]
enum PostponedEvent {
    Deleted {
        paths: Vec<String>,
    },
    Compiled {
        files: Vec<PathBuf>,
        builder_id: String,
        description: String,
    },
}

impl PostponedEvent {
    /// Try to fold `incoming` into `self`. Returns false when the two are
    /// not mergeable (different kinds, or different builder identities),
    /// leaving both untouched.
    fn try_merge(&mut self, incoming: &mut PostponedEvent) -> bool {
        match (self, incoming) {
            (
                PostponedEvent::Deleted { paths },
                PostponedEvent::Deleted {
                    paths: incoming_paths,
                },
            ) => {
                paths.append(incoming_paths);
                true
            }
            (
                PostponedEvent::Compiled {
                    files,
                    builder_id,
                    description,
                },
                PostponedEvent::Compiled {
                    files: incoming_files,
                    builder_id: incoming_builder,
                    description: incoming_description,
                },
            ) => {
                // Events from different builders stay separate log entries.
                if builder_id != incoming_builder {
                    return false;
                }
                files.append(incoming_files);
                // Suffix check, not equality: repeated identical descriptions
                // collapse to one, anything else is appended on its own line.
                if !description.ends_with(incoming_description.as_str()) {
                    description.push('\n');
                    description.push_str(incoming_description);
                }
                true
            }
            _ => false,
        }
    }

    /// Replay the accumulated event against the real sink.
    fn flush_to(self, target: &mut dyn BuildProcessLogger) -> Result<(), LogError> {
        match self {
            PostponedEvent::Deleted { paths } => target.log_deleted_paths(&paths),
            PostponedEvent::Compiled {
                files,
                builder_id,
                description,
            } => target.log_compiled_paths(&files, &builder_id, &description),
        }
    }
}

/// Coalescing decorator over a [`BuildProcessLogger`].
///
/// The driver opens a batch around a logical build step group with
/// [`start_batch`](BatchLogger::start_batch); events logged while the batch
/// is open accumulate and merge, and [`stop_batch`](BatchLogger::stop_batch)
/// flushes them. Outside a batch (or when the delegate is disabled) every
/// call passes straight through.
///
/// At most one event is ever open for merging: `open` holds the trailing
/// accumulator and `closed` the events that can no longer change. Not
/// thread-safe; the owning build-sequencing thread makes all calls.
#[derive(Debug)]
pub struct BatchLogger<L> {
    delegate: L,
    batch_active: bool,
    closed: Vec<PostponedEvent>,
    open: Option<PostponedEvent>,
}

impl<L: BuildProcessLogger> BatchLogger<L> {
    pub fn new(delegate: L) -> Self {
        BatchLogger {
            delegate,
            batch_active: false,
            closed: Vec::new(),
            open: None,
        }
    }

    /// Open a batch. Calling this while a batch is already open is a no-op
    /// re-affirmation; pending events are kept.
    pub fn start_batch(&mut self) {
        self.batch_active = true;
    }

    /// Close the batch and flush every pending event, in order, to the
    /// delegate.
    ///
    /// The pending buffer is taken before the flush loop, so it is cleared
    /// even when a delegate call fails; the first failure aborts the loop
    /// and propagates.
    pub fn stop_batch(&mut self) -> Result<(), LogError> {
        self.batch_active = false;
        let closed = mem::take(&mut self.closed);
        let open = self.open.take();

        let mut flushed = 0usize;
        for event in closed.into_iter().chain(open) {
            event.flush_to(&mut self.delegate)?;
            flushed += 1;
        }
        if flushed > 0 {
            tracing::debug!(events = flushed, "flushed batched build events");
        }
        Ok(())
    }

    /// The wrapped sink.
    pub fn delegate(&self) -> &L {
        &self.delegate
    }

    /// Unwrap, dropping any pending events. Callers that care flush with
    /// [`stop_batch`](BatchLogger::stop_batch) first.
    pub fn into_inner(self) -> L {
        self.delegate
    }

    fn buffering(&self) -> bool {
        self.batch_active && self.delegate.is_enabled()
    }

    /// Merge into the trailing accumulator, or roll it into `closed` and
    /// open a fresh one.
    fn push_event(&mut self, mut event: PostponedEvent) {
        if let Some(open) = &mut self.open {
            if open.try_merge(&mut event) {
                return;
            }
            let full = mem::replace(open, event);
            self.closed.push(full);
        } else {
            self.open = Some(event);
        }
    }
}

impl<L: BuildProcessLogger> BuildProcessLogger for BatchLogger<L> {
    fn is_enabled(&self) -> bool {
        self.delegate.is_enabled()
    }

    fn log_deleted_paths(&mut self, paths: &[String]) -> Result<(), LogError> {
        if self.buffering() {
            self.push_event(PostponedEvent::Deleted {
                paths: paths.to_vec(),
            });
            Ok(())
        } else {
            self.delegate.log_deleted_paths(paths)
        }
    }

    fn log_compiled_paths(
        &mut self,
        files: &[PathBuf],
        builder_id: &str,
        description: &str,
    ) -> Result<(), LogError> {
        if self.buffering() {
            self.push_event(PostponedEvent::Compiled {
                files: files.to_vec(),
                builder_id: builder_id.to_owned(),
                description: description.to_owned(),
            });
            Ok(())
        } else {
            self.delegate
                .log_compiled_paths(files, builder_id, description)
        }
    }

    /// Reads force an implicit [`stop_batch`](BatchLogger::stop_batch), so
    /// the returned data reflects everything still buffered.
    fn get_collected_data(&mut self) -> Result<String, LogError> {
        self.stop_batch()?;
        self.delegate.get_collected_data()
    }
}
