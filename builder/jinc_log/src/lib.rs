//! Build-process event logging for the jinc incremental JVM builder.
//!
//! Build steps report path-level facts — which output paths were deleted,
//! which files a builder compiled — through the [`BuildProcessLogger`]
//! contract. The persistent sink behind it can be chatty to write, so the
//! driver wraps it in a [`BatchLogger`] around each logical build step
//! group: while a batch is open, adjacent same-kind events are coalesced
//! into merged events and flushed in one pass when the batch stops.
//!
//! - [`logger`] — the [`BuildProcessLogger`] trait, [`LogError`], and the
//!   in-memory [`MemoryLogger`] sink.
//! - [`batch`] — the [`BatchLogger`] decorator.
//!
//! Single-threaded by design: one build-sequencing thread owns the logger
//! chain (see the concurrency notes on [`BatchLogger`]).

pub mod batch;
pub mod logger;

pub use batch::BatchLogger;
pub use logger::{BuildProcessLogger, LogError, MemoryLogger};
