//! Per-buffer failure reporting.
//!
//! Failures are always logged by the dispatcher. A [`FailureReporter`] is the
//! hook for surfacing them to the user as well, e.g. as an inline banner on
//! the affected buffer. [`FailureLog`] queues them for a presentation layer to
//! drain.

use std::sync::Arc;

use cellfmt_protocol::ReplyError;
use parking_lot::Mutex;

/// A buffer that could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFailure {
	/// Label of the affected buffer.
	pub buffer: String,
	/// What was wrong with the reply.
	pub error: ReplyError,
}

/// Receives formatting failures.
pub trait FailureReporter: Send + Sync {
	/// Called once per failed buffer, from the reply callback.
	fn report(&self, failure: FormatFailure);
}

/// Shared reporter handle.
pub type SharedReporter = Arc<dyn FailureReporter>;

/// Reporter that ignores failures beyond the dispatcher's own logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl FailureReporter for NoOpReporter {
	fn report(&self, _failure: FormatFailure) {}
}

/// Queue of failures awaiting presentation.
#[derive(Debug, Default)]
pub struct FailureLog {
	pending: Mutex<Vec<FormatFailure>>,
}

impl FailureLog {
	/// Creates an empty log.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if no failures are queued.
	pub fn is_empty(&self) -> bool {
		self.pending.lock().is_empty()
	}

	/// Number of queued failures.
	pub fn len(&self) -> usize {
		self.pending.lock().len()
	}

	/// Removes and returns all queued failures, oldest first.
	pub fn take_pending(&self) -> Vec<FormatFailure> {
		std::mem::take(&mut *self.pending.lock())
	}
}

impl FailureReporter for FailureLog {
	fn report(&self, failure: FormatFailure) {
		self.pending.lock().push(failure);
	}
}
