//! Transport errors.

use std::io;

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The main loop stopped and no longer accepts requests.
	#[error("service stopped")]
	ServiceStopped,
	/// The peer sent a message that could not be decoded.
	#[error("deserialization failed: {0}")]
	Deserialize(#[from] serde_json::Error),
	/// Input/output errors from the underlying stream.
	#[error("{0}")]
	Io(#[from] io::Error),
	/// The peer closed its end while requests were still in flight.
	#[error("the underlying channel reached EOF with {pending} request(s) in flight")]
	Eof {
		/// Number of requests left without a reply.
		pending: usize,
	},
}
