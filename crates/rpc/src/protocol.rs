//! Protocol abstraction for wire formats and message correlation.

use std::fmt::Debug;
use std::hash::Hash;

use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::Result;

/// Simple counter-based ID generator for protocols.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterIdGen(pub u64);

impl CounterIdGen {
	/// Creates a new counter starting at 0.
	#[must_use]
	pub const fn new() -> Self {
		Self(0)
	}

	/// Generates the next unique ID and increments the counter.
	#[allow(clippy::should_implement_trait, reason = "convention")]
	pub fn next(&mut self) -> u64 {
		let id = self.0;
		self.0 += 1;
		id
	}
}

/// Protocol binding between the main loop and a concrete message format.
pub trait Protocol: Send + 'static {
	/// Identifier correlating a reply with its request.
	type Id: Eq + Hash + Clone + Debug + Send + 'static;

	/// The wire message type.
	type Message: Send + 'static;

	/// Generate the next unique request ID.
	fn next_id(&mut self) -> Self::Id;

	/// Read the next message from the input stream.
	///
	/// Returns `Ok(None)` at end of stream. Must be cancel safe: a read
	/// interrupted by another `select!` branch resumes where it stopped.
	fn read_message(
		&mut self,
		input: &mut (impl AsyncBufRead + Unpin + Send),
	) -> impl std::future::Future<Output = Result<Option<Self::Message>>> + Send;

	/// Write a message to the output stream.
	///
	/// Takes no codec state: writes run on their own future, concurrently
	/// with [`Protocol::read_message`].
	fn write_message(
		output: &mut (impl AsyncWrite + Unpin + Send),
		msg: &Self::Message,
	) -> impl std::future::Future<Output = Result<()>> + Send;

	/// Wrap a request payload into a wire message.
	fn wrap_request(&self, id: Self::Id, kind: &str, payload: JsonValue) -> Self::Message;

	/// ID of the request an inbound message answers, or `None` if it is not a reply.
	fn reply_id(msg: &Self::Message) -> Option<Self::Id>;

	/// Convert an inbound reply into the value handed to the reply callback.
	fn into_reply(msg: Self::Message) -> JsonValue;
}
