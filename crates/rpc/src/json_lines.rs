//! Newline-delimited JSON envelopes.

use std::future::Future;

use cellfmt_protocol::Envelope;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::Result;
use crate::protocol::{CounterIdGen, Protocol};

/// One [`Envelope`] per line, request ids of the form `<session>_<n>`.
#[derive(Debug)]
pub struct JsonLines {
	session: String,
	ids: CounterIdGen,
	/// Partially read line, kept across cancelled reads.
	line: Vec<u8>,
}

impl Default for JsonLines {
	fn default() -> Self {
		Self::new()
	}
}

impl JsonLines {
	/// Creates a codec with a fresh random session id.
	pub fn new() -> Self {
		Self::with_session(uuid::Uuid::new_v4().to_string())
	}

	/// Creates a codec with a fixed session id.
	pub fn with_session(session: impl Into<String>) -> Self {
		Self {
			session: session.into(),
			ids: CounterIdGen::new(),
			line: Vec::new(),
		}
	}

	/// Session id stamped on outgoing requests.
	pub fn session(&self) -> &str {
		&self.session
	}
}

impl Protocol for JsonLines {
	type Id = String;
	type Message = Envelope;

	fn next_id(&mut self) -> String {
		format!("{}_{}", self.session, self.ids.next())
	}

	fn read_message(
		&mut self,
		input: &mut (impl AsyncBufRead + Unpin + Send),
	) -> impl Future<Output = Result<Option<Envelope>>> + Send {
		async move {
			loop {
				let read = input.read_until(b'\n', &mut self.line).await?;
				if read == 0 && self.line.is_empty() {
					return Ok(None);
				}
				let at_eof = read == 0 || !self.line.ends_with(b"\n");
				let line = std::mem::take(&mut self.line);
				let body = line.trim_ascii();
				if body.is_empty() {
					if at_eof {
						return Ok(None);
					}
					continue;
				}
				return Ok(Some(serde_json::from_slice(body)?));
			}
		}
	}

	fn write_message(
		output: &mut (impl AsyncWrite + Unpin + Send),
		msg: &Envelope,
	) -> impl Future<Output = Result<()>> + Send {
		async move {
			let mut buf = serde_json::to_vec(msg)?;
			buf.push(b'\n');
			output.write_all(&buf).await?;
			output.flush().await?;
			Ok(())
		}
	}

	fn wrap_request(&self, id: String, kind: &str, payload: JsonValue) -> Envelope {
		Envelope::request(id, kind, &self.session, payload)
	}

	fn reply_id(msg: &Envelope) -> Option<String> {
		msg.answers().map(str::to_string)
	}

	fn into_reply(msg: Envelope) -> JsonValue {
		msg.into_value()
	}
}
