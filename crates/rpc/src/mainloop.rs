//! Message pump pairing backend replies with pending requests.

use std::collections::HashMap;
use std::ops::ControlFlow;

use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::channel::OnReply;
use crate::protocol::Protocol;
use crate::socket::{MainLoopEvent, PeerSocket};
use crate::{Error, Result};

/// Main loop driving one backend connection.
///
/// Requests queued on any [`PeerSocket`] are written to the backend in
/// submission order while replies are read concurrently. Each inbound reply
/// is routed to the callback of the request it answers, so replies may come
/// back in any order. A reply whose request is unknown (never sent, or
/// already answered) is logged and dropped.
pub struct MainLoop<P: Protocol> {
	/// Wire format binding.
	protocol: P,
	/// Receiver for requests from sockets.
	rx: mpsc::UnboundedReceiver<MainLoopEvent>,
	/// In-flight requests awaiting replies.
	pending: HashMap<P::Id, OnReply>,
}

impl<P: Protocol> std::fmt::Debug for MainLoop<P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MainLoop")
			.field("pending", &self.pending.len())
			.finish_non_exhaustive()
	}
}

impl<P: Protocol> MainLoop<P> {
	/// Creates a main loop and the socket feeding it.
	#[must_use]
	pub fn new(protocol: P) -> (Self, PeerSocket) {
		let (tx, rx) = mpsc::unbounded_channel();
		let this = Self {
			protocol,
			rx,
			pending: HashMap::new(),
		};
		(this, PeerSocket { tx })
	}

	/// Number of requests still awaiting a reply.
	pub fn pending(&self) -> usize {
		self.pending.len()
	}

	/// Shortcut to [`MainLoop::run`] wrapping `input` in a [`BufReader`].
	#[allow(clippy::missing_errors_doc, reason = "errors documented in Self::run")]
	pub async fn run_buffered(
		self,
		input: impl AsyncRead + Unpin + Send,
		output: impl AsyncWrite + Unpin + Send,
	) -> Result<()> {
		self.run(BufReader::new(input), output).await
	}

	/// Drives the connection until every socket is dropped and all in-flight
	/// requests are answered, or the backend closes its output.
	///
	/// Requests are written by a separate writer future that runs alongside
	/// the reader, so replies keep being consumed while a write waits on a
	/// full pipe. When the loop ends with requests still in flight, their
	/// callbacks are invoked with `None`.
	///
	/// # Errors
	///
	/// - `Error::Io` when `input` or `output` raises an error.
	/// - `Error::Eof` when the backend closes its output while requests are pending.
	pub async fn run(
		mut self,
		mut input: impl AsyncBufRead + Unpin + Send,
		output: impl AsyncWrite + Unpin + Send,
	) -> Result<()> {
		let (outgoing, queued) = mpsc::unbounded_channel();
		let writer = write_outgoing::<P>(queued, output);
		tokio::pin!(writer);
		let mut writing = true;
		let mut accepting = true;

		let ret = loop {
			if !accepting && self.pending.is_empty() {
				break Ok(());
			}

			let ctl = tokio::select! {
				biased;

				event = self.rx.recv(), if accepting => match event {
					Some(event) => {
						self.dispatch_event(event, &outgoing);
						ControlFlow::Continue(())
					}
					None => {
						debug!(pending = self.pending.len(), "rpc.sockets.closed");
						accepting = false;
						ControlFlow::Continue(())
					}
				},

				written = &mut writer, if writing => {
					writing = false;
					match written {
						Ok(()) => ControlFlow::Continue(()),
						Err(error) => ControlFlow::Break(Err(error)),
					}
				},

				msg = self.protocol.read_message(&mut input) => match msg {
					Ok(Some(msg)) => {
						self.dispatch_message(msg);
						ControlFlow::Continue(())
					}
					Ok(None) if self.pending.is_empty() => ControlFlow::Break(Ok(())),
					Ok(None) => ControlFlow::Break(Err(Error::Eof {
						pending: self.pending.len(),
					})),
					Err(Error::Deserialize(error)) => {
						warn!(%error, "rpc.message.undecodable");
						ControlFlow::Continue(())
					}
					Err(error) => ControlFlow::Break(Err(error)),
				},
			};

			if let ControlFlow::Break(ret) = ctl {
				break ret;
			}
		};

		self.abandon_pending();
		drop(outgoing);
		// On success the queue is drained and the writer only shuts the output
		// down. After a failure it may be blocked on a full pipe.
		if ret.is_ok() && writing {
			if let Err(error) = writer.await {
				debug!(%error, "rpc.output.shutdown_failed");
			}
		}
		ret
	}

	/// Records an outgoing request and queues it for the writer.
	fn dispatch_event(&mut self, event: MainLoopEvent, outgoing: &mpsc::UnboundedSender<P::Message>) {
		match event {
			MainLoopEvent::Request { kind, payload, on_reply } => {
				let id = self.protocol.next_id();
				let msg = self.protocol.wrap_request(id.clone(), &kind, payload);
				if outgoing.send(msg).is_err() {
					warn!(?id, kind, "rpc.request.unwritable");
					on_reply(None);
					return;
				}
				trace!(?id, kind, "rpc.request.queued");
				let previous = self.pending.insert(id, on_reply);
				debug_assert!(previous.is_none(), "request ids must be unique");
			}
		}
	}

	/// Routes an inbound message to the callback of the request it answers.
	fn dispatch_message(&mut self, msg: P::Message) {
		let Some(id) = P::reply_id(&msg) else {
			debug!("rpc.message.ignored");
			return;
		};
		match self.pending.remove(&id) {
			Some(on_reply) => {
				trace!(?id, "rpc.reply.received");
				on_reply(Some(P::into_reply(msg)));
			}
			None => warn!(?id, "rpc.reply.unmatched"),
		}
	}

	/// Fails every request still in flight.
	fn abandon_pending(&mut self) {
		if self.pending.is_empty() {
			return;
		}
		warn!(pending = self.pending.len(), "rpc.requests.abandoned");
		for (_, on_reply) in self.pending.drain() {
			on_reply(None);
		}
	}
}

/// Writes queued requests in order, then shuts the output down once the
/// queue is closed.
async fn write_outgoing<P: Protocol>(
	mut queued: mpsc::UnboundedReceiver<P::Message>,
	mut output: impl AsyncWrite + Unpin + Send,
) -> Result<()> {
	while let Some(msg) = queued.recv().await {
		P::write_message(&mut output, &msg).await?;
	}
	output.shutdown().await?;
	Ok(())
}
