//! The request submission seam used by formatting clients.

use std::sync::Arc;

use serde_json::Value as JsonValue;

/// Reply callback for one request.
///
/// Invoked at most once. `None` means the transport gave up on the request
/// without receiving a reply.
pub type OnReply = Box<dyn FnOnce(Option<JsonValue>) + Send + 'static>;

/// Asynchronous request/reply transport.
///
/// `send` returns immediately; the reply, if any, is delivered later through
/// `on_reply`. Implementations must never invoke `on_reply` more than once.
pub trait RequestChannel {
	/// Submits a request of kind `kind` carrying `payload`.
	fn send(&self, kind: &str, payload: JsonValue, on_reply: OnReply);
}

impl<T: RequestChannel + ?Sized> RequestChannel for &T {
	fn send(&self, kind: &str, payload: JsonValue, on_reply: OnReply) {
		(**self).send(kind, payload, on_reply);
	}
}

impl<T: RequestChannel + ?Sized> RequestChannel for Arc<T> {
	fn send(&self, kind: &str, payload: JsonValue, on_reply: OnReply) {
		(**self).send(kind, payload, on_reply);
	}
}
