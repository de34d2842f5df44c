use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::json;

use super::*;

#[test]
fn closed_socket_rejects_requests() {
	let socket = PeerSocket::new_closed();
	assert!(socket.is_closed());

	let called = Arc::new(AtomicBool::new(false));
	let flag = called.clone();
	let result = socket.request(
		"gofmt_request",
		json!({ "code": "" }),
		Box::new(move |_| flag.store(true, Ordering::SeqCst)),
	);

	assert!(matches!(result, Err(Error::ServiceStopped)));
	assert!(!called.load(Ordering::SeqCst), "dropped request must not be answered");
}

#[test]
fn channel_send_on_closed_socket_does_not_panic() {
	let socket = PeerSocket::new_closed();
	RequestChannel::send(&socket, "gofmt_request", json!({ "code": "" }), Box::new(|_| {}));
}
