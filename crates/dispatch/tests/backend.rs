//! Dispatcher driven over a real main loop against a scripted backend.

use std::sync::Arc;

use cellfmt_dispatch::{Buffer, FailureLog, FormatDispatcher, Selection, TextBuffer};
use cellfmt_protocol::{Envelope, FormatReply, ReplyError};
use cellfmt_rpc::{Error, JsonLines, MainLoop};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

/// Reads `count` requests, then answers them in reverse order.
async fn reverse_order_backend(io: DuplexStream, count: usize) {
	let (read, mut write) = tokio::io::split(io);
	let mut lines = BufReader::new(read).lines();

	let mut requests = Vec::new();
	while requests.len() < count {
		let line = lines.next_line().await.unwrap().unwrap();
		requests.push(serde_json::from_str::<Envelope>(&line).unwrap());
	}

	for request in requests.iter().rev() {
		let code = request.content["code"].as_str().unwrap();
		let content = match code {
			"func f(){return 1}" => serde_json::to_value(FormatReply::ok("func f() { return 1 }\n")).unwrap(),
			_ => serde_json::json!({ "status": "fail" }),
		};
		let reply = request.reply_to(format!("r-{}", request.header.msg_id), content);
		let mut line = serde_json::to_vec(&reply).unwrap();
		line.push(b'\n');
		write.write_all(&line).await.unwrap();
	}
	write.flush().await.unwrap();
}

fn cells(texts: &[&str]) -> Vec<Arc<TextBuffer>> {
	texts
		.iter()
		.enumerate()
		.map(|(i, text)| Arc::new(TextBuffer::new(format!("cell-{}", i + 1), *text)))
		.collect()
}

fn selection(cells: &[Arc<TextBuffer>]) -> Selection {
	Selection::new(cells.iter().map(|c| Arc::clone(c) as Arc<dyn Buffer>).collect())
}

#[tokio::test]
async fn ok_reply_formats_and_failed_reply_leaves_cell() {
	let (client_io, backend_io) = tokio::io::duplex(64 * 1024);
	let (client_read, client_write) = tokio::io::split(client_io);
	let (main_loop, socket) = MainLoop::new(JsonLines::with_session("it"));

	let cells = cells(&["func f(){return 1}", "func g(){return 2}"]);
	let failures = Arc::new(FailureLog::new());
	let dispatcher = FormatDispatcher::new(selection(&cells), socket).with_reporter(failures.clone());

	let backend = tokio::spawn(reverse_order_backend(backend_io, 2));
	assert_eq!(dispatcher.format_selection(), 2);
	drop(dispatcher);

	main_loop.run_buffered(client_read, client_write).await.unwrap();
	backend.await.unwrap();

	assert_eq!(cells[0].text(), "func f() { return 1 }\n");
	assert_eq!(cells[1].text(), "func g(){return 2}");

	let failures = failures.take_pending();
	assert_eq!(failures.len(), 1);
	assert_eq!(failures[0].buffer, "cell-2");
	assert!(matches!(&failures[0].error, ReplyError::Status { status, .. } if status == "fail"));
}

#[tokio::test]
async fn backend_exit_reports_every_pending_cell() {
	let (client_io, backend_io) = tokio::io::duplex(64 * 1024);
	let (client_read, client_write) = tokio::io::split(client_io);
	let (main_loop, socket) = MainLoop::new(JsonLines::with_session("it"));

	let cells = cells(&["a", "b"]);
	let failures = Arc::new(FailureLog::new());
	let dispatcher = FormatDispatcher::new(selection(&cells), socket).with_reporter(failures.clone());
	dispatcher.format_selection();

	let backend = tokio::spawn(async move {
		let (read, _write) = tokio::io::split(backend_io);
		let mut lines = BufReader::new(read).lines();
		lines.next_line().await.unwrap();
		lines.next_line().await.unwrap();
	});

	let result = main_loop.run_buffered(client_read, client_write).await;
	backend.await.unwrap();

	assert!(matches!(result, Err(Error::Eof { pending: 2 })), "got {result:?}");
	assert_eq!(cells[0].text(), "a");
	assert_eq!(cells[1].text(), "b");

	let mut errors: Vec<_> = failures.take_pending().into_iter().map(|f| (f.buffer, f.error)).collect();
	errors.sort_by(|a, b| a.0.cmp(&b.0));
	assert_eq!(
		errors,
		vec![("cell-1".to_string(), ReplyError::Absent), ("cell-2".to_string(), ReplyError::Absent)]
	);
}
