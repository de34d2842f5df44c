use std::sync::Arc;

use cellfmt_rpc::OnReply;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value as JsonValue, json};

use super::*;
use crate::action::ActionTable;
use crate::buffer::{Buffer, Selection, TextBuffer};

#[derive(Default)]
struct Recorder {
	sent: Mutex<Vec<(JsonValue, OnReply)>>,
}

impl RequestChannel for Recorder {
	fn send(&self, _kind: &str, payload: JsonValue, on_reply: OnReply) {
		self.sent.lock().push((payload, on_reply));
	}
}

fn extension_over(
	buffers: Vec<Arc<dyn Buffer>>,
) -> (Arc<ActionTable>, Arc<Recorder>, FormatExtension<Arc<ActionTable>>) {
	let table = Arc::new(ActionTable::new());
	let channel = Arc::new(Recorder::default());
	let dispatcher = Arc::new(FormatDispatcher::new(Selection::new(buffers), Arc::clone(&channel)));
	let extension = FormatExtension::new(Arc::clone(&table), ActionConfig::default(), dispatcher);
	(table, channel, extension)
}

#[test]
fn nothing_is_registered_before_load() {
	let (table, _channel, extension) = extension_over(Vec::new());
	assert_eq!(extension.action_name(), None);
	assert!(table.toolbar_groups().is_empty());
}

#[test]
fn load_registers_action_and_toolbar_button() {
	let (table, _channel, extension) = extension_over(Vec::new());

	assert_eq!(extension.on_load(), "lgo-kernel:format-code");
	assert_eq!(extension.action_name(), Some("lgo-kernel:format-code"));

	let action = table.get("lgo-kernel:format-code").unwrap();
	assert_eq!(action.help, "Format Go");
	assert_eq!(action.icon, "fa-align-left");
	assert_eq!(table.toolbar_groups(), vec![vec!["lgo-kernel:format-code".to_string()]]);
}

#[test]
fn load_is_idempotent() {
	let (table, _channel, extension) = extension_over(Vec::new());
	extension.on_load();
	extension.on_load();
	assert_eq!(table.toolbar_groups().len(), 1);
}

#[test]
fn invoking_the_action_formats_the_selection() {
	let buffer = Arc::new(TextBuffer::new("cell", "x:=1"));
	let (table, channel, extension) = extension_over(vec![buffer.clone() as Arc<dyn Buffer>]);
	let name = extension.on_load().to_string();

	assert!(table.invoke(&name));

	let (payload, on_reply) = channel.sent.lock().pop().unwrap();
	assert_eq!(payload, json!({ "code": "x:=1" }));
	on_reply(Some(json!({ "content": { "status": "ok", "code": "x := 1\n" } })));
	assert_eq!(buffer.text(), "x := 1\n");
}

#[test]
fn custom_action_config_is_honored() {
	let table = ActionTable::new();
	let dispatcher = Arc::new(FormatDispatcher::new(Selection::default(), Recorder::default()));
	let config = ActionConfig {
		prefix: "go".into(),
		name: "fmt".into(),
		label: "gofmt".into(),
		icon: "fa-magic".into(),
	};
	let extension = FormatExtension::new(&table, config, dispatcher);

	assert_eq!(extension.on_load(), "go:fmt");
	assert_eq!(table.get("go:fmt").unwrap().icon, "fa-magic");
}
