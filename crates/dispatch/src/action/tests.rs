use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting_action(count: &Arc<AtomicUsize>) -> Action {
	let count = Arc::clone(count);
	Action {
		icon: "fa-align-left".into(),
		help: "Format Go".into(),
		handler: Arc::new(move || {
			count.fetch_add(1, Ordering::SeqCst);
		}),
	}
}

#[test]
fn register_namespaces_the_action() {
	let table = ActionTable::new();
	let count = Arc::new(AtomicUsize::new(0));

	let name = table.register(counting_action(&count), "format-code", "lgo-kernel");
	assert_eq!(name, "lgo-kernel:format-code");

	let action = table.get(&name).unwrap();
	assert_eq!(action.help, "Format Go");
	assert_eq!(action.icon, "fa-align-left");
}

#[test]
fn invoke_runs_handler_each_time() {
	let table = ActionTable::new();
	let count = Arc::new(AtomicUsize::new(0));
	let name = table.register(counting_action(&count), "format-code", "lgo-kernel");

	assert!(table.invoke(&name));
	assert!(table.invoke(&name));
	assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn invoke_unknown_action_is_false() {
	let table = ActionTable::new();
	assert!(!table.invoke("nope:nothing"));
}

#[test]
fn toolbar_groups_keep_order() {
	let table = ActionTable::new();
	table.add_toolbar_group(&["a:x".to_string()]);
	table.add_toolbar_group(&["b:y".to_string(), "b:z".to_string()]);

	assert_eq!(
		table.toolbar_groups(),
		vec![vec!["a:x".to_string()], vec!["b:y".to_string(), "b:z".to_string()]]
	);
}
