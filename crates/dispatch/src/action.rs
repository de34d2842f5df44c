//! User-triggered actions and the host registry they are bound through.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

/// Handler run when an action is invoked.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// A user-invocable action.
#[derive(Clone)]
pub struct Action {
	/// Icon hint for toolbar buttons.
	pub icon: String,
	/// Human-readable label.
	pub help: String,
	/// What the action does.
	pub handler: ActionHandler,
}

impl std::fmt::Debug for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Action")
			.field("icon", &self.icon)
			.field("help", &self.help)
			.finish_non_exhaustive()
	}
}

/// Host registration point for actions.
pub trait ActionRegistry {
	/// Registers `action` as `name` under `prefix` and returns its full name.
	fn register(&self, action: Action, name: &str, prefix: &str) -> String;

	/// Adds a toolbar group holding the named actions.
	fn add_toolbar_group(&self, actions: &[String]);
}

impl<T: ActionRegistry + ?Sized> ActionRegistry for &T {
	fn register(&self, action: Action, name: &str, prefix: &str) -> String {
		(**self).register(action, name, prefix)
	}

	fn add_toolbar_group(&self, actions: &[String]) {
		(**self).add_toolbar_group(actions);
	}
}

impl<T: ActionRegistry + ?Sized> ActionRegistry for Arc<T> {
	fn register(&self, action: Action, name: &str, prefix: &str) -> String {
		(**self).register(action, name, prefix)
	}

	fn add_toolbar_group(&self, actions: &[String]) {
		(**self).add_toolbar_group(actions);
	}
}

/// In-memory action registry for hosts without their own.
#[derive(Debug, Default)]
pub struct ActionTable {
	actions: RwLock<HashMap<String, Action>>,
	toolbar: Mutex<Vec<Vec<String>>>,
}

impl ActionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs the named action. Returns false if no such action exists.
	pub fn invoke(&self, name: &str) -> bool {
		let Some(handler) = self.actions.read().get(name).map(|a| Arc::clone(&a.handler)) else {
			debug!(action = name, "action.unknown");
			return false;
		};
		handler();
		true
	}

	/// Looks up a registered action.
	pub fn get(&self, name: &str) -> Option<Action> {
		self.actions.read().get(name).cloned()
	}

	/// Toolbar groups in the order they were added.
	pub fn toolbar_groups(&self) -> Vec<Vec<String>> {
		self.toolbar.lock().clone()
	}
}

impl ActionRegistry for ActionTable {
	fn register(&self, action: Action, name: &str, prefix: &str) -> String {
		let full_name = format!("{prefix}:{name}");
		self.actions.write().insert(full_name.clone(), action);
		full_name
	}

	fn add_toolbar_group(&self, actions: &[String]) {
		self.toolbar.lock().push(actions.to_vec());
	}
}

#[cfg(test)]
mod tests;
