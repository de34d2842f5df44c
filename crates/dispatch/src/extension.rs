//! Toolbar wiring for the format action.

use std::sync::{Arc, OnceLock};

use cellfmt_config::ActionConfig;
use cellfmt_rpc::RequestChannel;
use tracing::info;

use crate::action::{Action, ActionHandler, ActionRegistry};
use crate::buffer::BufferSource;
use crate::dispatcher::FormatDispatcher;

/// Binds a [`FormatDispatcher`] to a host action and toolbar button.
pub struct FormatExtension<R> {
	registry: R,
	config: ActionConfig,
	handler: ActionHandler,
	action_name: OnceLock<String>,
}

impl<R> std::fmt::Debug for FormatExtension<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormatExtension")
			.field("config", &self.config)
			.field("action_name", &self.action_name.get())
			.finish_non_exhaustive()
	}
}

impl<R: ActionRegistry> FormatExtension<R> {
	/// Prepares the extension; nothing is registered until [`Self::on_load`].
	pub fn new<S, C>(registry: R, config: ActionConfig, dispatcher: Arc<FormatDispatcher<S, C>>) -> Self
	where
		S: BufferSource + Send + Sync + 'static,
		C: RequestChannel + Send + Sync + 'static,
	{
		let handler: ActionHandler = Arc::new(move || {
			dispatcher.format_selection();
		});
		Self {
			registry,
			config,
			handler,
			action_name: OnceLock::new(),
		}
	}

	/// Load hook: registers the action and its toolbar group.
	///
	/// Registration happens once; later calls return the same name without
	/// touching the registry. Returns the full action name.
	pub fn on_load(&self) -> &str {
		self.action_name.get_or_init(|| {
			let action = Action {
				icon: self.config.icon.clone(),
				help: self.config.label.clone(),
				handler: Arc::clone(&self.handler),
			};
			let name = self.registry.register(action, &self.config.name, &self.config.prefix);
			self.registry.add_toolbar_group(std::slice::from_ref(&name));
			info!(action = %name, "format.action.registered");
			name
		})
	}

	/// Full action name, once loaded.
	pub fn action_name(&self) -> Option<&str> {
		self.action_name.get().map(String::as_str)
	}
}

#[cfg(test)]
mod tests;
