//! Formats editor buffers through an asynchronous formatting backend.
//!
//! The host supplies two collaborators:
//! * a [`BufferSource`] returning the currently selected [`Buffer`]s
//! * a [`RequestChannel`] delivering requests to the backend
//!
//! [`FormatDispatcher::format_selection`] sends one request per selected
//! buffer and returns immediately. Each reply is applied to the buffer that
//! produced its request, and only when the backend reports success; every
//! other outcome leaves the buffer untouched and goes to a
//! [`FailureReporter`].
//!
//! [`FormatExtension`] wires the dispatcher to a host toolbar through an
//! [`ActionRegistry`].
//!
//! ```ignore
//! let (main_loop, socket) = MainLoop::new(JsonLines::new());
//! let dispatcher = Arc::new(FormatDispatcher::new(selection, socket));
//! let extension = FormatExtension::new(&actions, config.action.clone(), dispatcher);
//! extension.on_load();
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod buffer;
pub mod dispatcher;
pub mod extension;
pub mod report;

pub use action::{Action, ActionHandler, ActionRegistry, ActionTable};
pub use buffer::{Buffer, BufferSource, Selection, TextBuffer};
pub use cellfmt_rpc::RequestChannel;
pub use dispatcher::FormatDispatcher;
pub use extension::FormatExtension;
pub use report::{FailureLog, FailureReporter, FormatFailure, NoOpReporter, SharedReporter};
