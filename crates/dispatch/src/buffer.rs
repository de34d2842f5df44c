//! Host buffer abstractions.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

/// One editable text region owned by the host editor.
///
/// Buffers are shared with in-flight reply callbacks, so both operations
/// take `&self`.
pub trait Buffer: Send + Sync {
	/// Current full text.
	fn text(&self) -> String;

	/// Replaces the full text in one operation.
	fn set_text(&self, text: String);

	/// Name used in logs and failure reports.
	fn label(&self) -> String {
		String::from("buffer")
	}
}

/// Supplies the buffers a format action applies to.
pub trait BufferSource {
	/// Currently selected buffers, in selection order.
	fn selected_buffers(&self) -> Vec<Arc<dyn Buffer>>;
}

impl<T: BufferSource + ?Sized> BufferSource for Arc<T> {
	fn selected_buffers(&self) -> Vec<Arc<dyn Buffer>> {
		(**self).selected_buffers()
	}
}

/// In-memory buffer.
#[derive(Debug)]
pub struct TextBuffer {
	label: String,
	text: Mutex<String>,
	writes: AtomicU64,
}

impl TextBuffer {
	/// Creates a buffer holding `text`.
	pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			text: Mutex::new(text.into()),
			writes: AtomicU64::new(0),
		}
	}

	/// Number of `set_text` calls so far.
	pub fn writes(&self) -> u64 {
		self.writes.load(Ordering::Acquire)
	}
}

impl Buffer for TextBuffer {
	fn text(&self) -> String {
		self.text.lock().clone()
	}

	fn set_text(&self, text: String) {
		*self.text.lock() = text;
		self.writes.fetch_add(1, Ordering::AcqRel);
	}

	fn label(&self) -> String {
		self.label.clone()
	}
}

/// Mutable selection, for hosts that track the selection themselves.
#[derive(Default)]
pub struct Selection {
	buffers: RwLock<Vec<Arc<dyn Buffer>>>,
}

impl std::fmt::Debug for Selection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let labels: Vec<_> = self.buffers.read().iter().map(|b| b.label()).collect();
		f.debug_struct("Selection").field("buffers", &labels).finish()
	}
}

impl Selection {
	/// Creates a selection of `buffers`.
	pub fn new(buffers: Vec<Arc<dyn Buffer>>) -> Self {
		Self {
			buffers: RwLock::new(buffers),
		}
	}

	/// Replaces the selection.
	pub fn select(&self, buffers: Vec<Arc<dyn Buffer>>) {
		*self.buffers.write() = buffers;
	}

	/// Clears the selection.
	pub fn clear(&self) {
		self.buffers.write().clear();
	}

	/// Number of selected buffers.
	pub fn len(&self) -> usize {
		self.buffers.read().len()
	}

	/// Returns true if nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.buffers.read().is_empty()
	}
}

impl BufferSource for Selection {
	fn selected_buffers(&self) -> Vec<Arc<dyn Buffer>> {
		self.buffers.read().clone()
	}
}
