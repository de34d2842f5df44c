//! Files opened as format buffers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cellfmt_dispatch::Buffer;
use parking_lot::Mutex;

/// A file loaded into memory; written back only on request.
#[derive(Debug)]
pub struct FileBuffer {
	path: PathBuf,
	original: String,
	text: Mutex<String>,
}

impl FileBuffer {
	/// Reads `path` into a buffer.
	pub fn open(path: &Path) -> anyhow::Result<Self> {
		let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
		Ok(Self::with_text(path.to_path_buf(), text))
	}

	/// Creates a buffer for `path` holding `text`.
	pub fn with_text(path: PathBuf, text: String) -> Self {
		Self {
			path,
			original: text.clone(),
			text: Mutex::new(text),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns true if the text differs from what was read.
	pub fn changed(&self) -> bool {
		*self.text.lock() != self.original
	}

	/// Writes the text back if it changed. Returns true if the file was written.
	pub fn save(&self) -> anyhow::Result<bool> {
		if !self.changed() {
			return Ok(false);
		}
		let text = self.text.lock().clone();
		std::fs::write(&self.path, text).with_context(|| format!("failed to write {}", self.path.display()))?;
		Ok(true)
	}
}

impl Buffer for FileBuffer {
	fn text(&self) -> String {
		self.text.lock().clone()
	}

	fn set_text(&self, text: String) {
		*self.text.lock() = text;
	}

	fn label(&self) -> String {
		self.path.display().to_string()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn unchanged_buffer_is_not_saved() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a.go");
		std::fs::write(&path, "x := 1\n").unwrap();

		let buffer = FileBuffer::open(&path).unwrap();
		buffer.set_text("x := 1\n".into());
		assert!(!buffer.changed());
		assert!(!buffer.save().unwrap());
	}

	#[test]
	fn changed_buffer_is_written_back() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a.go");
		std::fs::write(&path, "x:=1").unwrap();

		let buffer = FileBuffer::open(&path).unwrap();
		assert_eq!(buffer.label(), path.display().to_string());
		buffer.set_text("x := 1\n".into());
		assert!(buffer.changed());
		assert!(buffer.save().unwrap());
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "x := 1\n");
	}

	#[test]
	fn open_missing_file_fails_with_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.go");
		let err = FileBuffer::open(&path).unwrap_err();
		assert!(err.to_string().contains("missing.go"), "got {err}");
	}
}
