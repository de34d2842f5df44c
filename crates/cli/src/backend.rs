//! Formatter backend process.

use std::process::Stdio;

use anyhow::Context;
use cellfmt_config::BackendConfig;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

/// A spawned backend speaking the formatting protocol on stdin/stdout.
pub struct Backend {
	child: Child,
}

impl Backend {
	/// Spawns the configured backend command, returning its stdin and stdout.
	pub fn spawn(config: &BackendConfig) -> anyhow::Result<(Self, ChildStdin, ChildStdout)> {
		let command = config
			.command
			.as_deref()
			.context("no formatter backend configured; pass --backend or set backend.command")?;

		let mut child = Command::new(command)
			.args(&config.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::inherit())
			.kill_on_drop(true)
			.spawn()
			.with_context(|| format!("failed to spawn formatter backend `{command}`"))?;

		let stdin = child.stdin.take().context("failed to capture backend stdin")?;
		let stdout = child.stdout.take().context("failed to capture backend stdout")?;
		info!(command, pid = child.id(), "backend.spawned");

		Ok((Self { child }, stdin, stdout))
	}

	/// Waits for the backend to exit after its stdin is closed.
	pub async fn wait(mut self) {
		match self.child.wait().await {
			Ok(status) => debug!(%status, "backend.exited"),
			Err(error) => debug!(%error, "backend.wait_failed"),
		}
	}
}
