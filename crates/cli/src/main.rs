//! cellfmt binary.
//!
//! Opens every file as a selected buffer, registers the format action, invokes
//! it once, and waits for the backend to answer every request.

mod backend;
mod file_buffer;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cellfmt_config::Config;
use cellfmt_dispatch::{
	ActionTable, Buffer, FailureLog, FormatDispatcher, FormatExtension, FormatFailure, Selection,
};
use cellfmt_rpc::{JsonLines, MainLoop};
use clap::Parser;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info};

use crate::backend::Backend;
use crate::file_buffer::FileBuffer;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "cellfmt")]
#[command(about = "Format source files through a formatting backend")]
struct Args {
	/// Files to format
	#[arg(required = true, value_name = "FILE")]
	files: Vec<PathBuf>,

	/// Configuration file (defaults to the user config directory)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Backend command, overriding the configuration
	#[arg(short, long, value_name = "CMD")]
	backend: Option<String>,

	/// Argument passed to the backend command (repeatable)
	#[arg(long = "backend-arg", value_name = "ARG", allow_hyphen_values = true)]
	backend_args: Vec<String>,

	/// Write formatted text back to the files instead of printing it
	#[arg(short, long)]
	write: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = load_config(&args)?;
	run(&args, config).await
}

/// Loads the configuration and applies the backend overrides.
///
/// `--backend` replaces the whole `[backend]` table; `--backend-arg` alone
/// replaces only the arguments of the configured command.
fn load_config(args: &Args) -> anyhow::Result<Config> {
	let mut config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::load_default().context("failed to load default configuration")?,
	};
	if let Some(command) = &args.backend {
		config.backend.command = Some(command.clone());
		config.backend.args = args.backend_args.clone();
	} else if !args.backend_args.is_empty() {
		config.backend.args = args.backend_args.clone();
	}
	config.validate()?;
	Ok(config)
}

async fn run(args: &Args, config: Config) -> anyhow::Result<ExitCode> {
	let files = args
		.files
		.iter()
		.map(|path| FileBuffer::open(path).map(Arc::new))
		.collect::<anyhow::Result<Vec<_>>>()?;

	let (backend, stdin, stdout) = Backend::spawn(&config.backend)?;
	let outcome = format_files(&config, &files, stdout, stdin).await;
	backend.wait().await;

	if let Err(error) = &outcome.transport {
		error!(%error, "backend connection failed");
	}
	for failure in &outcome.failures {
		eprintln!("cellfmt: {}: {}", failure.buffer, failure.error);
	}

	if args.write {
		save_changed(&files)?;
	} else {
		print_buffers(&files)?;
	}

	Ok(if outcome.succeeded() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

/// Result of one formatting run.
#[derive(Debug)]
struct Outcome {
	/// How the backend connection ended.
	transport: cellfmt_rpc::Result<()>,
	/// Buffers that could not be formatted.
	failures: Vec<FormatFailure>,
}

impl Outcome {
	/// True when every buffer was formatted; the exit status is non-zero otherwise.
	fn succeeded(&self) -> bool {
		self.transport.is_ok() && self.failures.is_empty()
	}
}

/// Formats `files` over a backend connection and waits for every reply.
async fn format_files(
	config: &Config,
	files: &[Arc<FileBuffer>],
	input: impl AsyncRead + Unpin + Send,
	output: impl AsyncWrite + Unpin + Send,
) -> Outcome {
	let (main_loop, socket) = MainLoop::new(JsonLines::new());

	let failures = Arc::new(FailureLog::new());
	let selection = Selection::new(files.iter().map(|f| Arc::clone(f) as Arc<dyn Buffer>).collect());
	let dispatcher = FormatDispatcher::new(selection, socket)
		.with_request_kind(config.channel.request_kind.clone())
		.with_reporter(failures.clone());

	{
		// The action table holds the last socket handle; dropping it lets the
		// main loop finish once every reply is in.
		let actions = ActionTable::new();
		let extension = FormatExtension::new(&actions, config.action.clone(), Arc::new(dispatcher));
		actions.invoke(extension.on_load());
	}

	let transport = main_loop.run_buffered(input, output).await;
	Outcome {
		transport,
		failures: failures.take_pending(),
	}
}

/// Writes back the files whose text changed. Returns how many were written.
fn save_changed(files: &[Arc<FileBuffer>]) -> anyhow::Result<usize> {
	let mut written = 0;
	for file in files {
		if file.save()? {
			info!(path = %file.path().display(), "formatted");
			written += 1;
		}
	}
	Ok(written)
}

fn print_buffers(files: &[Arc<FileBuffer>]) -> anyhow::Result<()> {
	let mut out = std::io::stdout().lock();
	for file in files {
		if files.len() > 1 {
			writeln!(out, "==> {} <==", file.path().display())?;
		}
		out.write_all(file.text().as_bytes())?;
	}
	out.flush()?;
	Ok(())
}
