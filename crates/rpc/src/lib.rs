//! Async request/reply channel to a code formatting backend.
//!
//! This crate provides the transport side of formatting:
//! * `RequestChannel`: fire-and-forget request submission with a per-request reply callback
//! * `MainLoop`: a tokio-driven message pump pairing replies with pending requests
//! * `PeerSocket`: cloneable handle feeding requests to the main loop
//! * `Protocol`: trait binding the pump to a wire format, implemented by `JsonLines`

#![warn(missing_docs)]

pub mod channel;
pub mod error;
pub mod json_lines;
pub mod mainloop;
pub mod protocol;
pub mod socket;

pub use channel::{OnReply, RequestChannel};
pub use error::{Error, Result};
pub use json_lines::JsonLines;
pub use mainloop::MainLoop;
pub use protocol::{CounterIdGen, Protocol};
pub use socket::{MainLoopEvent, PeerSocket};
