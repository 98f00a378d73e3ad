//! TCP transport layer for tcpwire.
//!
//! Provides the [`Network`] transport kind ("tcp", "tcp4", "tcp6"), the
//! tagged [`TcpHandle`] connection type, and blocking [`dial`].
//!
//! This is the lowest layer of tcpwire. Everything else builds on top of
//! the [`TcpHandle`] type provided here.

pub mod error;
pub mod handle;
pub mod tcp;

pub use error::{Result, TransportError};
pub use handle::{Network, TcpHandle};
pub use tcp::dial;
