//! Session lifecycle for framed TCP writes.
//!
//! A [`Session`] owns a validated configuration and the delimiter resolved
//! once at construction. Each [`Session::send`] invocation dials or reuses
//! a connection, writes one payload, optionally blocks for one best-effort
//! reply, and applies the teardown policy. Connection handles move through
//! [`SendInput`]/[`SendOutput`], so a handle has exactly one owner at a
//! time and independent sessions never share state.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{ConfigError, Result, SessionError};
pub use session::{SendInput, SendOutput, Session};
