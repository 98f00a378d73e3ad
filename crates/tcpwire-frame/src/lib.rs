//! Delimiter-framed payload I/O for tcpwire.
//!
//! This is the core value-add layer of tcpwire. Outbound payloads get at
//! most one delimiter byte appended; inbound replies are read until that
//! byte appears, or — when no delimiter is configured — until the peer
//! closes the stream. Both read modes share one termination classification
//! (delimiter / peer close / timeout / other error), and bytes buffered
//! before a failure are never dropped.

pub mod delimiter;
pub mod error;
pub mod reader;
pub mod writer;

pub use delimiter::{resolve_delimiter, DelimiterError, NamedDelimiter};
pub use error::{FrameError, Result};
pub use reader::{ReadEnd, Reply, ReplyReader};
pub use writer::DelimitedWriter;
