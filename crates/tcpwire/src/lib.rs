//! Framed TCP write sessions.
//!
//! tcpwire writes a byte payload to a TCP destination with an optional
//! single-byte delimiter appended, optionally blocks for a reply framed by
//! the same delimiter (or read until the peer closes), and can keep the
//! connection open for sequential reuse.
//!
//! # Crate Structure
//!
//! - [`transport`] — Transport kind, tagged connection handles, dialing
//! - [`frame`] — Delimiter resolution and best-effort framed payload I/O
//! - [`session`] — Session lifecycle: dial or reuse, write, optional reply

/// Re-export transport types.
pub mod transport {
    pub use tcpwire_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use tcpwire_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use tcpwire_session::*;
}
