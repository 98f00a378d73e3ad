use tcpwire_frame::{DelimiterError, FrameError};
use tcpwire_transport::TransportError;

/// Errors that make a session configuration unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The destination port is required.
    #[error("port is required")]
    MissingPort,

    /// The delimiter configuration could not be resolved.
    #[error(transparent)]
    Delimiter(#[from] DelimiterError),
}

/// Errors that are fatal to a single invocation.
///
/// Reply-read failures are deliberately absent: once the write succeeded
/// the invocation completes, and the read classification rides in the
/// result instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid session configuration.
    #[error("invalid session config: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level error: dialing, handle reuse, deadline application.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The payload write failed.
    #[error("write error: {0}")]
    Write(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
