use std::fmt;
use std::io;

use tcpwire_frame::FrameError;
use tcpwire_session::SessionError;
use tcpwire_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Dial { source, .. } | TransportError::Io(source) => {
            io_error(context, source)
        }
        err @ (TransportError::InvalidHandle { .. } | TransportError::UnknownNetwork(_)) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        err @ TransportError::NoMatchingAddress { .. } => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        err @ FrameError::WriteTimeout { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        err @ FrameError::ClosedMidWrite { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        FrameError::Write { source, .. } => io_error(context, source),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Config(err) => CliError::new(USAGE, format!("{context}: {err}")),
        SessionError::Transport(err) => transport_error(context, err),
        SessionError::Write(err) => frame_error(context, err),
    }
}
