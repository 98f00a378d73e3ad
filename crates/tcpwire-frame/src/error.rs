/// Errors that can occur while writing a delimited payload.
///
/// Every variant carries the number of bytes actually transmitted before
/// the failure, so partial-write progress is always reportable.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The write deadline elapsed before all bytes were transmitted.
    #[error("write timed out after {written} bytes")]
    WriteTimeout { written: usize },

    /// The connection closed mid-write.
    #[error("connection closed mid-write ({written} bytes sent)")]
    ClosedMidWrite { written: usize },

    /// An I/O error interrupted the write.
    #[error("write failed after {written} bytes: {source}")]
    Write {
        written: usize,
        source: std::io::Error,
    },
}

impl FrameError {
    /// Bytes transmitted before the failure.
    pub fn bytes_written(&self) -> usize {
        match self {
            FrameError::WriteTimeout { written }
            | FrameError::ClosedMidWrite { written }
            | FrameError::Write { written, .. } => *written,
        }
    }

    /// Whether this failure is the write-deadline timeout sub-case.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FrameError::WriteTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
