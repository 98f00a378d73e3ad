use crate::handle::Network;

/// Errors that can occur in TCP transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to establish a connection to the destination.
    #[error("failed to dial {addr}: {source}")]
    Dial {
        addr: String,
        source: std::io::Error,
    },

    /// Name resolution produced no address of the requested family.
    #[error("no {network} address found for {addr}")]
    NoMatchingAddress { addr: String, network: Network },

    /// A reused handle does not match the configured transport kind.
    #[error("reused handle is {actual}, expected {expected}")]
    InvalidHandle { expected: Network, actual: Network },

    /// The network name is not a recognized transport kind.
    #[error("unknown network {0:?} (expected tcp, tcp4, or tcp6)")]
    UnknownNetwork(String),

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
