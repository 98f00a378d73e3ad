use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, TransportError};

/// TCP transport kind, named the way dial targets name them.
///
/// `tcp` accepts either address family; `tcp4`/`tcp6` restrict dialing
/// (and handle reuse) to IPv4/IPv6 respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Network {
    #[default]
    #[serde(rename = "tcp")]
    Tcp,
    #[serde(rename = "tcp4")]
    Tcp4,
    #[serde(rename = "tcp6")]
    Tcp6,
}

impl Network {
    /// Network name as dialed.
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Tcp4 => "tcp4",
            Network::Tcp6 => "tcp6",
        }
    }

    /// Whether a resolved socket address belongs to this transport kind.
    pub fn matches(self, addr: &SocketAddr) -> bool {
        match self {
            Network::Tcp => true,
            Network::Tcp4 => addr.is_ipv4(),
            Network::Tcp6 => addr.is_ipv6(),
        }
    }

    /// Whether a handle dialed over `other` may be reused under this kind.
    ///
    /// `tcp` accepts handles of either family; `tcp4`/`tcp6` require an
    /// exact match.
    pub fn accepts(self, other: Network) -> bool {
        self == Network::Tcp || self == other
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tcp" | "" => Ok(Network::Tcp),
            "tcp4" => Ok(Network::Tcp4),
            "tcp6" => Ok(Network::Tcp6),
            other => Err(TransportError::UnknownNetwork(other.to_string())),
        }
    }
}

/// A live TCP connection tagged with the transport kind it was dialed over.
///
/// Implements `Read + Write`. A handle has exactly one owner at a time:
/// the session manager moves it into each invocation and hands it back in
/// the result only when the connection is being kept open. Dropping the
/// handle closes the connection.
pub struct TcpHandle {
    network: Network,
    stream: TcpStream,
}

impl TcpHandle {
    pub(crate) fn from_stream(network: Network, stream: TcpStream) -> Self {
        Self { network, stream }
    }

    /// The transport kind this handle was dialed over.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Address of the connected peer.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.stream.peer_addr().map_err(Into::into)
    }

    /// Set or clear the write timeout on the underlying stream.
    ///
    /// Timeouts are call-scoped: the session manager reapplies them on
    /// every invocation, so a reused handle never carries a stale one.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.stream.set_write_timeout(timeout).map_err(Into::into)
    }

    /// Set or clear the read timeout on the underlying stream.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(timeout).map_err(Into::into)
    }

    /// Shut down both directions of the stream.
    ///
    /// This is the explicit end-of-lifecycle teardown hook; dropping the
    /// handle closes the descriptor as well.
    pub fn shutdown(&self) -> Result<()> {
        self.stream.shutdown(Shutdown::Both).map_err(Into::into)
    }
}

impl Read for TcpHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for TcpHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stream.flush()
    }
}

impl std::fmt::Debug for TcpHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpHandle")
            .field("network", &self.network.as_str())
            .field("peer", &self.stream.peer_addr().ok())
            .finish()
    }
}
