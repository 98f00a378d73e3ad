use std::net::{TcpStream, ToSocketAddrs};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::handle::{Network, TcpHandle};

/// Dial a TCP connection to `host:port` over the given transport kind
/// (blocking).
///
/// `tcp4`/`tcp6` restrict resolved candidate addresses to the matching
/// family. An empty host dials loopback. Dial failures are never retried
/// here; the caller decides whether to retry the whole invocation.
pub fn dial(network: Network, host: &str, port: &str) -> Result<TcpHandle> {
    let host = if host.is_empty() { "localhost" } else { host };
    let addr = format!("{host}:{port}");
    debug!(%addr, network = %network, "dialing");

    let candidates = addr.to_socket_addrs().map_err(|e| TransportError::Dial {
        addr: addr.clone(),
        source: e,
    })?;

    let mut last_err = None;
    for candidate in candidates.filter(|a| network.matches(a)) {
        match TcpStream::connect(candidate) {
            Ok(stream) => {
                info!(%addr, peer = %candidate, network = %network, "connected");
                return Ok(TcpHandle::from_stream(network, stream));
            }
            Err(err) => {
                debug!(%candidate, %err, "connect attempt failed");
                last_err = Some(err);
            }
        }
    }

    match last_err {
        Some(source) => Err(TransportError::Dial { addr, source }),
        None => Err(TransportError::NoMatchingAddress { addr, network }),
    }
}
