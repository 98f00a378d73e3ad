use bytes::Bytes;
use tracing::{debug, info, warn};

use tcpwire_frame::{resolve_delimiter, DelimitedWriter, ReadEnd, ReplyReader};
use tcpwire_transport::{dial, TcpHandle, TransportError};

use crate::config::SessionConfig;
use crate::error::{ConfigError, Result};

/// Input to one invocation.
#[derive(Debug, Default)]
pub struct SendInput {
    /// Payload bytes to write; may be empty.
    pub data: Vec<u8>,
    /// A handle returned by a previous invocation, offered for reuse.
    /// Only meaningful when the session keeps connections open.
    pub connection: Option<TcpHandle>,
}

impl SendInput {
    /// Input carrying only a payload.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            connection: None,
        }
    }

    /// Attach a previously-returned connection for reuse.
    pub fn with_connection(mut self, connection: TcpHandle) -> Self {
        self.connection = Some(connection);
        self
    }
}

/// Result of one invocation.
#[derive(Debug)]
pub struct SendOutput {
    /// Bytes put on the wire: the payload plus the delimiter when one is
    /// set.
    pub bytes_written: usize,
    /// Raw reply bytes consumed, including the delimiter that terminated
    /// the read. Zero when no reply was requested.
    pub bytes_received: usize,
    /// Reply payload with the terminating delimiter stripped. Empty when
    /// no reply was requested.
    pub data: Bytes,
    /// How the reply read ended, when one was performed.
    pub read_end: Option<ReadEnd>,
    /// The live connection, handed back only when the session keeps it
    /// open.
    pub connection: Option<TcpHandle>,
}

/// A configured TCP write session.
///
/// Construction validates the configuration and resolves the delimiter
/// exactly once; it is never re-resolved mid-session. The same byte is
/// appended to outbound payloads and used as the inbound terminator.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    delimiter: Option<u8>,
}

impl Session {
    /// Validate the configuration and resolve the delimiter.
    pub fn new(config: SessionConfig) -> Result<Self> {
        if config.port.is_empty() {
            return Err(ConfigError::MissingPort.into());
        }
        let delimiter = resolve_delimiter(config.delimiter, config.custom_delimiter.as_deref())
            .map_err(ConfigError::from)?;
        Ok(Self { config, delimiter })
    }

    /// The delimiter byte applied to outbound and inbound framing.
    pub fn delimiter(&self) -> Option<u8> {
        self.delimiter
    }

    /// The validated session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Perform one invocation: establish or reuse a connection, write the
    /// payload, and optionally block for one reply.
    ///
    /// Configuration, dial, handle-reuse, and write failures are fatal.
    /// Reply failures are not: once the write succeeded the invocation
    /// completes with whatever reply bytes were accumulated, and
    /// `read_end` records how the read stopped.
    pub fn send(&self, input: SendInput) -> Result<SendOutput> {
        let mut handle = self.establish(input.connection)?;

        let write_result = DelimitedWriter::new(&mut handle, self.delimiter).send(&input.data);
        let bytes_written = match write_result {
            Ok(n) => n,
            Err(err) => {
                // The stream's framing state is unknown after a failed
                // write; the connection is closed in every mode.
                self.teardown(handle);
                return Err(err.into());
            }
        };
        info!(bytes_written, "payload written");

        let mut bytes_received = 0usize;
        let mut data = Bytes::new();
        let mut read_end = None;
        if self.config.wait_for_reply {
            let reply = ReplyReader::new(&mut handle, self.delimiter).read_reply();
            info!(bytes_received = reply.bytes_received, "reply read finished");
            bytes_received = reply.bytes_received;
            data = reply.data;
            read_end = Some(reply.end);
        }

        let connection = if self.config.keep_connection_open {
            Some(handle)
        } else {
            self.teardown(handle);
            None
        };

        Ok(SendOutput {
            bytes_written,
            bytes_received,
            data,
            read_end,
            connection,
        })
    }

    /// Produce a live handle: reuse the supplied one when configured to,
    /// dial otherwise, then apply this invocation's deadlines.
    fn establish(&self, existing: Option<TcpHandle>) -> Result<TcpHandle> {
        let handle = match existing.filter(|_| self.config.keep_connection_open) {
            Some(handle) => {
                if !self.config.network.accepts(handle.network()) {
                    return Err(TransportError::InvalidHandle {
                        expected: self.config.network,
                        actual: handle.network(),
                    }
                    .into());
                }
                debug!(?handle, "reusing connection");
                handle
            }
            None => dial(self.config.network, &self.config.host, &self.config.port)?,
        };

        // Deadlines are call-scoped, not connection-scoped: reapply or
        // clear them on every invocation so a reused handle never carries
        // a stale one.
        handle.set_write_timeout(self.config.write_timeout())?;
        if let Some(timeout) = self.config.write_timeout() {
            debug!(timeout_ms = timeout.as_millis() as u64, "write timeout set");
        }
        if self.config.wait_for_reply {
            handle.set_read_timeout(self.config.read_timeout())?;
        }

        Ok(handle)
    }

    /// Close a connection that is not being handed back. Close errors are
    /// logged, never propagated: the first failure is authoritative.
    fn teardown(&self, handle: TcpHandle) {
        info!("closing connection");
        if let Err(err) = handle.shutdown() {
            warn!(%err, "error closing connection");
        }
    }
}
