use std::time::Duration;

use serde::Deserialize;
use tcpwire_frame::NamedDelimiter;
use tcpwire_transport::Network;

/// Session configuration, shaped like the host's option map.
///
/// Field names follow the inbound camelCase option names, so a host
/// configuration block deserializes directly onto this struct. Every field
/// except `port` has a usable default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Transport kind; "tcp" when absent.
    pub network: Network,
    /// Destination host; empty means loopback.
    pub host: String,
    /// Destination port. Required.
    pub port: String,
    /// Write deadline in milliseconds; 0 means none.
    pub write_timeout_ms: u64,
    /// Read deadline in milliseconds; 0 means the reply read blocks until
    /// delimiter, close, or error.
    pub read_timeout_ms: u64,
    /// Named delimiter applied to outbound append and inbound framing.
    pub delimiter: Option<NamedDelimiter>,
    /// Hex-encoded custom delimiter; overrides `delimiter` when non-empty.
    pub custom_delimiter: Option<String>,
    /// Block for one reply after the write.
    pub wait_for_reply: bool,
    /// Keep the connection open and hand it back for reuse.
    pub keep_connection_open: bool,
}

impl SessionConfig {
    /// Write deadline as a duration; `None` when disabled.
    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_ms > 0).then(|| Duration::from_millis(self.write_timeout_ms))
    }

    /// Read deadline as a duration; `None` when unbounded.
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}
