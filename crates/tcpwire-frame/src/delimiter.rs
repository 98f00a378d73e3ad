use serde::Deserialize;
use tracing::debug;

/// Named single-byte delimiters exposed in session configuration.
///
/// The long serde aliases accept the option labels some hosts present in
/// their configuration UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NamedDelimiter {
    #[serde(rename = "CR", alias = "Carriage Return (CR)")]
    Cr,
    #[serde(rename = "LF", alias = "Line Feed (LF)")]
    Lf,
    #[serde(rename = "FF", alias = "Form Feed (FF)")]
    Ff,
}

impl NamedDelimiter {
    /// The single byte this delimiter stands for.
    pub fn byte(self) -> u8 {
        match self {
            NamedDelimiter::Cr => b'\r',
            NamedDelimiter::Lf => b'\n',
            NamedDelimiter::Ff => 0x0C,
        }
    }
}

/// Errors from resolving a custom delimiter.
#[derive(Debug, thiserror::Error)]
pub enum DelimiterError {
    /// The custom delimiter is not valid hex.
    #[error("custom delimiter hex {value:?} is invalid: {source}")]
    InvalidHex {
        value: String,
        source: hex::FromHexError,
    },
}

/// Resolve delimiter configuration to at most one byte.
///
/// A non-empty custom hex string always wins over the named delimiter
/// (hex codes per the ASCII table, e.g. `"3B"` for `;`); only the first
/// decoded byte is used. A resolved byte of zero means "no delimiter" and
/// framing falls back to read-until-close. Resolution happens once per
/// session and is deterministic.
pub fn resolve_delimiter(
    named: Option<NamedDelimiter>,
    custom_hex: Option<&str>,
) -> std::result::Result<Option<u8>, DelimiterError> {
    if let Some(value) = custom_hex.filter(|v| !v.is_empty()) {
        let decoded = hex::decode(value).map_err(|source| DelimiterError::InvalidHex {
            value: value.to_string(),
            source,
        })?;
        let byte = decoded.first().copied().unwrap_or(0);
        debug!("custom delimiter resolved: decimal {byte} hex {byte:02x}");
        return Ok((byte != 0).then_some(byte));
    }

    let byte = named.map(NamedDelimiter::byte);
    if let Some(byte) = byte {
        debug!("delimiter resolved: decimal {byte} hex {byte:02x}");
    }
    Ok(byte.filter(|b| *b != 0))
}
