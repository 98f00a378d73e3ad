use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use tracing::{debug, error, info};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// How a reply read terminated.
#[derive(Debug)]
pub enum ReadEnd {
    /// The configured delimiter byte was observed.
    Delimiter,
    /// The peer closed the stream.
    PeerClosed,
    /// The read deadline elapsed; bytes accumulated so far are still valid.
    TimedOut,
    /// Some other I/O error ended the read; accumulated bytes are kept.
    Failed(std::io::Error),
}

impl ReadEnd {
    /// Whether the read ended in an unclassified I/O error.
    pub fn is_error(&self) -> bool {
        matches!(self, ReadEnd::Failed(_))
    }
}

/// One best-effort reply read off a stream.
#[derive(Debug)]
pub struct Reply {
    /// Received payload. The terminating delimiter, when one was seen, is
    /// stripped.
    pub data: Bytes,
    /// Raw bytes consumed off the wire, including the delimiter when one
    /// terminated the read.
    pub bytes_received: usize,
    /// How the read ended.
    pub end: ReadEnd,
}

/// Reads a single reply from any `Read` stream.
///
/// With a delimiter the read terminates when that byte appears; without
/// one it accumulates until the peer closes. Both modes share one
/// termination classification (delimiter / peer close / timeout / other),
/// and bytes buffered before a failure are never dropped: a reply is
/// best-effort once the write succeeded, so `read_reply` cannot fail.
pub struct ReplyReader<T> {
    inner: T,
    delimiter: Option<u8>,
}

impl<T: Read> ReplyReader<T> {
    /// Create a reader with the session's resolved delimiter.
    pub fn new(inner: T, delimiter: Option<u8>) -> Self {
        Self { inner, delimiter }
    }

    /// Read one reply (blocking).
    pub fn read_reply(&mut self) -> Reply {
        let mut data = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
        let mut consumed = 0usize;
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        // Delimiter mode reads one byte at a time so nothing past the
        // terminator is pulled off the wire; a kept-open connection keeps
        // its stream position for the next invocation.
        let window = if self.delimiter.is_some() {
            1
        } else {
            READ_CHUNK_SIZE
        };

        loop {
            match self.inner.read(&mut chunk[..window]) {
                Ok(0) => {
                    debug!(received = consumed, "peer closed the stream");
                    return finish(data, consumed, ReadEnd::PeerClosed);
                }
                Ok(n) => {
                    consumed += n;
                    if let Some(delim) = self.delimiter {
                        if chunk[0] == delim {
                            return finish(data, consumed, ReadEnd::Delimiter);
                        }
                    }
                    data.extend_from_slice(&chunk[..n]);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_read_timeout(err.kind()) => {
                    debug!(received = consumed, "read deadline elapsed");
                    return finish(data, consumed, ReadEnd::TimedOut);
                }
                Err(err) if is_closed(err.kind()) => {
                    info!(received = consumed, "connection is closed");
                    return finish(data, consumed, ReadEnd::PeerClosed);
                }
                Err(err) => {
                    error!(%err, received = consumed, "error reading reply");
                    return finish(data, consumed, ReadEnd::Failed(err));
                }
            }
        }
    }

    /// The delimiter this reader terminates on, if any.
    pub fn delimiter(&self) -> Option<u8> {
        self.delimiter
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn finish(data: BytesMut, bytes_received: usize, end: ReadEnd) -> Reply {
    Reply {
        data: data.freeze(),
        bytes_received,
        end,
    }
}

/// Blocking sockets surface a read deadline as `WouldBlock` or `TimedOut`
/// depending on platform.
fn is_read_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// Structured stand-in for the "connection already closed" condition;
/// never matched on error text.
fn is_closed(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::NotConnected
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn delimiter_framed_reply_strips_terminator() {
        let mut reader = ReplyReader::new(Cursor::new(b"Hi there!;".to_vec()), Some(b';'));

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"Hi there!");
        assert_eq!(reply.bytes_received, 10);
        assert!(matches!(reply.end, ReadEnd::Delimiter));
    }

    #[test]
    fn delimiter_mode_stops_at_first_terminator() {
        let mut reader = ReplyReader::new(Cursor::new(b"one;two;".to_vec()), Some(b';'));

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"one");
        assert_eq!(reply.bytes_received, 4);

        // The rest of the stream stays in place for a later read.
        let next = reader.read_reply();
        assert_eq!(next.data.as_ref(), b"two");
        assert_eq!(next.bytes_received, 4);
    }

    #[test]
    fn eof_before_delimiter_keeps_partial_data() {
        let mut reader = ReplyReader::new(Cursor::new(b"partial".to_vec()), Some(b';'));

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"partial");
        assert_eq!(reply.bytes_received, 7);
        assert!(matches!(reply.end, ReadEnd::PeerClosed));
    }

    #[test]
    fn empty_stream_yields_empty_reply_without_panic() {
        let mut reader = ReplyReader::new(Cursor::new(Vec::new()), Some(b';'));

        let reply = reader.read_reply();

        assert!(reply.data.is_empty());
        assert_eq!(reply.bytes_received, 0);
        assert!(matches!(reply.end, ReadEnd::PeerClosed));
    }

    #[test]
    fn until_close_mode_accumulates_everything() {
        let mut reader = ReplyReader::new(Cursor::new(b"no delimiter here".to_vec()), None);

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"no delimiter here");
        assert_eq!(reply.bytes_received, 17);
        assert!(matches!(reply.end, ReadEnd::PeerClosed));
    }

    #[test]
    fn timeout_returns_partial_data() {
        let stream = DataThenError {
            bytes: b"half".to_vec(),
            pos: 0,
            kind: ErrorKind::WouldBlock,
        };
        let mut reader = ReplyReader::new(stream, Some(b';'));

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"half");
        assert_eq!(reply.bytes_received, 4);
        assert!(matches!(reply.end, ReadEnd::TimedOut));
    }

    #[test]
    fn reset_is_classified_as_peer_close() {
        let stream = DataThenError {
            bytes: b"tail".to_vec(),
            pos: 0,
            kind: ErrorKind::ConnectionReset,
        };
        let mut reader = ReplyReader::new(stream, None);

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"tail");
        assert!(matches!(reply.end, ReadEnd::PeerClosed));
    }

    #[test]
    fn other_errors_keep_accumulated_bytes() {
        let stream = DataThenError {
            bytes: b"kept".to_vec(),
            pos: 0,
            kind: ErrorKind::InvalidData,
        };
        let mut reader = ReplyReader::new(stream, None);

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"kept");
        assert_eq!(reply.bytes_received, 4);
        assert!(reply.end.is_error());
    }

    #[test]
    fn error_with_no_data_yields_empty_reply() {
        let stream = DataThenError {
            bytes: Vec::new(),
            pos: 0,
            kind: ErrorKind::InvalidData,
        };
        let mut reader = ReplyReader::new(stream, Some(b'\n'));

        let reply = reader.read_reply();

        assert!(reply.data.is_empty());
        assert_eq!(reply.bytes_received, 0);
        assert!(reply.end.is_error());
    }

    #[test]
    fn interrupted_read_retries() {
        let stream = InterruptedThenData {
            interrupted: false,
            bytes: b"ok;".to_vec(),
            pos: 0,
        };
        let mut reader = ReplyReader::new(stream, Some(b';'));

        let reply = reader.read_reply();

        assert_eq!(reply.data.as_ref(), b"ok");
        assert_eq!(reply.bytes_received, 3);
        assert!(matches!(reply.end, ReadEnd::Delimiter));
    }

    struct DataThenError {
        bytes: Vec<u8>,
        pos: usize,
        kind: ErrorKind,
    }

    impl Read for DataThenError {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Err(std::io::Error::from(self.kind));
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
