use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::debug;

use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes delimiter-terminated payloads to any `Write` stream.
///
/// When a delimiter byte is set it is appended once to an outbound staging
/// copy; the caller's buffer is never mutated.
pub struct DelimitedWriter<T> {
    inner: T,
    buf: BytesMut,
    delimiter: Option<u8>,
}

impl<T: Write> DelimitedWriter<T> {
    /// Create a writer with the session's resolved delimiter.
    pub fn new(inner: T, delimiter: Option<u8>) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            delimiter,
        }
    }

    /// Write one payload (blocking).
    ///
    /// Returns the total number of bytes put on the wire: the payload
    /// length, plus one when a delimiter is set. Failures carry the count
    /// actually transmitted before the error.
    pub fn send(&mut self, payload: &[u8]) -> Result<usize> {
        self.buf.clear();
        self.buf.reserve(payload.len() + 1);
        self.buf.extend_from_slice(payload);
        if let Some(delim) = self.delimiter {
            debug!(delimiter = delim, "appending payload delimiter");
            self.buf.extend_from_slice(&[delim]);
        }

        let mut written = 0usize;
        while written < self.buf.len() {
            match self.inner.write(&self.buf[written..]) {
                Ok(0) => return Err(FrameError::ClosedMidWrite { written }),
                Ok(n) => written += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_write_timeout(err.kind()) => {
                    return Err(FrameError::WriteTimeout { written })
                }
                Err(err) => {
                    return Err(FrameError::Write {
                        written,
                        source: err,
                    })
                }
            }
        }

        self.flush(written)?;
        Ok(written)
    }

    fn flush(&mut self, written: usize) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_write_timeout(err.kind()) => {
                    return Err(FrameError::WriteTimeout { written })
                }
                Err(err) => {
                    return Err(FrameError::Write {
                        written,
                        source: err,
                    })
                }
            }
        }
    }

    /// The delimiter this writer appends, if any.
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Blocking sockets surface a write deadline as `WouldBlock` or `TimedOut`
/// depending on platform.
fn is_write_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn appends_delimiter_and_counts_it() {
        let mut writer = DelimitedWriter::new(Cursor::new(Vec::new()), Some(b';'));

        let written = writer.send(b"Hi there!").unwrap();

        assert_eq!(written, 10);
        assert_eq!(writer.into_inner().into_inner(), b"Hi there!;");
    }

    #[test]
    fn no_delimiter_writes_payload_verbatim() {
        let mut writer = DelimitedWriter::new(Cursor::new(Vec::new()), None);

        let written = writer.send(b"Hi there!").unwrap();

        assert_eq!(written, 9);
        assert_eq!(writer.into_inner().into_inner(), b"Hi there!");
    }

    #[test]
    fn empty_payload_with_delimiter_writes_one_byte() {
        let mut writer = DelimitedWriter::new(Cursor::new(Vec::new()), Some(b'\n'));

        let written = writer.send(b"").unwrap();

        assert_eq!(written, 1);
        assert_eq!(writer.into_inner().into_inner(), b"\n");
    }

    #[test]
    fn caller_buffer_is_untouched() {
        let payload = b"payload".to_vec();
        let mut writer = DelimitedWriter::new(Cursor::new(Vec::new()), Some(b'\r'));

        writer.send(&payload).unwrap();

        assert_eq!(payload, b"payload");
    }

    #[test]
    fn zero_write_is_closed_mid_write() {
        let mut writer = DelimitedWriter::new(ZeroWriter, Some(b';'));
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::ClosedMidWrite { written: 0 }));
    }

    #[test]
    fn timeout_carries_partial_count() {
        let sink = PartialThenTimeout {
            accept: 4,
            data: Vec::new(),
        };
        let mut writer = DelimitedWriter::new(sink, None);

        let err = writer.send(b"0123456789").unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.bytes_written(), 4);
    }

    #[test]
    fn io_error_carries_partial_count() {
        let sink = PartialThenError {
            accept: 3,
            data: Vec::new(),
        };
        let mut writer = DelimitedWriter::new(sink, None);

        let err = writer.send(b"abcdef").unwrap_err();

        assert_eq!(err.bytes_written(), 3);
        assert!(matches!(err, FrameError::Write { .. }));
    }

    #[test]
    fn interrupted_write_retries() {
        let sink = InterruptedOnce {
            interrupted: false,
            data: Vec::new(),
        };
        let mut writer = DelimitedWriter::new(sink, Some(b'\n'));

        let written = writer.send(b"retry").unwrap();

        assert_eq!(written, 6);
        assert_eq!(writer.into_inner().data, b"retry\n");
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct PartialThenTimeout {
        accept: usize,
        data: Vec<u8>,
    }

    impl Write for PartialThenTimeout {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.accept == 0 {
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            let n = self.accept.min(buf.len());
            self.data.extend_from_slice(&buf[..n]);
            self.accept = 0;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct PartialThenError {
        accept: usize,
        data: Vec<u8>,
    }

    impl Write for PartialThenError {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.accept == 0 {
                return Err(std::io::Error::from(ErrorKind::BrokenPipe));
            }
            let n = self.accept.min(buf.len());
            self.data.extend_from_slice(&buf[..n]);
            self.accept = 0;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptedOnce {
        interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedOnce {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
