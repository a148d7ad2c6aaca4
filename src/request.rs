//! Caller-owned request buffers.
//!
//! A [`Request`] pairs a message with the buffer holding it. The buffer must have at
//! least one byte of spare capacity past the message: during a transaction the
//! message is shifted right to make room for a chunk-length header, and the whole
//! buffer is then reused as receive scratch space.
//!
//! Passing a `Request` to [`Context::transaction`](crate::driver::Context::transaction)
//! consumes it. Once the transaction returns, successfully or not, the buffer's
//! contents are undefined and must not be read back as the original request.

use crate::consts::TERMINATOR;

/// A terminator-ended message inside a larger scratch buffer.
///
/// ## Example
///
/// ```rust
/// use soi2c::request::Request;
///
/// let mut buf = [0u8; 64];
/// let message = b"{\"req\":\"card.version\"}\n";
/// buf[..message.len()].copy_from_slice(message);
///
/// let request = Request::new(&mut buf, message.len());
/// assert!(request.is_terminated());
/// assert_eq!(request.spare(), 64 - message.len());
/// ```
#[derive(Debug)]
pub struct Request<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Request<'a> {
    /// Wraps the first `len` bytes of `buf` as the message.
    ///
    /// No validation happens here; a transaction rejects malformed requests with
    /// [`Error::Termination`](crate::error::Error::Termination) or
    /// [`Error::TxBufferOverflow`](crate::error::Error::TxBufferOverflow).
    pub fn new(buf: &'a mut [u8], len: usize) -> Self {
        Self { buf, len }
    }

    /// Length of the message, terminator included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the message is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes of the buffer not occupied by the message.
    pub fn spare(&self) -> usize {
        self.buf.len().saturating_sub(self.len)
    }

    /// The message bytes, or `None` if `len` exceeds the buffer.
    pub fn message(&self) -> Option<&[u8]> {
        self.buf.get(..self.len)
    }

    /// Whether the message is nonempty, fits its buffer, and ends with [`TERMINATOR`].
    pub fn is_terminated(&self) -> bool {
        matches!(self.message(), Some([.., last]) if *last == TERMINATOR)
    }

    pub(crate) fn into_parts(self) -> (&'a mut [u8], usize) {
        (self.buf, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminated_request() {
        let mut buf = *b"ping\n\0\0\0";
        let request = Request::new(&mut buf, 5);
        assert_eq!(request.len(), 5);
        assert_eq!(request.capacity(), 8);
        assert_eq!(request.spare(), 3);
        assert_eq!(request.message(), Some(&b"ping\n"[..]));
        assert!(request.is_terminated());
    }

    #[test]
    fn test_unterminated_requests() {
        let mut buf = *b"ping\n\0\0\0";
        assert!(!Request::new(&mut buf, 4).is_terminated());
        assert!(!Request::new(&mut buf, 0).is_terminated());
        assert!(Request::new(&mut buf, 0).is_empty());

        let request = Request::new(&mut buf, 9);
        assert!(!request.is_terminated());
        assert_eq!(request.message(), None);
        assert_eq!(request.spare(), 0);
    }
}
