//! Request/response helper with owned buffers.
//!
//! [`Context::transaction`] leaves buffer management to the caller. [`Session`] owns a
//! request scratch buffer of `TX` bytes and a response buffer of `RX` bytes, frames
//! messages (appending the terminator when missing), and hands back the response slice.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! use soi2c::driver::Context;
//! use soi2c::session::Session;
//! use soi2c::transport::I2cTransport;
//!
//! # let i2c = I2cMock::new(&[
//! #     I2cTransaction::write(0x17, vec![0x01, b'\n']),
//! #     I2cTransaction::write(0x17, vec![0x05, b'p', b'i', b'n', b'g', b'\n']),
//! #     I2cTransaction::write(0x17, vec![0x00, 0x00]),
//! #     I2cTransaction::read(0x17, vec![0x03, 0x00]),
//! #     I2cTransaction::write(0x17, vec![0x00, 0x03]),
//! #     I2cTransaction::read(0x17, vec![0x00, 0x03, b'o', b'k', b'\n']),
//! # ]);
//! let context = Context::new(0x17, I2cTransport::new(i2c, NoopDelay::new()));
//! let mut session: Session<_, 64, 256> = Session::new(context);
//!
//! session.reset()?;
//! assert_eq!(session.request(b"ping")?, b"ok\n");
//! # let (mut i2c, _) = session.into_context().release().release();
//! # i2c.done();
//! # Ok::<(), soi2c::error::Error>(())
//! ```

use crate::consts::TERMINATOR;
use crate::driver::Context;
use crate::error::Error;
use crate::request::Request;
use crate::transport::Transport;

/// A [`Context`] bundled with its request and response buffers.
#[derive(Debug)]
pub struct Session<T, const TX: usize, const RX: usize> {
    context: Context<T>,
    tx_buf: [u8; TX],
    rx_buf: [u8; RX],
}

impl<T: Transport, const TX: usize, const RX: usize> Session<T, TX, RX> {
    /// Wraps a context. No bus traffic happens until the first call.
    pub fn new(context: Context<T>) -> Self {
        Self {
            context,
            tx_buf: [0; TX],
            rx_buf: [0; RX],
        }
    }

    /// The wrapped context.
    pub fn context(&self) -> &Context<T> {
        &self.context
    }

    /// Returns the wrapped context, dropping the buffers.
    pub fn into_context(self) -> Context<T> {
        self.context
    }

    /// See [`Context::reset`].
    pub fn reset(&mut self) -> Result<(), Error> {
        self.context.reset()
    }

    /// Sends `message` and returns the peer's response, terminator included.
    ///
    /// The terminator is appended if `message` does not already end with one.
    pub fn request(&mut self, message: &[u8]) -> Result<&[u8], Error> {
        let request = Self::stage(&mut self.tx_buf, message)?;
        let len = self.context.transaction(request, Some(&mut self.rx_buf))?;
        Ok(&self.rx_buf[..len])
    }

    /// Sends `message` without waiting for a response.
    pub fn command(&mut self, message: &[u8]) -> Result<(), Error> {
        let request = Self::stage(&mut self.tx_buf, message)?;
        self.context.command(request)
    }

    /// Sends `message` and waits for the response without keeping it.
    ///
    /// Useful for requests whose reply may be larger than `RX`.
    pub fn discard(&mut self, message: &[u8]) -> Result<(), Error> {
        let request = Self::stage(&mut self.tx_buf, message)?;
        self.context
            .transaction(request, Some(&mut []))
            .map(|_| ())
    }

    fn stage<'b>(buf: &'b mut [u8; TX], message: &[u8]) -> Result<Request<'b>, Error> {
        if message.is_empty() {
            return Err(Error::Termination);
        }
        let terminated = message.last() == Some(&TERMINATOR);
        let len = message.len() + usize::from(!terminated);
        // One byte must stay free for the chunk header.
        if len >= TX {
            return Err(Error::TxBufferOverflow);
        }
        buf[..message.len()].copy_from_slice(message);
        if !terminated {
            buf[message.len()] = TERMINATOR;
        }
        Ok(Request::new(buf, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePeer;

    const ADDRESS: u8 = 0x17;

    #[test]
    fn test_request_appends_terminator() {
        let peer = FakePeer::new(ADDRESS).with_pending(b"{\"body\":{}}\n");
        let mut session: Session<_, 32, 32> = Session::new(Context::new(ADDRESS, peer));

        assert_eq!(
            session.request(b"{\"req\":\"note.get\"}").unwrap(),
            b"{\"body\":{}}\n"
        );
        assert_eq!(
            session.context().transport().data,
            b"{\"req\":\"note.get\"}\n"
        );
    }

    #[test]
    fn test_terminated_message_is_sent_as_is() {
        let mut session: Session<_, 16, 16> =
            Session::new(Context::new(ADDRESS, FakePeer::new(ADDRESS)));
        assert_eq!(session.command(b"ping\n"), Ok(()));
        assert_eq!(session.context().transport().data, b"ping\n");
    }

    #[test]
    fn test_message_must_leave_room_for_header() {
        let mut session: Session<_, 6, 16> =
            Session::new(Context::new(ADDRESS, FakePeer::new(ADDRESS)));
        assert_eq!(session.command(b"pong"), Ok(()));
        assert_eq!(session.command(b"pings"), Err(Error::TxBufferOverflow));
        assert_eq!(session.command(b"pings\n"), Err(Error::TxBufferOverflow));
        assert_eq!(session.command(b""), Err(Error::Termination));
        assert_eq!(session.context().transport().data, b"pong\n");
    }

    #[test]
    fn test_discard_ignores_large_reply() {
        let mut reply = vec![b'r'; 99];
        reply.push(TERMINATOR);
        let peer = FakePeer::new(ADDRESS).with_pending(&reply);
        let mut session: Session<_, 16, 8> = Session::new(Context::new(ADDRESS, peer));

        assert_eq!(session.discard(b"dump"), Ok(()));
        assert_eq!(session.context().transport().pending_len(), 0);
    }

    #[test]
    fn test_small_response_buffer_overflows() {
        let peer = FakePeer::new(ADDRESS).with_pending(b"0123456789\n");
        let mut session: Session<_, 16, 8> = Session::new(Context::new(ADDRESS, peer));
        assert_eq!(session.request(b"dump"), Err(Error::RxBufferOverflow));
    }

    #[test]
    fn test_reset_then_request() {
        let peer = FakePeer::new(ADDRESS).with_pending(b"ok\n");
        let mut session: Session<_, 16, 16> = Session::new(Context::new(ADDRESS, peer));
        assert_eq!(session.reset(), Ok(()));
        assert_eq!(session.request(b"ping").unwrap(), b"ok\n");
        assert_eq!(session.into_context().release().data, b"\nping\n");
    }
}
