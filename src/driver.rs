//! Serial-over-I2C transaction engine.
//!
//! This module provides [`Context`], which drives request/response exchanges with a
//! peripheral that can only be polled. A transaction has two phases:
//!
//! 1. **Send**: the request is split into chunks of at most
//!    [`MAX_CHUNK_LEN`](crate::consts::MAX_CHUNK_LEN) bytes, each written with a one-byte
//!    length prefix and followed by a fixed pacing delay. The peer has no way to
//!    signal readiness, so the pacing is the only flow control.
//! 2. **Receive**: the peer is probed until it reports pending bytes, which are then
//!    read in chunks until it reports nothing left and the last byte read was the
//!    [`TERMINATOR`].
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! use soi2c::driver::Context;
//! use soi2c::request::Request;
//! use soi2c::transport::I2cTransport;
//!
//! # let i2c = I2cMock::new(&[
//! #     I2cTransaction::write(0x17, vec![0x05, b'p', b'i', b'n', b'g', b'\n']),
//! #     I2cTransaction::write(0x17, vec![0x00, 0x00]),
//! #     I2cTransaction::read(0x17, vec![0x03, 0x00]),
//! #     I2cTransaction::write(0x17, vec![0x00, 0x03]),
//! #     I2cTransaction::read(0x17, vec![0x00, 0x03, b'o', b'k', b'\n']),
//! # ]);
//! let mut context = Context::new(0x17, I2cTransport::new(i2c, NoopDelay::new()));
//!
//! let mut buf = [0u8; 32];
//! buf[..5].copy_from_slice(b"ping\n");
//! let mut response = [0u8; 32];
//! let len = context.transaction(Request::new(&mut buf, 5), Some(&mut response))?;
//! assert_eq!(&response[..len], b"ok\n");
//! # let (mut i2c, _) = context.release().release();
//! # i2c.done();
//! # Ok::<(), soi2c::error::Error>(())
//! ```
//!
//! ## Design Notes
//!
//! One transaction may be in flight per context. Every call blocks until it completes
//! or fails; there is no cancellation, and the receive timeout bounds polling time only,
//! not time spent inside a single transport call.

use crate::config::Config;
use crate::consts::{MIN_SCRATCH_LEN, RESET_BUF_LEN, TERMINATOR};
use crate::error::{BusOp, Error};
use crate::macros::{debug, trace, warning};
use crate::poll::Receiver;
use crate::request::Request;
use crate::transport::Transport;

/// A configured link to one peripheral.
///
/// Holds the device address, the [`Transport`] and the [`Config`]. None of these are
/// changed by a transaction; the engine keeps no state between calls.
#[derive(Debug)]
pub struct Context<T> {
    address: u8,
    transport: T,
    config: Config,
}

impl<T: Transport> Context<T> {
    /// Creates a context for the device at `address` using the default [`Config`].
    ///
    /// An `address` of `0` is accepted here but makes every operation fail with
    /// [`Error::Configuration`].
    pub fn new(address: u8, transport: T) -> Self {
        Self::with_config(address, transport, Config::new())
    }

    /// Creates a context with explicit timing parameters.
    pub fn with_config(address: u8, transport: T, config: Config) -> Self {
        Self {
            address,
            transport,
            config,
        }
    }

    /// The device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The timing parameters.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the context and returns the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Whether operations can run: the address is nonzero and the config is valid.
    pub fn is_configured(&self) -> bool {
        self.address != 0 && self.config.is_valid()
    }

    /// Sends a lone terminator, expecting no response.
    ///
    /// The peer discards any partial request or unread output left over from a
    /// previous host session. Call once before the first transaction of a session.
    /// Failure is not fatal to the context; the caller decides whether to retry.
    pub fn reset(&mut self) -> Result<(), Error> {
        debug!("resetting peer");
        let mut buf = [0u8; RESET_BUF_LEN];
        buf[0] = TERMINATOR;
        self.command(Request::new(&mut buf, 1))
    }

    /// Sends a lone terminator and drains whatever the peer answers, keeping nothing.
    ///
    /// Unlike [`reset`](Context::reset), this waits for the peer to report a complete
    /// message, so it also clears output the peer produces in reply to the terminator.
    pub fn flush(&mut self) -> Result<(), Error> {
        debug!("flushing peer output");
        let mut buf = [0u8; RESET_BUF_LEN];
        buf[0] = TERMINATOR;
        self.transaction(Request::new(&mut buf, 1), Some(&mut []))
            .map(|_| ())
    }

    /// Sends a request without waiting for a response.
    pub fn command(&mut self, request: Request<'_>) -> Result<(), Error> {
        self.transaction(request, None).map(|_| ())
    }

    /// Sends `request` and, if `response` is given, collects the reply into it.
    ///
    /// Returns the number of bytes written to `response`. With `None` the call returns
    /// `Ok(0)` as soon as the request is sent. With an empty slice the reply is read and
    /// discarded, so it can never overflow.
    ///
    /// The request buffer is used as scratch space for both phases and its contents are
    /// undefined afterwards. Its total size also bounds how many bytes one receive
    /// exchange can move.
    ///
    /// # Errors
    /// - [`Error::Configuration`]: zero address, invalid config, or a request buffer
    ///   shorter than [`MIN_SCRATCH_LEN`]; nothing is sent
    /// - [`Error::Termination`]: empty request, length past the buffer, or no terminator
    /// - [`Error::TxBufferOverflow`]: no spare byte for the chunk header
    /// - [`Error::Io`]: the transport failed
    /// - [`Error::BadSizeReturned`]: the peer answered with a different byte count
    /// - [`Error::RxBufferOverflow`]: the reply does not fit in `response`
    /// - [`Error::Timeout`]: no terminator within the receive budget
    pub fn transaction(
        &mut self,
        request: Request<'_>,
        response: Option<&mut [u8]>,
    ) -> Result<usize, Error> {
        let (buf, len) = request.into_parts();
        self.validate(buf, len)?;
        self.send(buf, len)?;

        let Some(response) = response else {
            return Ok(0);
        };
        let received =
            Receiver::new(buf, response, &self.config).run(&mut self.transport, self.address)?;
        debug!("received {} byte response", received);
        Ok(received)
    }

    fn validate(&self, buf: &[u8], len: usize) -> Result<(), Error> {
        if !self.is_configured() || buf.len() < MIN_SCRATCH_LEN {
            warning!("context not configured");
            return Err(Error::Configuration);
        }
        if len == 0 || len > buf.len() || buf[len - 1] != TERMINATOR {
            return Err(Error::Termination);
        }
        if buf.len() == len {
            return Err(Error::TxBufferOverflow);
        }
        Ok(())
    }

    fn send(&mut self, buf: &mut [u8], len: usize) -> Result<(), Error> {
        // Open a slot for the length prefix in front of the message.
        buf.copy_within(..len, 1);

        let max_chunk = usize::from(self.config.max_chunk_len);
        let mut left = len;
        while left > 0 {
            let chunk = left.min(max_chunk);
            // chunk <= max_chunk_len, which is a u8
            buf[0] = chunk as u8;
            trace!("sending {} byte chunk, {} left", chunk, left - chunk);
            self.transport
                .transmit(self.address, &buf[..=chunk])
                .map_err(|_| {
                    warning!("chunk transmit failed with {} bytes unsent", left);
                    Error::Io(BusOp::Write)
                })?;

            left -= chunk;
            buf.copy_within(1 + chunk..1 + chunk + left, 1);
            self.transport.delay_ms(self.config.tx_pacing_ms);
        }
        Ok(())
    }
}
