//! Bus capabilities consumed by the transaction engine.
//!
//! The engine never owns the bus hardware. It is handed something implementing
//! [`Transport`], which supplies three blocking primitives:
//!
//! - `transmit`: write a byte slice to a device address
//! - `receive`: fill a byte slice from a device address
//! - `delay_ms`: block for a number of milliseconds
//!
//! Two adapters are provided:
//! - [`I2cTransport`]: any `embedded-hal` 1.0 [`I2c`](embedded_hal::i2c::I2c) bus plus a
//!   [`DelayNs`](embedded_hal::delay::DelayNs) provider
//! - [`FnTransport`]: three closures, for hosts that expose their bus as plain functions
//!
//! A hung transport call blocks the engine indefinitely; any per-call timeout must
//! be enforced by the transport itself.

use core::fmt;

mod i2c;
pub use i2c::*;

/// Blocking send/receive/delay primitives for a single bus.
pub trait Transport {
    /// Error reported by the bus. The engine only records which operation failed.
    type Error;

    /// Writes all of `bytes` to the device at `address`.
    fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads exactly `buf.len()` bytes from the device at `address`.
    fn receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(address, bytes)
    }

    fn receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).receive(address, buf)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// A [`Transport`] assembled from three closures.
///
/// `transmit` and `receive` return `true` on success.
///
/// ## Example
///
/// ```rust
/// use soi2c::transport::{FnTransport, Transport};
///
/// let mut transport = FnTransport::new(
///     |_addr: u8, _bytes: &[u8]| true,
///     |_addr: u8, buf: &mut [u8]| {
///         buf.fill(0);
///         true
///     },
///     |_ms: u32| {},
/// );
/// assert!(transport.transmit(0x17, b"\x01\n").is_ok());
/// ```
pub struct FnTransport<TX, RX, D> {
    transmit: TX,
    receive: RX,
    delay: D,
}

/// Failure reported by one of the closures of a [`FnTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct FnTransportError;

impl<TX, RX, D> FnTransport<TX, RX, D>
where
    TX: FnMut(u8, &[u8]) -> bool,
    RX: FnMut(u8, &mut [u8]) -> bool,
    D: FnMut(u32),
{
    /// Builds a transport from a transmit, a receive and a delay function.
    pub fn new(transmit: TX, receive: RX, delay: D) -> Self {
        Self {
            transmit,
            receive,
            delay,
        }
    }
}

impl<TX, RX, D> fmt::Debug for FnTransport<TX, RX, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

impl<TX, RX, D> Transport for FnTransport<TX, RX, D>
where
    TX: FnMut(u8, &[u8]) -> bool,
    RX: FnMut(u8, &mut [u8]) -> bool,
    D: FnMut(u32),
{
    type Error = FnTransportError;

    fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if (self.transmit)(address, bytes) {
            Ok(())
        } else {
            Err(FnTransportError)
        }
    }

    fn receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        if (self.receive)(address, buf) {
            Ok(())
        } else {
            Err(FnTransportError)
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        (self.delay)(ms)
    }
}
