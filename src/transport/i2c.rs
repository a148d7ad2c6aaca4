use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};

use super::Transport;
use crate::macros::warning;

/// A [`Transport`] over a blocking `embedded-hal` I2C bus.
///
/// Addresses are 7-bit and passed to the bus unchanged; HALs that expect the
/// address pre-shifted with the R/W bit do that shift internally.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// use soi2c::transport::{I2cTransport, Transport};
///
/// # let i2c = I2cMock::new(&[I2cTransaction::write(0x17, vec![0x01, b'\n'])]);
/// let mut transport = I2cTransport::new(i2c, NoopDelay::new());
/// assert!(transport.transmit(0x17, &[0x01, b'\n']).is_ok());
/// # let (mut i2c, _) = transport.release();
/// # i2c.done();
/// ```
#[derive(Debug)]
pub struct I2cTransport<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> I2cTransport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Wraps an I2C bus and a delay provider.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Returns the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for I2cTransport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes).inspect_err(|e| {
            warning!("i2c write of {} bytes failed: {:?}", bytes.len(), e.kind());
        })
    }

    fn receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let len = buf.len();
        self.i2c.read(address, buf).inspect_err(|e| {
            warning!("i2c read of {} bytes failed: {:?}", len, e.kind());
        })
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_transmit_and_receive_use_the_bus() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x17, vec![0x00, 0x02]),
            I2cTransaction::read(0x17, vec![0x00, 0x02, b'o', b'k']),
        ]);
        let mut transport = I2cTransport::new(i2c, NoopDelay::new());

        assert!(transport.transmit(0x17, &[0x00, 0x02]).is_ok());
        let mut buf = [0u8; 4];
        assert!(transport.receive(0x17, &mut buf).is_ok());
        assert_eq!(&buf, &[0x00, 0x02, b'o', b'k']);
        transport.delay_ms(50);

        let (mut i2c, _) = transport.release();
        i2c.done();
    }

    #[test]
    fn test_bus_errors_are_returned() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x17, vec![0x01, b'\n']).with_error(ErrorKind::Other),
            I2cTransaction::read(0x17, vec![0x00, 0x00]).with_error(ErrorKind::Other),
        ]);
        let mut transport = I2cTransport::new(i2c, NoopDelay::new());

        assert_eq!(
            transport.transmit(0x17, &[0x01, b'\n']),
            Err(ErrorKind::Other)
        );
        let mut buf = [0u8; 2];
        assert_eq!(transport.receive(0x17, &mut buf), Err(ErrorKind::Other));

        let (mut i2c, _) = transport.release();
        i2c.done();
    }
}
