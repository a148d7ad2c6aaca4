//! Status values returned by every protocol operation.
//!
//! Each [`Error`] is terminal for the transaction that produced it. The engine never
//! retries internally; retry counts, backoff and user signaling belong to the caller.

use core::fmt;

use thiserror::Error;

/// The bus operation that failed inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BusOp {
    /// A transmit capability call (data chunk or receive control frame).
    Write,
    /// A receive capability call.
    Read,
}

impl fmt::Display for BusOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusOp::Write => f.write_str("write"),
            BusOp::Read => f.write_str("read"),
        }
    }
}

/// Errors reported by [`Context`](crate::driver::Context) and [`Session`](crate::session::Session).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The context has no device address, an unusable [`Config`](crate::config::Config),
    /// or the request buffer is too small to hold any framing.
    #[error("protocol context is not configured")]
    Configuration,
    /// The request is empty, longer than its buffer, or not terminator-ended.
    #[error("request is empty or not terminated")]
    Termination,
    /// The request buffer has no spare byte for the chunk-length header.
    #[error("no room in request buffer for the chunk header")]
    TxBufferOverflow,
    /// The response did not fit in the caller-supplied buffer.
    #[error("response exceeds receive buffer capacity")]
    RxBufferOverflow,
    /// The transport reported a failure.
    #[error("bus {0} failed")]
    Io(BusOp),
    /// The terminator was not observed before the receive budget ran out.
    #[error("timed out waiting for response terminator")]
    Timeout,
    /// The peer returned a byte count other than the one requested.
    ///
    /// Framing is unreliable from this point; the caller should [`reset`](crate::driver::Context::reset).
    #[error("peer returned {returned} bytes, {requested} were requested")]
    BadSizeReturned {
        /// Bytes asked for in the control frame.
        requested: u8,
        /// Bytes the peer claims to have returned.
        returned: u8,
    },
}

impl Error {
    /// Numeric status code, as used by C hosts of this protocol (`0` is success).
    ///
    /// Read and write failures share code `5`; use [`Error::Io`]'s [`BusOp`] to tell them apart.
    pub const fn code(&self) -> u8 {
        match self {
            Error::Configuration => 1,
            Error::Termination => 2,
            Error::TxBufferOverflow => 3,
            Error::RxBufferOverflow => 4,
            Error::Io(_) => 5,
            Error::Timeout => 7,
            Error::BadSizeReturned { .. } => 8,
        }
    }
}
