//! Constants used across the serial-over-I2C protocol implementation.
//!
//! These values are protocol-compatibility parameters: the peripheral enforces its
//! own expectations about chunk framing and timing, so they must match the peer
//! bit-for-bit. [`Config::default()`](crate::config::Config::default) is built from them.
//!
//! ## Key Concepts
//!
//! - **Terminator**: the single byte marking the end of a complete message.
//! - **Chunks**: the bus cannot move more than [`MAX_CHUNK_LEN`] payload bytes per transfer.
//! - **Control frame**: every receive exchange is announced with a 2-byte write
//!   and answered with a 2-byte status prefix.
//! - **Timing**: transmit chunks are paced, and receive polling is bounded by a budget.

/// Byte marking the end of every request and response message.
pub const TERMINATOR: u8 = b'\n';

/// Largest number of payload bytes moved in a single bus transfer.
pub const MAX_CHUNK_LEN: u8 = 250;

/// Bytes of framing around a receive exchange.
///
/// The control write is `[0x00, requested]` and the read back is prefixed with
/// `[available, returned]`, so a read of `n` payload bytes moves `n + 2` bytes.
pub const CONTROL_OVERHEAD: u8 = 2;

/// Largest payload that can be requested in one receive exchange.
pub const MAX_RX_CHUNK_LEN: u8 = MAX_CHUNK_LEN - CONTROL_OVERHEAD;

/// Delay after every transmitted chunk, in milliseconds.
///
/// The peripheral has no way to signal readiness, so this pacing stands in for flow control.
pub const TX_PACING_MS: u32 = 250;

/// Total time the receive phase may spend polling for the terminator, in milliseconds.
pub const RX_TIMEOUT_MS: u32 = 5_000;

/// Delay between two probes of an idle peripheral, in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 50;

/// Smallest usable request buffer: a header byte plus the 2-byte control frame.
pub const MIN_SCRATCH_LEN: usize = 1 + CONTROL_OVERHEAD as usize;

/// Size of the scratch buffer used by [`Context::reset`](crate::driver::Context::reset).
pub const RESET_BUF_LEN: usize = 10;
