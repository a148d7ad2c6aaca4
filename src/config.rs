//! Timing and framing parameters for a [`Context`](crate::driver::Context).

use crate::consts::{
    CONTROL_OVERHEAD, MAX_CHUNK_LEN, POLL_INTERVAL_MS, RX_TIMEOUT_MS, TX_PACING_MS,
};

/// Chunk size and timing used by the transaction engine.
///
/// The default values are the ones the peripheral expects. Hosts talking to
/// that peripheral should not change them; they are exposed so test rigs and
/// compatible peers with different timing can shorten the budgets.
///
/// ## Example
///
/// ```rust
/// use soi2c::config::Config;
///
/// let config = Config::new().with_rx_timeout_ms(1_000);
/// assert_eq!(config.poll_interval_ms, 50);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Config {
    /// Maximum payload bytes per bus transfer, header and control bytes excluded on transmit.
    pub max_chunk_len: u8,
    /// Delay after every transmitted chunk.
    pub tx_pacing_ms: u32,
    /// Total polling time allowed while waiting for the response terminator.
    pub rx_timeout_ms: u32,
    /// Sleep between probes when the peer has nothing available.
    pub poll_interval_ms: u32,
}

impl Config {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            max_chunk_len: MAX_CHUNK_LEN,
            tx_pacing_ms: TX_PACING_MS,
            rx_timeout_ms: RX_TIMEOUT_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }

    /// Sets the maximum chunk length.
    pub const fn with_max_chunk_len(mut self, max_chunk_len: u8) -> Self {
        self.max_chunk_len = max_chunk_len;
        self
    }

    /// Sets the per-chunk transmit pacing delay.
    pub const fn with_tx_pacing_ms(mut self, tx_pacing_ms: u32) -> Self {
        self.tx_pacing_ms = tx_pacing_ms;
        self
    }

    /// Sets the receive timeout budget.
    pub const fn with_rx_timeout_ms(mut self, rx_timeout_ms: u32) -> Self {
        self.rx_timeout_ms = rx_timeout_ms;
        self
    }

    /// Sets the polling interval.
    pub const fn with_poll_interval_ms(mut self, poll_interval_ms: u32) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Largest payload a single receive exchange may request.
    pub const fn max_rx_chunk_len(&self) -> u8 {
        self.max_chunk_len.saturating_sub(CONTROL_OVERHEAD)
    }

    /// Whether the engine can run with these parameters.
    ///
    /// A chunk must leave room for at least one payload byte after the control
    /// overhead, and the poll interval must be nonzero so waiting makes progress.
    pub const fn is_valid(&self) -> bool {
        self.max_chunk_len > CONTROL_OVERHEAD && self.poll_interval_ms > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
