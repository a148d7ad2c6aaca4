//! Receive-phase state machine.
//!
//! The peripheral cannot interrupt the host, so responses are collected by polling.
//! Every exchange is a control write `[0x00, n]` announcing a read of `n` payload
//! bytes, followed by a read of `n + 2` bytes shaped `[available, returned, payload..]`.
//!
//! ```text
//!            available > 0
//!   Probing ---------------> Draining(n) --+
//!     ^  |                     ^   |       | available > 0
//!     |  |                     |   +-------+
//!     |  | nothing, no end     |   |
//!     |  v                     |   | nothing left, payload ended in terminator
//!   Waiting <------------------|---+----------------------------------------> Done
//!     |                        |
//!     | deadline reached       +-- nothing left, no terminator --> Waiting
//!     v
//!   Failed(Timeout)
//! ```
//!
//! Only the last byte of the payload just read can end the message. A terminator
//! elsewhere in a chunk, or at the end of a chunk when the peer still reports
//! pending bytes, does not complete the response.
//!
//! Time is tracked as the sum of polling delays against a fixed deadline, so the
//! total wait equals the configured budget even when it is not a multiple of the
//! poll interval.

use crate::config::Config;
use crate::consts::{CONTROL_OVERHEAD, TERMINATOR};
use crate::error::{BusOp, Error};
use crate::macros::{trace, warning};
use crate::transport::Transport;

/// Position of the receive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollState {
    /// Ask the peer how much it has, reading no payload.
    Probing,
    /// Read this many payload bytes the peer reported as available.
    Draining(u8),
    /// Nothing pending and no terminator yet; sleep one poll interval.
    Waiting,
    /// The response is complete.
    Done,
    /// The transaction is aborted.
    Failed(Error),
}

/// Collects one response from the peer.
#[derive(Debug)]
pub(crate) struct Receiver<'s, 'r> {
    state: PollState,
    scratch: &'s mut [u8],
    response: &'r mut [u8],
    received: usize,
    max_chunk: u8,
    elapsed_ms: u32,
    deadline_ms: u32,
    poll_interval_ms: u32,
}

impl<'s, 'r> Receiver<'s, 'r> {
    /// `scratch` must hold at least one payload byte plus the control overhead.
    ///
    /// An empty `response` drains the peer without keeping anything.
    pub(crate) fn new(scratch: &'s mut [u8], response: &'r mut [u8], config: &Config) -> Self {
        let scratch_chunk = scratch.len().saturating_sub(usize::from(CONTROL_OVERHEAD));
        let max_chunk = u8::try_from(scratch_chunk)
            .unwrap_or(u8::MAX)
            .min(config.max_rx_chunk_len());
        Self {
            state: PollState::Probing,
            scratch,
            response,
            received: 0,
            max_chunk,
            elapsed_ms: 0,
            deadline_ms: config.rx_timeout_ms,
            poll_interval_ms: config.poll_interval_ms,
        }
    }

    /// Runs the state machine to completion and returns the response length.
    pub(crate) fn run<T: Transport>(
        mut self,
        transport: &mut T,
        address: u8,
    ) -> Result<usize, Error> {
        loop {
            self.state = match self.state {
                PollState::Probing => self.exchange(transport, address, 0),
                PollState::Draining(n) => self.exchange(transport, address, n),
                PollState::Waiting => self.wait(transport),
                PollState::Done => return Ok(self.received),
                PollState::Failed(e) => return Err(e),
            };
        }
    }

    fn exchange<T: Transport>(
        &mut self,
        transport: &mut T,
        address: u8,
        requested: u8,
    ) -> PollState {
        match self.try_exchange(transport, address, requested) {
            Ok(next) => next,
            Err(e) => {
                warning!("receive exchange of {} bytes failed: {}", requested, e);
                PollState::Failed(e)
            }
        }
    }

    fn try_exchange<T: Transport>(
        &mut self,
        transport: &mut T,
        address: u8,
        requested: u8,
    ) -> Result<PollState, Error> {
        let n = usize::from(requested);

        self.scratch[0] = 0;
        self.scratch[1] = requested;
        transport
            .transmit(address, &self.scratch[..2])
            .map_err(|_| Error::Io(BusOp::Write))?;

        let frame = &mut self.scratch[..n + usize::from(CONTROL_OVERHEAD)];
        transport
            .receive(address, frame)
            .map_err(|_| Error::Io(BusOp::Read))?;

        let available = frame[0];
        let returned = frame[1];
        if returned != requested {
            return Err(Error::BadSizeReturned {
                requested,
                returned,
            });
        }

        let payload = &frame[usize::from(CONTROL_OVERHEAD)..];
        if !self.response.is_empty() {
            let end = self.received + n;
            let dst = self
                .response
                .get_mut(self.received..end)
                .ok_or(Error::RxBufferOverflow)?;
            dst.copy_from_slice(payload);
            self.received = end;
        }
        let terminated = payload.last() == Some(&TERMINATOR);
        trace!(
            "read {} bytes, {} available, terminated: {}",
            n,
            available,
            terminated
        );

        let next = available.min(self.max_chunk);
        Ok(if next > 0 {
            PollState::Draining(next)
        } else if terminated {
            PollState::Done
        } else {
            PollState::Waiting
        })
    }

    fn wait<T: Transport>(&mut self, transport: &mut T) -> PollState {
        let remaining = self.deadline_ms.saturating_sub(self.elapsed_ms);
        if remaining == 0 {
            warning!("no terminator after {} ms", self.elapsed_ms);
            return PollState::Failed(Error::Timeout);
        }
        let ms = remaining.min(self.poll_interval_ms);
        trace!("polling again in {} ms", ms);
        transport.delay_ms(ms);
        self.elapsed_ms += ms;
        PollState::Probing
    }
}
