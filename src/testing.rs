//! Scripted peripheral for exercising the engine without a bus.

use std::collections::VecDeque;

use crate::transport::Transport;

/// Simulates the device side of the protocol.
///
/// Data chunks written by the host are collected into `data`. Bytes queued with
/// [`with_pending`](FakePeer::with_pending) are served through the control-frame
/// exchange, and bytes queued with [`with_arrival`](FakePeer::with_arrival) become
/// available once enough simulated time has passed through `delay_ms`.
#[derive(Debug, Default)]
pub(crate) struct FakePeer {
    address: u8,
    pending: VecDeque<u8>,
    arrivals: Vec<(u32, Vec<u8>)>,
    clock_ms: u32,
    returned_skew: u8,
    fail_write_at: Option<usize>,
    fail_read_at: Option<usize>,
    /// Every buffer passed to `transmit`, in order.
    pub(crate) writes: Vec<Vec<u8>>,
    /// Length of every `receive` call, in order.
    pub(crate) read_lens: Vec<usize>,
    /// Every `delay_ms` argument, in order.
    pub(crate) delays: Vec<u32>,
    /// Payload reassembled from the host's data chunks.
    pub(crate) data: Vec<u8>,
}

impl FakePeer {
    pub(crate) fn new(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Queues bytes the peer has ready immediately.
    pub(crate) fn with_pending(mut self, bytes: &[u8]) -> Self {
        self.pending.extend(bytes);
        self
    }

    /// Queues bytes that become ready once `at_ms` of delay has elapsed.
    pub(crate) fn with_arrival(mut self, at_ms: u32, bytes: &[u8]) -> Self {
        self.arrivals.push((at_ms, bytes.to_vec()));
        self
    }

    /// Reports `requested + skew` as the returned count on every read.
    pub(crate) fn with_returned_skew(mut self, skew: u8) -> Self {
        self.returned_skew = skew;
        self
    }

    /// Fails the `index`th transmit call.
    pub(crate) fn failing_write(mut self, index: usize) -> Self {
        self.fail_write_at = Some(index);
        self
    }

    /// Fails the `index`th receive call.
    pub(crate) fn failing_read(mut self, index: usize) -> Self {
        self.fail_read_at = Some(index);
        self
    }

    /// The requested length of every control frame written so far.
    pub(crate) fn control_frames(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|w| is_control_frame(w))
            .map(|w| w[1])
            .collect()
    }

    /// Every data chunk written so far, length prefix included.
    pub(crate) fn data_chunks(&self) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|w| !is_control_frame(w))
            .cloned()
            .collect()
    }

    /// Bytes still queued on the peer side.
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn deliver_arrivals(&mut self) {
        let clock_ms = self.clock_ms;
        let (due, later): (Vec<_>, Vec<_>) = self
            .arrivals
            .drain(..)
            .partition(|(at_ms, _)| *at_ms <= clock_ms);
        self.arrivals = later;
        for (_, bytes) in due {
            self.pending.extend(bytes);
        }
    }
}

fn is_control_frame(bytes: &[u8]) -> bool {
    bytes.len() == 2 && bytes[0] == 0
}

impl Transport for FakePeer {
    type Error = ();

    fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        assert_eq!(address, self.address);
        let index = self.writes.len();
        self.writes.push(bytes.to_vec());
        if self.fail_write_at == Some(index) {
            return Err(());
        }
        if !is_control_frame(bytes) {
            assert_eq!(usize::from(bytes[0]), bytes.len() - 1, "bad chunk header");
            self.data.extend_from_slice(&bytes[1..]);
        }
        Ok(())
    }

    fn receive(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        assert_eq!(address, self.address);
        let index = self.read_lens.len();
        self.read_lens.push(buf.len());
        if self.fail_read_at == Some(index) {
            return Err(());
        }
        self.deliver_arrivals();

        let requested = buf.len() - 2;
        for slot in &mut buf[2..] {
            *slot = self.pending.pop_front().unwrap_or(0);
        }
        buf[0] = u8::try_from(self.pending.len()).unwrap_or(u8::MAX);
        buf[1] = u8::try_from(requested)
            .unwrap()
            .wrapping_add(self.returned_skew);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.clock_ms += ms;
        self.deliver_arrivals();
    }
}
