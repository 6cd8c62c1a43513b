use rtrb::Consumer;

use crate::observe::{
    point::{ObservationPoint, ObservationSnapshot},
    tap::{observation_ring, ObservationTap, TapFrame},
};

/// Snapshots of both observation points taken from the same instants
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPair {
    pub raw: ObservationSnapshot,
    pub filtered: ObservationSnapshot,
}

/// Reader side of the observation ring, owned by the refresh task.
pub struct ObservationBus {
    rx: Consumer<TapFrame>,
    raw: ObservationPoint,
    filtered: ObservationPoint,
    received: u64,
}

impl ObservationBus {
    pub fn new(rx: Consumer<TapFrame>, fft_size: usize, smoothing: f32) -> Self {
        Self {
            rx,
            raw: ObservationPoint::new(fft_size, smoothing),
            filtered: ObservationPoint::new(fft_size, smoothing),
            received: 0,
        }
    }

    /// Move every queued frame into the observation windows.
    ///
    /// Returns the number of frames consumed.
    pub fn drain(&mut self) -> usize {
        let available = self.rx.slots();
        let Ok(chunk) = self.rx.read_chunk(available) else {
            return 0;
        };

        let (first, second) = chunk.as_slices();
        for frame in first.iter().chain(second) {
            self.raw.push(frame.raw);
            self.filtered.push(frame.filtered);
        }
        chunk.commit_all();

        self.received += available as u64;
        available
    }

    /// Capture both points, or `None` if nothing has been observed yet.
    pub fn capture(&mut self) -> Option<SnapshotPair> {
        if self.received == 0 {
            return None;
        }
        Some(SnapshotPair {
            raw: self.raw.snapshot(),
            filtered: self.filtered.snapshot(),
        })
    }

    /// Total frames observed since creation or the last reset
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Drop queued frames and clear both windows.
    pub fn reset(&mut self) {
        self.drain();
        self.raw.reset();
        self.filtered.reset();
        self.received = 0;
    }
}

/// Build a connected tap/bus pair.
///
/// `capacity` is the ring size in frames.
pub fn observation_channel(
    capacity: usize,
    fft_size: usize,
    smoothing: f32,
) -> (ObservationTap, ObservationBus) {
    let (tap, rx) = observation_ring(capacity);
    (tap, ObservationBus::new(rx, fft_size, smoothing))
}
