use rtrb::{Consumer, Producer, RingBuffer};

/// One instant as seen by both observation points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TapFrame {
    pub raw: f32,
    pub filtered: f32,
}

/// Audio-side end of the observation ring.
///
/// Never blocks: when the ring is full the newest frames are dropped and
/// counted, and the reader simply sees a slightly older window.
pub struct ObservationTap {
    tx: Producer<TapFrame>,
    dropped: u64,
}

impl ObservationTap {
    /// Push one block of paired samples.
    pub fn push_block(&mut self, raw: &[f32], filtered: &[f32]) {
        for (&raw, &filtered) in raw.iter().zip(filtered) {
            if self.tx.push(TapFrame { raw, filtered }).is_err() {
                self.dropped += 1;
            }
        }
    }

    /// Frames lost to a full ring since creation
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Create a tap and the consumer end that feeds an observation bus.
pub fn observation_ring(capacity: usize) -> (ObservationTap, Consumer<TapFrame>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (ObservationTap { tx, dropped: 0 }, rx)
}
