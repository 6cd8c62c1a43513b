use std::sync::{Arc, Mutex};

use rtrb::Consumer;

use crate::graph::node::{GraphNode, RenderCtx};

/// Receiving end of a live capture stream.
///
/// The capture callback pushes mono samples into the ring; whichever node
/// currently plays live input pops them. Cloning shares the same ring, so the
/// synthesizer can keep a handle across generator rebuilds.
#[derive(Clone)]
pub struct LiveFeed {
    rx: Arc<Mutex<Consumer<f32>>>,
}

impl LiveFeed {
    pub fn new(rx: Consumer<f32>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Fill `out` from the ring, padding with silence on underrun.
    ///
    /// Never blocks: if the ring is momentarily held elsewhere the block is
    /// silent.
    fn read_into(&self, out: &mut [f32]) {
        let Ok(mut rx) = self.rx.try_lock() else {
            out.fill(0.0);
            return;
        };
        for sample in out.iter_mut() {
            *sample = rx.pop().unwrap_or(0.0);
        }
    }

    /// Drop everything queued so playback starts from the newest audio.
    fn discard_backlog(&self) {
        if let Ok(mut rx) = self.rx.try_lock() {
            let queued = rx.slots();
            if let Ok(chunk) = rx.read_chunk(queued) {
                chunk.commit_all();
            }
        }
    }
}

/// Plays a live capture feed, or silence when none is available.
pub struct LiveInputNode {
    feed: Option<LiveFeed>,
    primed: bool,
}

impl LiveInputNode {
    pub fn new(feed: Option<LiveFeed>) -> Self {
        Self {
            feed,
            primed: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn is_connected(&self) -> bool {
        self.feed.is_some()
    }
}

impl GraphNode for LiveInputNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        match &self.feed {
            Some(feed) => {
                // Audio captured while another source was playing is stale
                if !self.primed {
                    feed.discard_backlog();
                    self.primed = true;
                }
                feed.read_into(out);
            }
            None => out.fill(0.0),
        }
    }
}
