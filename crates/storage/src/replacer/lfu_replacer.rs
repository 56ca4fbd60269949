use super::replacer::{min_unpinned_by, Replacer, UNSTAMPED};
use crate::frame::PageFrame;
use crate::typedef::FrameId;

/// Evicts the unpinned frame with the fewest hits since it was loaded, the
/// earliest loaded frame among equals.
#[derive(Debug)]
pub struct LfuReplacer {
    hit_counts: Vec<u64>,
    insertion_stamps: Vec<u64>,
    current_stamp: u64,
}

impl LfuReplacer {
    pub fn new(num_frames: usize) -> Self {
        Self {
            hit_counts: vec![0; num_frames],
            insertion_stamps: vec![UNSTAMPED; num_frames],
            current_stamp: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn hit_count(&self, frame_id: FrameId) -> u64 {
        self.hit_counts[frame_id]
    }
}

impl Replacer for LfuReplacer {
    /// A freshly loaded page counts its load as the first hit.
    fn record_load(&mut self, frame_id: FrameId) {
        self.insertion_stamps[frame_id] = self.current_stamp;
        self.current_stamp += 1;
        self.hit_counts[frame_id] = 1;
    }

    fn record_hit(&mut self, frame_id: FrameId) {
        self.hit_counts[frame_id] += 1;
    }

    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        min_unpinned_by(frames, |frame_id| {
            (self.hit_counts[frame_id], self.insertion_stamps[frame_id])
        })
    }
}
