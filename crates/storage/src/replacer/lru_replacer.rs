use super::replacer::{min_unpinned_by, Replacer, UNSTAMPED};
use crate::frame::PageFrame;
use crate::typedef::FrameId;

/// Evicts the unpinned frame whose last access is the oldest.
#[derive(Debug)]
pub struct LruReplacer {
    recency_stamps: Vec<u64>,
    current_timestamp: u64,
}

impl LruReplacer {
    pub fn new(num_frames: usize) -> Self {
        LruReplacer {
            recency_stamps: vec![UNSTAMPED; num_frames],
            current_timestamp: 0,
        }
    }

    fn current_timestamp(&mut self) -> u64 {
        let old_timestamp = self.current_timestamp;
        self.current_timestamp += 1;
        old_timestamp
    }

    fn stamp(&mut self, frame_id: FrameId) {
        self.recency_stamps[frame_id] = self.current_timestamp();
    }

    /// Returns the stamp of the frame's most recent access.
    #[cfg(test)]
    pub(crate) fn last_access(&self, frame_id: FrameId) -> u64 {
        self.recency_stamps[frame_id]
    }
}

impl Replacer for LruReplacer {
    fn record_load(&mut self, frame_id: FrameId) {
        self.stamp(frame_id);
    }

    fn record_hit(&mut self, frame_id: FrameId) {
        self.stamp(frame_id);
    }

    fn record_touch(&mut self, frame_id: FrameId) {
        self.stamp(frame_id);
    }

    /// Evicts the least recently used unpinned frame.
    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        min_unpinned_by(frames, |frame_id| self.recency_stamps[frame_id])
    }
}
