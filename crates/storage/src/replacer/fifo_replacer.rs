use super::replacer::{min_unpinned_by, Replacer, UNSTAMPED};
use crate::frame::PageFrame;
use crate::typedef::FrameId;

/// Evicts the unpinned frame whose page was loaded first.
#[derive(Debug)]
pub struct FifoReplacer {
    insertion_stamps: Vec<u64>,
    current_stamp: u64,
}

impl FifoReplacer {
    pub fn new(num_frames: usize) -> Self {
        Self {
            insertion_stamps: vec![UNSTAMPED; num_frames],
            current_stamp: 0,
        }
    }

    fn advance_stamp(&mut self) -> u64 {
        let stamp = self.current_stamp;
        self.current_stamp += 1;
        stamp
    }
}

impl Replacer for FifoReplacer {
    fn record_load(&mut self, frame_id: FrameId) {
        self.insertion_stamps[frame_id] = self.advance_stamp();
    }

    /// Hits do not change the queue order.
    fn record_hit(&mut self, _frame_id: FrameId) {}

    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        min_unpinned_by(frames, |frame_id| self.insertion_stamps[frame_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacer::replacer::frames_with_pins;

    #[test]
    fn test_fifo_evicts_oldest_load() {
        let mut replacer = FifoReplacer::new(3);
        replacer.record_load(2);
        replacer.record_load(0);
        replacer.record_load(1);

        let frames = frames_with_pins(&[0, 0, 0]);
        assert_eq!(Some(2), replacer.victim(&frames));
    }

    #[test]
    fn test_fifo_ignores_hits_and_touches() {
        let mut replacer = FifoReplacer::new(2);
        replacer.record_load(0);
        replacer.record_load(1);
        replacer.record_hit(0);
        replacer.record_touch(0);

        let frames = frames_with_pins(&[0, 0]);
        assert_eq!(Some(0), replacer.victim(&frames));
    }

    #[test]
    fn test_fifo_skips_pinned_frames() {
        let mut replacer = FifoReplacer::new(3);
        for frame_id in 0..3 {
            replacer.record_load(frame_id);
        }

        assert_eq!(Some(1), replacer.victim(&frames_with_pins(&[1, 0, 0])));
        assert_eq!(Some(2), replacer.victim(&frames_with_pins(&[1, 1, 0])));
        assert_eq!(None, replacer.victim(&frames_with_pins(&[1, 1, 1])));
    }

    #[test]
    fn test_fifo_reload_moves_frame_to_back() {
        let mut replacer = FifoReplacer::new(2);
        replacer.record_load(0);
        replacer.record_load(1);
        // frame 0 was evicted and refilled
        replacer.record_load(0);

        assert_eq!(Some(1), replacer.victim(&frames_with_pins(&[0, 0])));
    }
}
