use super::lru_replacer::LruReplacer;
use super::replacer::Replacer;
use crate::frame::PageFrame;
use crate::typedef::FrameId;

/// The LRU-K replacement policy.
///
/// Frames are ranked by their single most recent access, exactly like
/// [`LruReplacer`]. `k` is only reported and does not affect victim selection.
#[derive(Debug)]
pub struct LrukReplacer {
    lru: LruReplacer,
    k: usize, // Number of accesses the policy is labelled with
}

impl LrukReplacer {
    /// Creates a new LRU-K replacer instance.
    pub fn new(num_frames: usize, k: usize) -> Self {
        LrukReplacer {
            lru: LruReplacer::new(num_frames),
            k,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Replacer for LrukReplacer {
    fn record_load(&mut self, frame_id: FrameId) {
        self.lru.record_load(frame_id);
    }

    fn record_hit(&mut self, frame_id: FrameId) {
        self.lru.record_hit(frame_id);
    }

    fn record_touch(&mut self, frame_id: FrameId) {
        self.lru.record_touch(frame_id);
    }

    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        self.lru.victim(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacer::replacer::frames_with_pins;

    #[test]
    fn test_lruk_replacer_follows_last_access() {
        let mut replacer = LrukReplacer::new(3, 3);
        assert_eq!(replacer.k(), 3);

        // Frame 0 is accessed three times, frames 1 and 2 once each, but frame 0's
        // last access is the oldest, so it goes first.
        replacer.record_load(0);
        replacer.record_hit(0);
        replacer.record_hit(0);
        replacer.record_load(1);
        replacer.record_load(2);

        let frames = frames_with_pins(&[0, 0, 0]);
        assert_eq!(Some(0), replacer.victim(&frames));

        replacer.record_touch(0);
        assert_eq!(Some(1), replacer.victim(&frames));
    }

    #[test]
    fn test_lruk_replacer_skips_pinned() {
        let mut replacer = LrukReplacer::new(2, 3);
        replacer.record_load(0);
        replacer.record_load(1);

        assert_eq!(Some(1), replacer.victim(&frames_with_pins(&[1, 0])));
        assert_eq!(None, replacer.victim(&frames_with_pins(&[1, 1])));
    }
}
