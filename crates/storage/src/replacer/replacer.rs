use std::fmt::Debug;

use crate::config::{BufferPoolConfig, ReplacementStrategy};
use crate::frame::PageFrame;
use crate::typedef::FrameId;

use super::clock_replacer::ClockReplacer;
use super::fifo_replacer::FifoReplacer;
use super::lfu_replacer::LfuReplacer;
use super::lru_k_replacer::LrukReplacer;
use super::lru_replacer::LruReplacer;

/// Stamp carried by frames that have never held a page.
pub(crate) const UNSTAMPED: u64 = u64::MAX;

pub trait Replacer: Send + Debug {
    /// Records that a page was just loaded into the frame, as a first insertion.
    fn record_load(&mut self, frame_id: FrameId);

    /// Records a pin of a page that was already resident in the frame.
    fn record_hit(&mut self, frame_id: FrameId);

    /// Records an access that is not a pin: an unpin, a dirty mark or a forced write.
    fn record_touch(&mut self, _frame_id: FrameId) {}

    /// Picks the frame to evict among the frames with a zero pin count.
    /// Returns `None` if every frame is pinned.
    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId>;
}

/// Returns the unpinned frame with the smallest key. Ties go to the lowest frame index.
pub(crate) fn min_unpinned_by<K, F>(frames: &[PageFrame], key: F) -> Option<FrameId>
where
    K: Ord,
    F: Fn(FrameId) -> K,
{
    frames
        .iter()
        .enumerate()
        .filter(|(_, frame)| frame.is_evictable())
        .map(|(frame_id, _)| frame_id)
        .min_by_key(|&frame_id| (key(frame_id), frame_id))
}

/// The replacement policy of a buffer pool, one variant per [`ReplacementStrategy`].
#[derive(Debug)]
pub enum ReplacementPolicy {
    Fifo(FifoReplacer),
    Lru(LruReplacer),
    LruK(LrukReplacer),
    Clock(ClockReplacer),
    Lfu(LfuReplacer),
}

impl ReplacementPolicy {
    /// Creates the policy selected by `config`, tracking `config.capacity` frames.
    pub fn new(config: &BufferPoolConfig) -> Self {
        let frames = config.capacity;
        match config.strategy {
            ReplacementStrategy::Fifo => Self::Fifo(FifoReplacer::new(frames)),
            ReplacementStrategy::Lru => Self::Lru(LruReplacer::new(frames)),
            ReplacementStrategy::LruK => Self::LruK(LrukReplacer::new(frames, config.lru_k)),
            ReplacementStrategy::Clock => Self::Clock(ClockReplacer::new(frames)),
            ReplacementStrategy::Lfu => Self::Lfu(LfuReplacer::new(frames)),
        }
    }

    pub fn strategy(&self) -> ReplacementStrategy {
        match self {
            Self::Fifo(_) => ReplacementStrategy::Fifo,
            Self::Lru(_) => ReplacementStrategy::Lru,
            Self::LruK(_) => ReplacementStrategy::LruK,
            Self::Clock(_) => ReplacementStrategy::Clock,
            Self::Lfu(_) => ReplacementStrategy::Lfu,
        }
    }

    fn inner(&mut self) -> &mut dyn Replacer {
        match self {
            Self::Fifo(r) => r,
            Self::Lru(r) => r,
            Self::LruK(r) => r,
            Self::Clock(r) => r,
            Self::Lfu(r) => r,
        }
    }
}

impl Replacer for ReplacementPolicy {
    fn record_load(&mut self, frame_id: FrameId) {
        self.inner().record_load(frame_id)
    }

    fn record_hit(&mut self, frame_id: FrameId) {
        self.inner().record_hit(frame_id)
    }

    fn record_touch(&mut self, frame_id: FrameId) {
        self.inner().record_touch(frame_id)
    }

    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        self.inner().victim(frames)
    }
}

/// Builds a frame array where frame `i` holds page `i` with pin count `pins[i]`.
#[cfg(test)]
pub(crate) fn frames_with_pins(pins: &[u32]) -> Vec<PageFrame> {
    use crate::page::PAGE_SIZE;

    pins.iter()
        .enumerate()
        .map(|(i, &count)| {
            let mut frame = PageFrame::new();
            frame.load(i as u32, &[0; PAGE_SIZE]);
            for _ in 0..count {
                frame.increment_pin_count();
            }
            frame
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_unpinned_by_skips_pinned_and_breaks_ties_by_index() {
        let frames = frames_with_pins(&[1, 0, 0, 0]);
        let keys = [0, 5, 2, 2];
        assert_eq!(min_unpinned_by(&frames, |f| keys[f]), Some(2));

        let frames = frames_with_pins(&[1, 1]);
        assert_eq!(min_unpinned_by(&frames, |f| keys[f]), None);
    }

    #[test]
    fn test_policy_matches_configured_strategy() {
        for strategy in ReplacementStrategy::ALL {
            let policy = ReplacementPolicy::new(&BufferPoolConfig::new(3, strategy));
            assert_eq!(policy.strategy(), strategy);
        }
    }

    #[test]
    fn test_policy_refuses_when_all_pinned() {
        let frames = frames_with_pins(&[2, 1, 3]);
        for strategy in ReplacementStrategy::ALL {
            let mut policy = ReplacementPolicy::new(&BufferPoolConfig::new(3, strategy));
            for frame_id in 0..3 {
                policy.record_load(frame_id);
            }
            assert_eq!(policy.victim(&frames), None, "{strategy}");
        }
    }
}
