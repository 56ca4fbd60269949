use super::replacer::Replacer;
use crate::frame::PageFrame;
use crate::typedef::FrameId;

/// Second-chance replacement with a hand sweeping the frame array.
#[derive(Debug)]
pub struct ClockReplacer {
    reference_bits: Vec<bool>,
    hand: FrameId,
}

impl ClockReplacer {
    pub fn new(num_frames: usize) -> Self {
        Self {
            reference_bits: vec![false; num_frames],
            hand: 0,
        }
    }

    /// Returns the frame the hand currently points at.
    #[cfg(test)]
    pub(crate) fn hand(&self) -> FrameId {
        self.hand
    }

    #[cfg(test)]
    pub(crate) fn reference_bit(&self, frame_id: FrameId) -> bool {
        self.reference_bits[frame_id]
    }
}

impl Replacer for ClockReplacer {
    fn record_load(&mut self, frame_id: FrameId) {
        self.reference_bits[frame_id] = true;
    }

    fn record_hit(&mut self, frame_id: FrameId) {
        self.reference_bits[frame_id] = true;
    }

    /// Sweeps from the hand. Unpinned frames with their bit set get it cleared and
    /// are passed over; the first unpinned frame with a clear bit is the victim and
    /// the hand stays on it.
    fn victim(&mut self, frames: &[PageFrame]) -> Option<FrameId> {
        // Without an unpinned frame the sweep would never stop.
        if !frames.iter().any(PageFrame::is_evictable) {
            return None;
        }

        loop {
            if frames[self.hand].is_evictable() {
                if !self.reference_bits[self.hand] {
                    return Some(self.hand);
                }
                self.reference_bits[self.hand] = false;
            }
            self.hand = (self.hand + 1) % frames.len();
        }
    }
}
