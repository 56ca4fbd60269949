/// Logical page number within a page file.
pub type PageId = u32;

/// Index of a slot in the buffer pool's frame array.
pub type FrameId = usize;
