use crate::typedef::PageId;

/// Marks a frame that holds no page.
pub const NO_PAGE: PageId = PageId::MAX;
/// Size of one page, and of one block in the page file.
pub const PAGE_SIZE: usize = 4096;
