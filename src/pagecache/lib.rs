//! Pagecache keeps a fixed number of disk pages in memory and decides which one
//! to evict when a new page is needed.
//!
//! A [`BufferPool`] is opened over a page file managed by a [`DiskManager`], or
//! over any other [`PageStore`]. The eviction policy is picked per pool through
//! [`BufferPoolConfig`].

pub use pagecache_error::{Error, Result};
pub use pagecache_storage::{
    BufferPool, BufferPoolConfig, DiskManager, FrameId, IoStats, MemoryPageStore, PageHandle,
    PageId, PageStore, PinnedPage, PoolStats, ReplacementStrategy, NO_PAGE, PAGE_SIZE,
};

/// Replacement policies, for callers that drive a [`replacer::Replacer`] directly.
pub mod replacer {
    pub use pagecache_storage::replacer::clock_replacer::ClockReplacer;
    pub use pagecache_storage::replacer::fifo_replacer::FifoReplacer;
    pub use pagecache_storage::replacer::lfu_replacer::LfuReplacer;
    pub use pagecache_storage::replacer::lru_k_replacer::LrukReplacer;
    pub use pagecache_storage::replacer::lru_replacer::LruReplacer;
    pub use pagecache_storage::replacer::{ReplacementPolicy, Replacer};
}
