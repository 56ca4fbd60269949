pub mod buffer_pool;
pub mod config;
pub mod disk;
pub mod frame;
pub mod frame_handle;
pub mod page;
pub mod replacer;
pub mod typedef;

pub(crate) type Result<T> = std::result::Result<T, pagecache_error::Error>;

pub use buffer_pool::{BufferPool, PageHandle, PoolStats};
pub use config::{BufferPoolConfig, ReplacementStrategy};
pub use disk::disk_bridge::IoStats;
pub use disk::disk_manager::DiskManager;
pub use disk::memory::MemoryPageStore;
pub use disk::PageStore;
pub use frame_handle::PinnedPage;
pub use page::{NO_PAGE, PAGE_SIZE};
pub use typedef::{FrameId, PageId};
