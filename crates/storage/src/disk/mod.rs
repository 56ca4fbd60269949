//! The block storage layer beneath the buffer pool.
use std::fmt::Debug;

use bytes::Bytes;

use crate::typedef::PageId;
use crate::Result;

pub mod disk_bridge;
pub mod disk_manager;
pub mod memory;

/// A page-addressed block device holding a single page file.
///
/// Every block is exactly [`crate::page::PAGE_SIZE`] bytes. The buffer pool only
/// talks to a store through [`disk_bridge::DiskBridge`].
pub trait PageStore: Debug + Send {
    /// Returns the number of blocks the file currently holds.
    fn page_count(&self) -> u32;

    /// Grows the file with zeroed blocks until it holds at least `min_pages` blocks.
    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()>;

    /// Reads block `page_id`. Fails with `ReadNonExistingPage` beyond the extent.
    fn read_block(&mut self, page_id: PageId) -> Result<Bytes>;

    /// Overwrites block `page_id`. Fails with `WriteFailed` beyond the extent.
    fn write_block(&mut self, page_id: PageId, data: &[u8]) -> Result<()>;

    /// Makes every written block durable.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
