use core::fmt;
use std::ops::Deref;

use pagecache_error::errinput;
use tracing::warn;

use crate::buffer_pool::{BufferPool, PageHandle};
use crate::disk::PageStore;
use crate::page::PAGE_SIZE;
use crate::typedef::PageId;
use crate::Result;

/// A pinned page that unpins itself when dropped.
///
/// The guard borrows the pool mutably, so the frame cannot be evicted or
/// reassigned while it is alive.
pub struct PinnedPage<'a, S: PageStore> {
    bpm: &'a mut BufferPool<S>,
    handle: PageHandle,
    dirtied: bool,
}

impl<S: PageStore> fmt::Debug for PinnedPage<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedPage")
            .field("handle", &self.handle)
            .field("dirtied", &self.dirtied)
            .finish()
    }
}

impl<'a, S: PageStore> PinnedPage<'a, S> {
    pub(crate) fn new(bpm: &'a mut BufferPool<S>, handle: PageHandle) -> Self {
        Self {
            bpm,
            handle,
            dirtied: false,
        }
    }

    pub fn page_id(&self) -> PageId {
        self.handle.page_id()
    }

    pub fn handle(&self) -> PageHandle {
        self.handle
    }

    pub fn data(&self) -> &[u8] {
        self.bpm.frame(self.handle.frame_id()).data()
    }

    /// Provides mutable access to the page. The first call marks the page dirty.
    pub fn data_mut(&mut self) -> Result<&mut [u8]> {
        if !self.dirtied {
            self.bpm.mark_dirty(self.handle.page_id())?;
            self.dirtied = true;
        }
        Ok(self.bpm.frame_mut(self.handle.frame_id()).data_mut())
    }

    /// Copies `data` into the page at `offset`.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let end = offset + data.len();
        if end > PAGE_SIZE {
            return errinput!(
                "write of {} bytes at offset {} exceeds the page",
                data.len(),
                offset
            );
        }
        self.data_mut()?[offset..end].copy_from_slice(data);
        Ok(())
    }
}

impl<S: PageStore> Deref for PinnedPage<'_, S> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data()
    }
}

impl<S: PageStore> Drop for PinnedPage<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.bpm.unpin(self.handle.page_id()) {
            warn!(page_id = self.handle.page_id(), error = %e, "failed to unpin page");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BufferPoolConfig, ReplacementStrategy};
    use crate::disk::memory::MemoryPageStore;
    use pagecache_error::Error;

    fn pool() -> BufferPool<MemoryPageStore> {
        BufferPool::with_store(
            MemoryPageStore::new(),
            BufferPoolConfig::new(2, ReplacementStrategy::Clock),
        )
        .unwrap()
    }

    #[test]
    fn test_guard_read_only_stays_clean() {
        let mut bpm = pool();
        {
            let page = bpm.pin_guard(1).unwrap();
            assert_eq!(page.len(), PAGE_SIZE);
            assert_eq!(page.handle().frame_id(), 0);
        }
        assert_eq!(bpm.dirty_flags(), vec![false, false]);
        assert_eq!(bpm.fix_counts(), vec![0, 0]);
    }

    #[test]
    fn test_guard_write_out_of_bounds() {
        let mut bpm = pool();
        let mut page = bpm.pin_guard(0).unwrap();
        assert!(matches!(
            page.write(PAGE_SIZE - 1, b"ab"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_guard_nested_with_explicit_pin() {
        let mut bpm = pool();
        bpm.pin(0).unwrap();
        {
            let mut page = bpm.pin_guard(0).unwrap();
            page.data_mut().unwrap()[0] = 42;
        }
        assert_eq!(bpm.pin_count(0), Some(1));
        assert_eq!(bpm.page(0).unwrap()[0], 42);
        bpm.unpin(0).unwrap();
    }
}
