use bytes::Bytes;
use pagecache_error::{errdata, errwrite, Error};

use crate::disk::PageStore;
use crate::page::PAGE_SIZE;
use crate::typedef::PageId;
use crate::Result;

const ZERO_PAGE: &[u8] = &[0; PAGE_SIZE];

/// A page store kept entirely in memory, for ephemeral pools and tests.
#[derive(Debug, Clone)]
pub struct MemoryPageStore {
    blocks: Vec<Bytes>,
}

impl MemoryPageStore {
    /// Creates a store holding a single zeroed page, like a freshly created page file.
    pub fn new() -> Self {
        Self::with_pages(1)
    }

    /// Creates a store holding `pages` zeroed pages.
    pub fn with_pages(pages: u32) -> Self {
        Self {
            blocks: vec![Bytes::from_static(ZERO_PAGE); pages as usize],
        }
    }

    /// Returns the stored content of a block without going through a buffer pool.
    pub fn block(&self, page_id: PageId) -> Option<&[u8]> {
        self.blocks.get(page_id as usize).map(|b| b.as_ref())
    }
}

impl Default for MemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore for MemoryPageStore {
    fn page_count(&self) -> u32 {
        self.blocks.len() as u32
    }

    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        if self.blocks.len() < min_pages as usize {
            self.blocks
                .resize(min_pages as usize, Bytes::from_static(ZERO_PAGE));
        }
        Ok(())
    }

    fn read_block(&mut self, page_id: PageId) -> Result<Bytes> {
        self.blocks
            .get(page_id as usize)
            .cloned()
            .ok_or(Error::ReadNonExistingPage(page_id))
    }

    fn write_block(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        if data.len() != PAGE_SIZE {
            return errdata!("Page data must be exactly one page, got {} bytes", data.len());
        }
        match self.blocks.get_mut(page_id as usize) {
            Some(block) => {
                *block = Bytes::copy_from_slice(data);
                Ok(())
            }
            None => errwrite!("page {} is beyond the end of the store", page_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_grows_and_round_trips() {
        let mut store = MemoryPageStore::new();
        assert_eq!(store.page_count(), 1);
        assert_eq!(store.read_block(3), Err(Error::ReadNonExistingPage(3)));

        store.ensure_capacity(4).unwrap();
        assert_eq!(store.page_count(), 4);

        store.write_block(3, &[9; PAGE_SIZE]).unwrap();
        assert_eq!(store.block(3), Some(&[9u8; PAGE_SIZE][..]));
        assert!(matches!(
            store.write_block(4, &[9; PAGE_SIZE]),
            Err(Error::WriteFailed(_))
        ));
    }
}
