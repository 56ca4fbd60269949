use bytes::Bytes;
use pagecache_error::Error;
use serde::Serialize;

use crate::disk::PageStore;
use crate::typedef::PageId;
use crate::Result;

/// Cumulative page I/O performed on behalf of one buffer pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IoStats {
    pub reads: u64,
    pub writes: u64,
}

/// Adapter between the buffer pool and its [`PageStore`].
///
/// Every page read or write the pool performs goes through here, so this is the
/// only place the I/O counters move.
#[derive(Debug)]
pub struct DiskBridge<S: PageStore> {
    store: S,
    stats: IoStats,
}

impl<S: PageStore> DiskBridge<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: IoStats::default(),
        }
    }

    /// Reads a page, growing the file first so that the page exists.
    pub fn read_page(&mut self, page_id: PageId) -> Result<Bytes> {
        self.store.ensure_capacity(page_id + 1)?;
        let bytes = self.store.read_block(page_id)?;
        self.stats.reads += 1;
        Ok(bytes)
    }

    /// Writes a page back. Any failure is reported as `WriteFailed`.
    pub fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        self.store
            .ensure_capacity(page_id + 1)
            .and_then(|_| self.store.write_block(page_id, data))
            .map_err(|e| match e {
                Error::WriteFailed(_) => e,
                other => Error::WriteFailed(format!("page {}: {}", page_id, other)),
            })?;
        self.stats.writes += 1;
        Ok(())
    }

    pub fn stats(&self) -> IoStats {
        self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn close(&mut self) -> Result<()> {
        self.store.close()
    }
}
