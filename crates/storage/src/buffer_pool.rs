use pagecache_error::{errinput, Error};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BufferPoolConfig, ReplacementStrategy};
use crate::disk::disk_bridge::{DiskBridge, IoStats};
use crate::disk::disk_manager::DiskManager;
use crate::disk::PageStore;
use crate::frame::PageFrame;
use crate::frame_handle::PinnedPage;
use crate::page::NO_PAGE;
use crate::replacer::{ReplacementPolicy, Replacer};
use crate::typedef::{FrameId, PageId};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use crate::Result;

/// Identifies a pinned page and the frame holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    page_id: PageId,
    frame_id: FrameId,
}

impl PageHandle {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }
}

/// A point-in-time snapshot of the buffer pool's frames and I/O counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub strategy: ReplacementStrategy,
    pub capacity: usize,
    pub frame_contents: Vec<PageId>,
    pub dirty_flags: Vec<bool>,
    pub fix_counts: Vec<u32>,
    pub read_io: u64,
    pub write_io: u64,
}

/// Manages page caching and eviction over a single page file.
///
/// The pool is single-threaded: wrap it in a `Mutex` to share it between threads.
#[derive(Debug)]
pub struct BufferPool<S: PageStore = DiskManager> {
    config: BufferPoolConfig,
    frames: Vec<PageFrame>,               // Storage for all frames in the buffer pool
    page_table: HashMap<PageId, FrameId>, // Maps resident page IDs to frame IDs
    free_list: VecDeque<FrameId>,         // Frames that have never held a page
    replacer: ReplacementPolicy,          // Picks victims once every frame is occupied
    disk: DiskBridge<S>,                  // Reads/writes pages and counts the I/O
    shut_down: bool,
}

impl BufferPool<DiskManager> {
    /// Opens a buffer pool over the existing page file at `path`.
    pub fn open(path: impl AsRef<Path>, config: BufferPoolConfig) -> Result<Self> {
        config.validate()?;
        let disk_manager = DiskManager::open(path)?;
        Self::with_store(disk_manager, config)
    }
}

impl<S: PageStore> BufferPool<S> {
    /// Creates a buffer pool with `config.capacity` empty frames over `store`.
    pub fn with_store(store: S, config: BufferPoolConfig) -> Result<Self> {
        config.validate()?;

        let mut frames = Vec::with_capacity(config.capacity);
        frames.resize_with(config.capacity, PageFrame::new);

        info!(
            capacity = config.capacity,
            strategy = %config.strategy,
            "buffer pool initialized"
        );

        Ok(Self {
            frames,
            page_table: HashMap::new(),
            free_list: (0..config.capacity).collect(),
            replacer: ReplacementPolicy::new(&config),
            disk: DiskBridge::new(store),
            shut_down: false,
            config,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.shut_down {
            return Err(Error::PoolShutDown);
        }
        Ok(())
    }

    /// Returns the frame holding `page_id`.
    fn resident_frame(&self, page_id: PageId) -> Result<FrameId> {
        self.ensure_open()?;
        self.page_table
            .get(&page_id)
            .copied()
            .ok_or(Error::PageNotFound(page_id))
    }

    /// Pins `page_id`, reading it from disk if it is not resident.
    ///
    /// A resident page only gains a pin. Otherwise the page is loaded into the
    /// first free frame, or into the victim picked by the replacement policy once
    /// the pool is full. Fails with `AllFramesPinned` if there is no victim.
    pub fn pin(&mut self, page_id: PageId) -> Result<PageHandle> {
        self.ensure_open()?;
        if page_id == NO_PAGE {
            return errinput!("page {} is reserved for empty frames", page_id);
        }

        if let Some(&frame_id) = self.page_table.get(&page_id) {
            let frame = &mut self.frames[frame_id];
            frame.increment_pin_count();
            self.replacer.record_hit(frame_id);
            debug!(
                page_id,
                frame_id,
                pin_count = frame.pin_count(),
                "page already resident"
            );
            return Ok(PageHandle { page_id, frame_id });
        }

        let frame_id = match self.free_list.front().copied() {
            Some(frame_id) => {
                self.load(frame_id, page_id)?;
                self.free_list.pop_front();
                debug!(page_id, frame_id, "buffer not full, page pinned to free frame");
                frame_id
            }
            None => {
                let strategy = self.replacer.strategy();
                let Some(frame_id) = self.replacer.victim(&self.frames) else {
                    warn!(%strategy, page_id, "cannot pin page, all pages are in use");
                    return Err(Error::AllFramesPinned);
                };
                let evicted = self.frames[frame_id].page_id();
                self.load(frame_id, page_id)?;
                debug!(%strategy, page_id, frame_id, evicted, "evicted page to make room");
                frame_id
            }
        };

        self.frames[frame_id].increment_pin_count();
        self.replacer.record_load(frame_id);
        Ok(PageHandle { page_id, frame_id })
    }

    /// Pins `page_id` and wraps it in a guard that unpins on drop.
    pub fn pin_guard(&mut self, page_id: PageId) -> Result<PinnedPage<'_, S>> {
        let handle = self.pin(page_id)?;
        Ok(PinnedPage::new(self, handle))
    }

    /// Replaces the content of a frame with `page_id`.
    ///
    /// A dirty outgoing page is written back before the incoming page is read.
    /// On failure the frame still holds its previous page.
    fn load(&mut self, frame_id: FrameId, page_id: PageId) -> Result<()> {
        let frame = &mut self.frames[frame_id];

        if frame.is_dirty() {
            let outgoing = frame.page_id();
            self.disk
                .write_page(outgoing, frame.data())
                .inspect_err(|e| warn!(page_id = outgoing, error = %e, "write-back failed"))?;
            frame.set_dirty(false);
        }

        let bytes = self.disk.read_page(page_id)?;

        if !frame.is_empty() {
            self.page_table.remove(&frame.page_id());
        }
        frame.load(page_id, &bytes);
        self.page_table.insert(page_id, frame_id);
        Ok(())
    }

    /// Releases one pin on `page_id`.
    ///
    /// Fails with `InvalidUnpin` instead of letting the pin count go negative.
    pub fn unpin(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.resident_frame(page_id)?;
        let frame = &mut self.frames[frame_id];

        if !frame.decrement_pin_count() {
            warn!(page_id, frame_id, "unpin of a page that is not pinned");
            return Err(Error::InvalidUnpin(page_id));
        }
        if self.config.touch_on_unpin {
            self.replacer.record_touch(frame_id);
        }

        debug!(page_id, frame_id, pin_count = frame.pin_count(), "page unpinned");
        Ok(())
    }

    /// Marks `page_id` as modified.
    ///
    /// With `resync_on_redirty`, a page that is already dirty is first written out
    /// and read back so the buffered copy matches disk before the new change is
    /// tracked. Both I/Os are counted.
    pub fn mark_dirty(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.resident_frame(page_id)?;
        let frame = &mut self.frames[frame_id];

        if frame.is_dirty() && self.config.resync_on_redirty {
            self.disk.write_page(page_id, frame.data())?;
            let bytes = self.disk.read_page(page_id)?;
            frame.refresh(&bytes);
        }
        frame.set_dirty(true);
        self.replacer.record_touch(frame_id);

        debug!(page_id, frame_id, "page marked dirty");
        Ok(())
    }

    /// Writes `page_id` to disk. Fails with `NotDirty` if there is nothing to write.
    pub fn force_page(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.resident_frame(page_id)?;
        let frame = &mut self.frames[frame_id];

        if !frame.is_dirty() {
            return Err(Error::NotDirty(page_id));
        }
        self.disk.write_page(page_id, frame.data())?;
        frame.set_dirty(false);
        self.replacer.record_touch(frame_id);

        debug!(page_id, frame_id, "page written to disk");
        Ok(())
    }

    /// Writes every dirty, unpinned page to disk.
    ///
    /// Stops at the first failed write; pages after it stay dirty.
    pub fn flush_all(&mut self) -> Result<()> {
        self.ensure_open()?;

        let mut flushed = 0;
        for frame in self
            .frames
            .iter_mut()
            .filter(|frame| frame.is_evictable() && frame.is_dirty())
        {
            let page_id = frame.page_id();
            self.disk
                .write_page(page_id, frame.data())
                .inspect_err(|e| warn!(page_id, error = %e, "flush stopped"))?;
            frame.set_dirty(false);
            flushed += 1;
        }

        debug!(flushed, "dirty pages written to disk");
        Ok(())
    }

    /// Flushes every dirty page and releases all frames.
    ///
    /// Refused with `PagesStillPinned` while any page is pinned, leaving the pool
    /// usable. After a successful shutdown every operation fails with `PoolShutDown`.
    pub fn shutdown(&mut self) -> Result<()> {
        self.ensure_open()?;

        let pinned = self
            .frames
            .iter()
            .filter(|frame| !frame.is_evictable())
            .count();
        if pinned > 0 {
            warn!(pinned, "cannot shut down buffer pool, pages still in use");
            return Err(Error::PagesStillPinned(pinned));
        }

        self.flush_all()?;
        self.disk.close()?;

        self.frames = Vec::new();
        self.page_table.clear();
        self.free_list.clear();
        self.shut_down = true;

        let io = self.disk.stats();
        info!(read_io = io.reads, write_io = io.writes, "buffer pool shut down");
        Ok(())
    }

    /// Returns the bytes of a resident page.
    pub fn page(&self, page_id: PageId) -> Result<&[u8]> {
        let frame_id = self.resident_frame(page_id)?;
        Ok(self.frames[frame_id].data())
    }

    /// Returns the bytes of a resident page for modification. Callers must
    /// follow up with [`BufferPool::mark_dirty`].
    pub fn page_mut(&mut self, page_id: PageId) -> Result<&mut [u8]> {
        let frame_id = self.resident_frame(page_id)?;
        Ok(self.frames[frame_id].data_mut())
    }

    pub(crate) fn frame(&self, frame_id: FrameId) -> &PageFrame {
        &self.frames[frame_id]
    }

    pub(crate) fn frame_mut(&mut self, frame_id: FrameId) -> &mut PageFrame {
        &mut self.frames[frame_id]
    }

    /// Returns the total number of frames in the buffer pool.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn strategy(&self) -> ReplacementStrategy {
        self.config.strategy
    }

    pub fn config(&self) -> &BufferPoolConfig {
        &self.config
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Returns the underlying page store.
    pub fn store(&self) -> &S {
        self.disk.store()
    }

    pub fn is_resident(&self, page_id: PageId) -> bool {
        self.page_table.contains_key(&page_id)
    }

    /// Returns the pin count of a page, or `None` if it is not in the buffer pool.
    pub fn pin_count(&self, page_id: PageId) -> Option<u32> {
        let frame_id = self.page_table.get(&page_id)?;
        Some(self.frames[*frame_id].pin_count())
    }

    /// Returns the number of frames a new page could be loaded into.
    pub fn free_frame_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.is_evictable())
            .count()
    }

    /// Returns the page held by each frame, `NO_PAGE` for empty frames.
    pub fn frame_contents(&self) -> Vec<PageId> {
        self.frames.iter().map(PageFrame::page_id).collect()
    }

    /// Returns the dirty flag of each frame.
    pub fn dirty_flags(&self) -> Vec<bool> {
        self.frames.iter().map(PageFrame::is_dirty).collect()
    }

    /// Returns the pin count of each frame.
    pub fn fix_counts(&self) -> Vec<u32> {
        self.frames.iter().map(PageFrame::pin_count).collect()
    }

    /// Returns the number of pages read from disk since initialization.
    pub fn num_read_io(&self) -> u64 {
        self.disk.stats().reads
    }

    /// Returns the number of pages written to disk since initialization.
    pub fn num_write_io(&self) -> u64 {
        self.disk.stats().writes
    }

    pub fn io_stats(&self) -> IoStats {
        self.disk.stats()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            strategy: self.strategy(),
            capacity: self.capacity(),
            frame_contents: self.frame_contents(),
            dirty_flags: self.dirty_flags(),
            fix_counts: self.fix_counts(),
            read_io: self.num_read_io(),
            write_io: self.num_write_io(),
        }
    }
}

impl<S: PageStore> Drop for BufferPool<S> {
    /// A pool dropped without a shutdown still writes back what it can.
    fn drop(&mut self) {
        if self.shut_down {
            return;
        }
        if let Err(e) = self.flush_all().and_then(|_| self.disk.close()) {
            warn!(error = %e, "failed to flush buffer pool on drop");
        }
    }
}
