use core::fmt;

use crate::{
    page::{NO_PAGE, PAGE_SIZE},
    typedef::PageId,
};

/// One slot of the buffer pool: a resident page plus its pin and dirty state.
///
/// The data buffer is allocated once when the frame is created and reused for
/// every page the frame holds afterwards.
pub struct PageFrame {
    page_id: PageId, // Resident page, or NO_PAGE
    is_dirty: bool,  // Modified since it was read or last written back
    pin_cnt: u32,    // Number of outstanding pins
    data: Box<[u8]>, // Page data storage
}

impl fmt::Debug for PageFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFrame")
            .field("page_id", &self.page_id)
            .field("is_dirty", &self.is_dirty)
            .field("pin_cnt", &self.pin_cnt)
            .finish()
    }
}

impl PageFrame {
    /// Creates a new, empty frame.
    pub(crate) fn new() -> Self {
        Self {
            page_id: NO_PAGE,
            is_dirty: false,
            pin_cnt: 0,
            data: vec![0; PAGE_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the page ID, or `NO_PAGE` for an empty frame.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn is_empty(&self) -> bool {
        self.page_id == NO_PAGE
    }

    /// Checks if the page is dirty.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Returns the current pin count.
    pub fn pin_count(&self) -> u32 {
        self.pin_cnt
    }

    /// A frame can be handed to a replacer only while nobody holds it.
    pub fn is_evictable(&self) -> bool {
        self.pin_cnt == 0
    }

    /// Provides read-only access to page data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Provides mutable access to page data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Marks the page as dirty or clean.
    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.is_dirty = dirty;
    }

    /// Increments the pin count by 1.
    pub(crate) fn increment_pin_count(&mut self) {
        self.pin_cnt += 1;
    }

    /// Decrements the pin count by 1. Returns false, leaving the count alone, if it is already zero.
    pub(crate) fn decrement_pin_count(&mut self) -> bool {
        match self.pin_cnt.checked_sub(1) {
            Some(pin_cnt) => {
                self.pin_cnt = pin_cnt;
                true
            }
            None => false,
        }
    }

    /// Replaces the resident page with `page_id`, copying in its on-disk bytes.
    /// The frame comes out clean and unpinned.
    pub(crate) fn load(&mut self, page_id: PageId, bytes: &[u8]) {
        assert_eq!(bytes.len(), PAGE_SIZE, "page read must be exactly one page");
        self.page_id = page_id;
        self.pin_cnt = 0;
        self.is_dirty = false;
        self.data.copy_from_slice(bytes);
    }

    /// Overwrites the page data with bytes re-read from disk, keeping identity and pins.
    pub(crate) fn refresh(&mut self, bytes: &[u8]) {
        assert_eq!(bytes.len(), PAGE_SIZE, "page read must be exactly one page");
        self.data.copy_from_slice(bytes);
    }
}
