use crate::disk::PageStore;
use crate::page::PAGE_SIZE;
use crate::typedef::PageId;
use crate::Result;
use bytes::{Bytes, BytesMut};
use fs2::FileExt;
use pagecache_error::{errdata, errwrite, Error};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EMPTY_BUFFER: &[u8] = &[0; PAGE_SIZE];

/// A page file on the local filesystem: block `i` lives at byte offset `i * PAGE_SIZE`.
#[derive(Debug)]
pub struct DiskManager {
    file: std::fs::File,
    path: PathBuf,
    /// Number of whole blocks in the file.
    total_pages: u32,
}

impl DiskManager {
    /// Creates (or truncates) a page file holding a single zeroed page and opens it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::IO(format!("Unable to create file {}: {}", path.display(), e)))?;
        file.write_all(EMPTY_BUFFER)?;
        file.sync_all()?;
        debug!(path = %path.display(), "created page file");
        Self::from_file(file, path)
    }

    /// Opens an existing page file. The file is locked exclusively until the manager is dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::FileNotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_file(file, path)
    }

    /// Removes a page file from disk.
    pub fn destroy(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::remove_file(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(path.display().to_string()),
            _ => Error::from(e),
        })
    }

    fn from_file(file: std::fs::File, path: &Path) -> Result<Self> {
        file.try_lock_exclusive().map_err(|e| {
            Error::IO(format!(
                "Failed to acquire exclusive file lock on {}: {}",
                path.display(),
                e
            ))
        })?;

        let len = file.metadata()?.len();
        if len % PAGE_SIZE as u64 != 0 {
            return errdata!(
                "Page file {} has length {} which is not a multiple of {}",
                path.display(),
                len,
                PAGE_SIZE
            );
        }
        let total_pages = u32::try_from(len / PAGE_SIZE as u64)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            total_pages,
        })
    }

    /// Returns the path of the page file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current size of the page file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        self.file
            .metadata()
            .map(|meta| meta.len())
            .map_err(|e| Error::IO(format!("Failed to get file size: {}", e)))
    }

    fn offset(page_id: PageId) -> u64 {
        page_id as u64 * PAGE_SIZE as u64
    }
}

impl PageStore for DiskManager {
    fn page_count(&self) -> u32 {
        self.total_pages
    }

    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        if self.total_pages >= min_pages {
            return Ok(());
        }
        // set_len zero-fills the extension
        self.file
            .set_len(Self::offset(min_pages))
            .map_err(|e| Error::IO(format!("Failed to resize file: {}", e)))?;
        debug!(
            path = %self.path.display(),
            from = self.total_pages,
            to = min_pages,
            "extended page file"
        );
        self.total_pages = min_pages;
        Ok(())
    }

    fn read_block(&mut self, page_id: PageId) -> Result<Bytes> {
        if page_id >= self.total_pages {
            return Err(Error::ReadNonExistingPage(page_id));
        }

        self.file.seek(SeekFrom::Start(Self::offset(page_id)))?;
        let mut bytes = BytesMut::zeroed(PAGE_SIZE);
        self.file
            .read_exact(&mut bytes)
            .map_err(|_| Error::ReadNonExistingPage(page_id))?;
        Ok(bytes.freeze())
    }

    fn write_block(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        if data.len() != PAGE_SIZE {
            return errdata!("Page data must be exactly one page, got {} bytes", data.len());
        }
        if page_id >= self.total_pages {
            return errwrite!(
                "page {} is beyond the end of {} ({} pages)",
                page_id,
                self.path.display(),
                self.total_pages
            );
        }

        self.file
            .seek(SeekFrom::Start(Self::offset(page_id)))
            .and_then(|_| self.file.write_all(data))
            .map_err(|e| Error::WriteFailed(format!("page {}: {}", page_id, e)))
    }

    fn close(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl Drop for DiskManager {
    /// Releases the exclusive lock taken when the file was opened.
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "failed to unlock page file");
        }
    }
}
