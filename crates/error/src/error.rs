pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Invalid data, which typically includes decoding errors or unexpected internal values.
    InvalidData(String),
    /// Invalid user input, such as a bad configuration or a reserved page number.
    InvalidInput(String),
    /// An IO error has occurred.
    IO(String),
    /// The backing page file does not exist or cannot be opened.
    FileNotFound(String),
    /// The requested page lies beyond the extent of the page file or cannot be read.
    ReadNonExistingPage(u32),
    /// Writing a page back to disk failed.
    WriteFailed(String),
    /// The page is not resident in the buffer pool.
    PageNotFound(u32),
    /// A forced write targeted a resident page that is not dirty.
    NotDirty(u32),
    /// The page was unpinned more often than it was pinned.
    InvalidUnpin(u32),
    /// Shutdown was attempted while the given number of frames are still pinned.
    PagesStillPinned(usize),
    /// Every frame is pinned, so no victim can be chosen.
    AllFramesPinned,
    /// The configured replacement strategy is not recognized.
    UnsupportedStrategy(String),
    /// The buffer pool has already been shut down.
    PoolShutDown,
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::IO(msg) => write!(f, "IO error: {}", msg),
            Error::FileNotFound(name) => write!(f, "Page file {} does not exist", name),
            Error::ReadNonExistingPage(page_id) => {
                write!(f, "Cannot read page {}: Page does not exist", page_id)
            }
            Error::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
            Error::PageNotFound(page_id) => write!(f, "Page {} is not in the buffer pool", page_id),
            Error::NotDirty(page_id) => write!(f, "Page {} is not dirty", page_id),
            Error::InvalidUnpin(page_id) => {
                write!(f, "Cannot unpin page {}: Pin count is already zero", page_id)
            }
            Error::PagesStillPinned(count) => {
                write!(f, "Cannot shut down buffer pool: {} page(s) still pinned", count)
            }
            Error::AllFramesPinned => write!(f, "All frames are pinned"),
            Error::UnsupportedStrategy(name) => {
                write!(f, "Unsupported replacement strategy: {}", name)
            }
            Error::PoolShutDown => write!(f, "Buffer pool has been shut down"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Self {
        Error::InvalidData(e.to_string())
    }
}
