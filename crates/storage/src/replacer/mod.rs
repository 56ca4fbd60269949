//! Victim selection, one replacer per replacement strategy.
pub mod clock_replacer;
pub mod fifo_replacer;
pub mod lfu_replacer;
pub mod lru_k_replacer;
pub mod lru_replacer;
#[allow(clippy::module_inception)]
pub mod replacer;

pub use replacer::{ReplacementPolicy, Replacer};
