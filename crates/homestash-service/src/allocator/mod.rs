//! Code allocation: item codes and storage-cell codes.

pub mod item_code;
pub mod storage_code;

pub use item_code::{ItemCodeAllocator, RandomSuffix, SuffixSource};
pub use storage_code::StorageCodeAllocator;
