//! Item code allocation.
//!
//! Item codes are `ITEM-<YYYYMMDD>-<NNNNN>` with a random 5-digit
//! suffix, so uniqueness is not guaranteed by construction: the allocator
//! draws, probes the gateway, and re-rolls until it finds an unused code
//! or the retry budget runs out. Callers must still treat the following
//! insert as fallible, since two requests can pass the probe with the same
//! draw, and the database's unique constraint settles that race.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use homestash_core::config::allocator::AllocatorConfig;
use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::traits::gateway::InventoryGateway;
use homestash_core::types::code::{ItemCode, ITEM_SUFFIX_MAX, ITEM_SUFFIX_MIN};

/// Source of random code suffixes. A seam so tests can force collisions.
pub trait SuffixSource: Send + Sync + 'static {
    /// Draw one suffix in `10000..=99999`.
    fn draw(&self) -> u32;
}

/// The production suffix source: thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn draw(&self) -> u32 {
        rand::thread_rng().gen_range(ITEM_SUFFIX_MIN..=ITEM_SUFFIX_MAX)
    }
}

/// Allocates collision-free item codes.
#[derive(Clone)]
pub struct ItemCodeAllocator {
    gateway: Arc<dyn InventoryGateway>,
    suffixes: Arc<dyn SuffixSource>,
    max_retries: u32,
}

impl ItemCodeAllocator {
    /// Create an allocator with the production RNG.
    pub fn new(gateway: Arc<dyn InventoryGateway>, config: &AllocatorConfig) -> Self {
        Self::with_suffix_source(gateway, config, Arc::new(RandomSuffix))
    }

    /// Create an allocator with a custom suffix source.
    pub fn with_suffix_source(
        gateway: Arc<dyn InventoryGateway>,
        config: &AllocatorConfig,
        suffixes: Arc<dyn SuffixSource>,
    ) -> Self {
        Self {
            gateway,
            suffixes,
            max_retries: config.max_retries,
        }
    }

    /// Allocate a code no existing item carries.
    ///
    /// Fails with `DuplicateCode` when every draw in the retry budget was
    /// already taken; the whole deposit operation is safe to retry.
    pub async fn allocate(&self) -> AppResult<ItemCode> {
        let today = Utc::now().date_naive();

        for attempt in 0..self.max_retries {
            let code = ItemCode::generate(today, self.suffixes.draw());
            if !self.gateway.item_code_exists(code.as_str()).await? {
                if attempt > 0 {
                    debug!(code = %code, attempt, "Item code allocated after re-rolls");
                }
                return Ok(code);
            }
        }

        Err(AppError::duplicate_code(format!(
            "No unused item code found after {} draws",
            self.max_retries
        )))
    }
}
