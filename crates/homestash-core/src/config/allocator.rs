//! Code allocator configuration.

use serde::{Deserialize, Serialize};

/// Code allocator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// How many random suffixes an item-code allocation may draw before
    /// giving up with a duplicate-code error.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

fn default_max_retries() -> u32 {
    16
}
