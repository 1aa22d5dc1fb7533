//! Pairing session configuration.

use serde::{Deserialize, Serialize};

/// Pairing session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// How long a half-completed pairing session survives after its last
    /// scan before it is treated as abandoned.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    600
}
