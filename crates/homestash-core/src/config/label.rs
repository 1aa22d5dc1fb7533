//! QR label rendering configuration.

use serde::{Deserialize, Serialize};

/// QR label rendering configuration.
///
/// The defaults mirror the household label-printer setup: low error
/// correction, 10-pixel modules, a 4-module quiet zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Error-correction level: `L`, `M`, `Q`, or `H`.
    #[serde(default = "default_error_correction")]
    pub error_correction: String,
    /// Rendered size of one QR module in pixels.
    #[serde(default = "default_module_size")]
    pub module_size: u32,
    /// Quiet-zone margin around the symbol, in modules.
    #[serde(default = "default_margin")]
    pub margin: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            error_correction: default_error_correction(),
            module_size: default_module_size(),
            margin: default_margin(),
        }
    }
}

fn default_error_correction() -> String {
    "L".to_string()
}

fn default_module_size() -> u32 {
    10
}

fn default_margin() -> u32 {
    4
}
