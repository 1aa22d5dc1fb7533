//! Pairing session state.

pub mod state;

pub use state::{PairingSnapshot, PairingState, PendingTag, ScanTransition};
