//! Label rendering and scan decoding.

pub mod service;

pub use service::LabelService;
