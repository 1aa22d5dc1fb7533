//! # homestash-label
//!
//! The QR label codec: a thin adapter between the label wire payload and
//! scannable PNG rasters. Encoding goes through the `qrcode` crate and is
//! deterministic for a given payload and [`LabelConfig`]; decoding locates
//! and reads symbols with `rqrr`. No business logic lives here.

pub mod decoder;
pub mod encoder;
pub mod payload;

pub use decoder::LabelDecoder;
pub use encoder::LabelEncoder;
pub use payload::LabelPayload;
