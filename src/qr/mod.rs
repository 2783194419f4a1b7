//! QR payloads and locally rendered QR symbols.
//!
//! Cards never embed the server-rendered QR image. The payload travels as
//! JSON and the symbol is re-encoded here, which keeps output byte-stable
//! and the codes crisp at print resolution.

pub mod matrix;
pub mod payload;

pub use matrix::{QUIET_ZONE, QrMatrix};
pub use payload::QrPayload;
