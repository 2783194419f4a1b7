//! Application layer: the batch drivers and control flows behind the CLI.
//!
//! Services are generic over the source traits so tests run them against
//! mocks; the binary wires in the HTTP implementations.

pub mod batch;
pub mod services;

pub use batch::BatchReport;
