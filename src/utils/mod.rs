//! Utility functions shared across the toolset.
//!
//! - [`slug`] - Filename sanitization for generated documents

pub mod slug;
