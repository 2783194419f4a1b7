//! Domain layer containing the tournament data model.
//!
//! The toolset owns no data: the graph database behind the two HTTP APIs is
//! the source of truth, and everything here is a read-side view of it.
//!
//! # Architecture
//!
//! - [`entities`] - Typed records and their validation
//! - [`sources`] - Data access trait definitions, implemented by
//!   [`crate::infrastructure::http`]

pub mod entities;
pub mod sources;
