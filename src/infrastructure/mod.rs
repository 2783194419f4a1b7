//! Infrastructure layer: concrete adapters behind the domain source traits.
//!
//! Everything here talks to the outside world. The rest of the crate only
//! sees the traits in [`crate::domain::sources`].

pub mod http;
