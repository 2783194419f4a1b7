//! HTTP clients for the two tournament backends.
//!
//! [`MainApi`] wraps the entity service (courses, holes, teams, players).
//! [`TournamentApi`] wraps the tournament service (card payloads, rounds,
//! scores, leaderboards). Both share the request plumbing in [`HttpApi`].

pub mod client;
pub mod main_api;
pub mod tournament_api;

pub use client::HttpApi;
pub use main_api::MainApi;
pub use tournament_api::TournamentApi;
