// Are.na infra layer.
// - `arena_client.rs` talks to the Are.na HTTP API and downloads block assets.

#[path = "arena_client.rs"]
pub mod arena_client;

pub use arena_client::{ArenaApiClient, DEFAULT_API_URL};
