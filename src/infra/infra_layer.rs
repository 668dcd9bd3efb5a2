// The infra module contains implementations of core traits.
// Each area gets its own submodule.

#[path = "arena/mod.rs"]
pub mod arena;

#[path = "vault/mod.rs"]
pub mod vault;

#[path = "settings/mod.rs"]
pub mod settings;

#[path = "canvas/mod.rs"]
pub mod canvas;
