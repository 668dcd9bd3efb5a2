// The core module contains all import logic and the capability traits
// the host and infra layers plug into. Each area gets its own submodule.

#[path = "blocks/mod.rs"]
pub mod blocks;

#[path = "vault/mod.rs"]
pub mod vault;

#[path = "settings/mod.rs"]
pub mod settings;

#[path = "workspace/mod.rs"]
pub mod workspace;
