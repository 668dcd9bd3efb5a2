pub mod local_vault;
pub mod memory_vault;

pub use local_vault::LocalVault;
pub use memory_vault::MemoryVault;
