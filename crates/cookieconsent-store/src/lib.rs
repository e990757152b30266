//! Cookie consent store — localStorage-style slot storage and the consent
//! record persisted in it.

pub mod consent;
pub mod file;
pub mod memory;
pub mod storage;

pub use consent::{ConsentStore, KeyedConsentStore};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use storage::KeyValueStorage;
