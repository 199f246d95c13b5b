//! Runtime key compatibility registry
//!
//! Declares which execution backends recognize each workflow runtime key,
//! and whether the key is mandatory or optional there. Everything in this
//! crate is compiled-in constant data; queries are pure and may be issued
//! from any number of threads without synchronization.

mod backend;
mod error;
mod key;
mod registry;

pub use backend::{BackendSet, BackendType};
pub use error::RegistryError;
pub use key::{KeySupport, RuntimeKey, Support};
pub use registry::{KeyEntry, RuntimeKeyRegistry};

/// Result type for registry lookups
pub type Result<T> = std::result::Result<T, RegistryError>;
