use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown runtime key: {0}")]
    UnknownKey(String),

    #[error("Unknown backend type: {0}")]
    UnknownBackend(String),
}
