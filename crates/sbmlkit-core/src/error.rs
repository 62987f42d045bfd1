//! Error types for sbmlkit-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;
