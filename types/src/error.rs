//! Errors raised while constructing primitive types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountIdError {
    #[error("account identifier is empty")]
    Empty,

    #[error("account identifier {0:?} contains whitespace")]
    Whitespace(String),
}
