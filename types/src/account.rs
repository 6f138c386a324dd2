//! Account identifier supplied by the caller's identity provider.

use crate::error::AccountIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of the account performing an operation.
///
/// The ledger does not authenticate accounts; it only needs a stable,
/// comparable key. Identifiers are non-empty and contain no whitespace so
/// they survive a round trip through line-oriented front-ends.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier, rejecting empty or whitespace-bearing input.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountIdError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(AccountIdError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(AccountIdError::Whitespace(s));
        }
        Ok(Self(s))
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
