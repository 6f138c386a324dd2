//! Ledger limits.
//!
//! The defaults are the canonical values; a deployment may tighten or relax
//! them through configuration without changing which error kinds are raised.

use serde::{Deserialize, Serialize};

/// Default maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// Default maximum number of proposals returned by one range query.
pub const MAX_BATCH: u64 = 100;

/// Bounds enforced by the ledger on inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLimits {
    /// Longest accepted description, in characters.
    #[serde(default = "default_max_description_len")]
    pub max_description_len: usize,
    /// Largest `count` accepted by range queries.
    #[serde(default = "default_max_batch")]
    pub max_batch: u64,
}

fn default_max_description_len() -> usize {
    MAX_DESCRIPTION_LEN
}

fn default_max_batch() -> u64 {
    MAX_BATCH
}

impl Default for LedgerLimits {
    fn default() -> Self {
        Self {
            max_description_len: MAX_DESCRIPTION_LEN,
            max_batch: MAX_BATCH,
        }
    }
}

impl LedgerLimits {
    /// Whether a range `count` lies within `1..=max_batch`.
    pub fn accepts_batch(&self, count: u64) -> bool {
        count >= 1 && count <= self.max_batch
    }
}
