use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// loan length used when a record does not carry its own
pub const STANDARD_LOAN_LENGTH_DAYS: u32 = 14;

/// largest photo accepted by the in-memory store, in bytes
pub const STANDARD_MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// lending configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingConfig {
    /// days added to today when a carrier has no explicit loan length
    #[serde(default = "default_loan_length_days")]
    pub default_loan_length_days: u32,
    /// upper bound on a single attached photo
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,
}

pub(crate) fn default_loan_length_days() -> u32 {
    STANDARD_LOAN_LENGTH_DAYS
}

fn default_max_photo_bytes() -> usize {
    STANDARD_MAX_PHOTO_BYTES
}

impl LendingConfig {
    /// two-week loans
    pub fn standard() -> Self {
        Self {
            default_loan_length_days: STANDARD_LOAN_LENGTH_DAYS,
            max_photo_bytes: STANDARD_MAX_PHOTO_BYTES,
        }
    }

    /// weekend-style loans for high-demand carriers
    pub fn short_term() -> Self {
        Self {
            default_loan_length_days: 3,
            ..Self::standard()
        }
    }

    /// parse from json, filling missing keys from the standard preset
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self::standard()
    }
}
