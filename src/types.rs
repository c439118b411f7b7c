use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a carrier
pub type CarrierId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a location
pub type LocationId = Uuid;

/// unique identifier for an organization
pub type OrganizationId = Uuid;

/// unique identifier for a category
pub type CategoryId = Uuid;

/// unique identifier for an attached photo
pub type PhotoId = Uuid;

/// carrier status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierStatus {
    /// on the shelf and loanable
    #[default]
    Available,
    /// temporarily out of circulation
    Unavailable,
    /// permanently retired from lending
    Disabled,
    /// no longer owned by the organization
    Sold,
}

impl CarrierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierStatus::Available => "available",
            CarrierStatus::Unavailable => "unavailable",
            CarrierStatus::Disabled => "disabled",
            CarrierStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
