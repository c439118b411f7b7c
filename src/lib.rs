pub mod carrier;
pub mod config;
pub mod errors;
pub mod events;
pub mod loan;
pub mod organization;
pub mod photos;
pub mod serialization;
pub mod storage;
pub mod types;

#[cfg(test)]
mod fixtures;

// re-export key types
pub use carrier::{display_name, Carrier, CarrierBuilder};
pub use config::LendingConfig;
pub use errors::{FieldError, LendingError, Result, ValidationErrors, ValidationReason};
pub use events::{Event, EventStore};
pub use loan::Loan;
pub use organization::{Category, Location, Organization};
pub use photos::{InMemoryPhotoStore, Photo, PhotoStorage};
pub use serialization::{CarrierView, LoanView};
pub use storage::{CarrierStore, InMemoryStore};
pub use types::{CarrierId, CarrierStatus, CategoryId, LoanId, LocationId, OrganizationId, PhotoId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use uuid::Uuid;
