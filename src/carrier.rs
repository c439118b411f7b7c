use chrono::{DateTime, Days, NaiveDate, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{default_loan_length_days, LendingConfig};
use crate::errors::{LendingError, Result, ValidationErrors, ValidationReason};
use crate::loan::Loan;
use crate::types::{CarrierId, CarrierStatus, CategoryId, LocationId, OrganizationId};

/// loanable carrier record
///
/// Required fields are optional here so that a candidate record can be
/// held and inspected before it is accepted; see [`Carrier::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub home_location_id: Option<LocationId>,
    pub current_location_id: Option<LocationId>,
    pub organization_id: Option<OrganizationId>,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: CarrierStatus,
    #[serde(default = "default_loan_length_days")]
    pub default_loan_length_days: u32,
    /// when the record was built, from the builder's clock
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

/// join manufacturer and model into a single label
///
/// Empty strings count as absent. Nothing is trimmed.
pub fn display_name(manufacturer: Option<&str>, model: Option<&str>) -> String {
    let manufacturer = manufacturer.filter(|m| !m.is_empty());
    let model = model.filter(|m| !m.is_empty());

    match (manufacturer, model) {
        (Some(manufacturer), Some(model)) => format!("{} {}", manufacturer, model),
        (Some(manufacturer), None) => manufacturer.to_string(),
        (None, Some(model)) => model.to_string(),
        (None, None) => String::new(),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl Carrier {
    /// empty candidate record with standard defaults
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: None,
            name: None,
            manufacturer: None,
            model: None,
            color: None,
            home_location_id: None,
            current_location_id: None,
            organization_id: None,
            category_id: None,
            status: CarrierStatus::default(),
            default_loan_length_days: default_loan_length_days(),
            added_at: None,
        }
    }

    /// builder for creating carriers
    pub fn builder() -> CarrierBuilder {
        CarrierBuilder::new()
    }

    /// collect every missing required field
    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.item_id) {
            errors.add("item_id", ValidationReason::Missing);
        }
        if is_blank(&self.name) {
            errors.add("name", ValidationReason::Missing);
        }
        if is_blank(&self.color) {
            errors.add("color", ValidationReason::Missing);
        }
        if self.home_location_id.is_none() {
            errors.add("home_location_id", ValidationReason::Missing);
        }
        if self.current_location_id.is_none() {
            errors.add("current_location_id", ValidationReason::Missing);
        }

        errors
    }

    /// validate required fields
    pub fn validate(&self) -> Result<()> {
        self.validation_errors().into_result()
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// manufacturer and model joined for display
    pub fn display_name(&self) -> String {
        display_name(self.manufacturer.as_deref(), self.model.as_deref())
    }

    /// due date this carrier would give a loan opened on `today`
    pub fn default_due_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        today
            .checked_add_days(Days::new(u64::from(self.default_loan_length_days)))
            .ok_or_else(|| LendingError::InvalidDate {
                message: format!(
                    "{} plus {} days is out of range",
                    today, self.default_loan_length_days
                ),
            })
    }

    /// build an unpersisted loan for this carrier
    ///
    /// An explicit `due_date` is used as given; otherwise the carrier's own
    /// loan length is added to the current date of `time_provider`.
    pub fn build_loan(
        &self,
        due_date: Option<NaiveDate>,
        time_provider: &SafeTimeProvider,
    ) -> Result<Loan> {
        let now = time_provider.now();

        let due_date = match due_date {
            Some(date) => date,
            None => {
                let derived = self.default_due_date(now.date_naive())?;
                tracing::debug!(
                    carrier_id = %self.id,
                    loan_length_days = self.default_loan_length_days,
                    due_date = %derived,
                    "derived default due date"
                );
                derived
            }
        };

        Ok(Loan::new(self.id, due_date, now))
    }

    /// build loan with system time
    pub fn build_loan_now(&self, due_date: Option<NaiveDate>) -> Result<Loan> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_loan(due_date, &time)
    }

    /// change where the carrier currently is
    pub fn move_to(&mut self, location_id: LocationId) {
        self.current_location_id = Some(location_id);
    }

    pub fn is_at_home(&self) -> bool {
        self.home_location_id.is_some() && self.home_location_id == self.current_location_id
    }
}

impl Default for Carrier {
    fn default() -> Self {
        Self::new()
    }
}

/// builder for carriers
#[derive(Debug, Default)]
pub struct CarrierBuilder {
    item_id: Option<String>,
    name: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
    color: Option<String>,
    home_location_id: Option<LocationId>,
    current_location_id: Option<LocationId>,
    organization_id: Option<OrganizationId>,
    category_id: Option<CategoryId>,
    status: Option<CarrierStatus>,
    default_loan_length_days: Option<u32>,
    config: Option<LendingConfig>,
    added_at: Option<DateTime<Utc>>,
}

impl CarrierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn home_location(mut self, location_id: LocationId) -> Self {
        self.home_location_id = Some(location_id);
        self
    }

    pub fn current_location(mut self, location_id: LocationId) -> Self {
        self.current_location_id = Some(location_id);
        self
    }

    /// set home and current location together
    pub fn location(self, location_id: LocationId) -> Self {
        self.home_location(location_id).current_location(location_id)
    }

    pub fn organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn status(mut self, status: CarrierStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn default_loan_length_days(mut self, days: u32) -> Self {
        self.default_loan_length_days = Some(days);
        self
    }

    /// config used for anything not set explicitly
    pub fn config(mut self, config: &LendingConfig) -> Self {
        self.config = Some(config.clone());
        self
    }

    /// stamp `added_at` from this clock instead of system time
    pub fn set_time(mut self, time: &SafeTimeProvider) -> Self {
        self.added_at = Some(time.now());
        self
    }

    /// build a candidate carrier without validating it
    pub fn build(self) -> Carrier {
        let config = self.config.unwrap_or_default();
        let added_at = self
            .added_at
            .unwrap_or_else(|| SafeTimeProvider::new(TimeSource::System).now());

        Carrier {
            id: Uuid::new_v4(),
            item_id: self.item_id,
            name: self.name,
            manufacturer: self.manufacturer,
            model: self.model,
            color: self.color,
            home_location_id: self.home_location_id,
            current_location_id: self.current_location_id,
            organization_id: self.organization_id,
            category_id: self.category_id,
            status: self.status.unwrap_or_default(),
            default_loan_length_days: self
                .default_loan_length_days
                .unwrap_or(config.default_loan_length_days),
            added_at: Some(added_at),
        }
    }

    /// build and reject the carrier if a required field is missing
    pub fn build_valid(self) -> Result<Carrier> {
        let carrier = self.build();
        carrier.validate()?;
        Ok(carrier)
    }
}
