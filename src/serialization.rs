/// serialization support for carriers and loans
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::carrier::Carrier;
use crate::loan::Loan;
use crate::photos::PhotoStorage;
use crate::types::{CarrierId, CarrierStatus, CategoryId, LoanId, LocationId, OrganizationId};

/// serializable view of a carrier, including derived fields
#[derive(Debug, Serialize, Deserialize)]
pub struct CarrierView {
    pub id: CarrierId,
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub display_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub status: CarrierStatus,
    pub home_location_id: Option<LocationId>,
    pub current_location_id: Option<LocationId>,
    pub organization_id: Option<OrganizationId>,
    pub category_id: Option<CategoryId>,
    pub default_loan_length_days: u32,
    pub added_at: Option<DateTime<Utc>>,
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub photo_count: usize,
}

impl CarrierView {
    pub fn from_carrier<P: PhotoStorage>(carrier: &Carrier, photos: &P) -> Self {
        let errors = carrier.validation_errors();

        CarrierView {
            id: carrier.id,
            item_id: carrier.item_id.clone(),
            name: carrier.name.clone(),
            display_name: carrier.display_name(),
            manufacturer: carrier.manufacturer.clone(),
            model: carrier.model.clone(),
            color: carrier.color.clone(),
            status: carrier.status,
            home_location_id: carrier.home_location_id,
            current_location_id: carrier.current_location_id,
            organization_id: carrier.organization_id,
            category_id: carrier.category_id,
            default_loan_length_days: carrier.default_loan_length_days,
            added_at: carrier.added_at,
            is_valid: errors.is_empty(),
            missing_fields: errors.fields().into_iter().map(str::to_string).collect(),
            photo_count: photos.photos(carrier.id).len(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// serializable view of a loan
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub carrier_id: CarrierId,
    pub carrier_display_name: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub is_overdue: bool,
}

impl LoanView {
    pub fn from_loan(loan: &Loan, carrier: &Carrier, today: NaiveDate) -> Self {
        LoanView {
            id: loan.id,
            carrier_id: loan.carrier_id,
            carrier_display_name: carrier.display_name(),
            due_date: loan.due_date,
            days_until_due: loan.days_until_due(today),
            is_overdue: loan.is_overdue(today),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixtures;
    use crate::photos::InMemoryPhotoStore;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use std::io::Cursor;

    #[test]
    fn test_carrier_view_includes_derived_fields() {
        let f = Fixtures::load();
        let mut photos = InMemoryPhotoStore::default();
        photos
            .attach(f.carrier.id, Cursor::new(vec![1u8, 2, 3]), "front.jpg")
            .unwrap();

        let view = CarrierView::from_carrier(&f.carrier, &photos);

        assert_eq!(view.display_name, "Ergobaby Omni 360");
        assert!(view.is_valid);
        assert!(view.missing_fields.is_empty());
        assert_eq!(view.photo_count, 1);
        assert_eq!(view.category_id, Some(f.category.id));
        assert_eq!(view.organization_id, Some(f.organization.id));

        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["display_name"], "Ergobaby Omni 360");
        assert_eq!(json["status"], "available");
    }

    #[test]
    fn test_carrier_view_lists_missing_fields() {
        let mut carrier = Fixtures::load().carrier;
        carrier.color = None;

        let view = CarrierView::from_carrier(&carrier, &InMemoryPhotoStore::default());

        assert!(!view.is_valid);
        assert_eq!(view.missing_fields, vec!["color".to_string()]);
    }

    #[test]
    fn test_loan_view() {
        let f = Fixtures::load();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let loan = f.carrier.build_loan(None, &time).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let view = LoanView::from_loan(&loan, &f.carrier, today);

        assert_eq!(view.carrier_display_name, "Ergobaby Omni 360");
        assert_eq!(view.days_until_due, -5);
        assert!(view.is_overdue);
        assert!(view.to_json_pretty().unwrap().contains("\"due_date\": \"2024-01-15\""));
    }
}
