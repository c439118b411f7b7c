//! shared test records

use crate::carrier::Carrier;
use crate::organization::{Category, Location, Organization};
use crate::storage::{CarrierStore, InMemoryStore};
use crate::types::CarrierStatus;

pub(crate) struct Fixtures {
    pub organization: Organization,
    pub washington: Location,
    pub lancaster: Location,
    pub category: Category,
    pub carrier: Carrier,
    pub unavailable: Carrier,
    pub disabled: Carrier,
    pub sold: Carrier,
}

impl Fixtures {
    pub fn load() -> Self {
        let organization = Organization::new("Carrier Library");
        let washington = Location::new(organization.id, "Washington");
        let lancaster = Location::new(organization.id, "Lancaster");
        let category = Category::new("Soft structured");

        let carrier_with = |item_id: &str, name: &str, status: CarrierStatus| {
            Carrier::builder()
                .item_id(item_id)
                .name(name)
                .manufacturer("Ergobaby")
                .model("Omni 360")
                .color("black")
                .location(washington.id)
                .organization(organization.id)
                .category(category.id)
                .status(status)
                .default_loan_length_days(14)
                .build()
        };

        let carrier = carrier_with("CAR-001", "Everyday carrier", CarrierStatus::Available);
        let unavailable = carrier_with("CAR-002", "Out for repair", CarrierStatus::Unavailable);
        let disabled = carrier_with("CAR-003", "Retired carrier", CarrierStatus::Disabled);
        let sold = carrier_with("CAR-004", "Sold carrier", CarrierStatus::Sold);

        Self {
            organization,
            washington,
            lancaster,
            category,
            carrier,
            unavailable,
            disabled,
            sold,
        }
    }

    pub fn all(&self) -> Vec<Carrier> {
        vec![
            self.carrier.clone(),
            self.unavailable.clone(),
            self.disabled.clone(),
            self.sold.clone(),
        ]
    }

    /// store holding the organization, both locations and the category
    pub fn store(&self) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.insert_organization(self.organization.clone());
        store
            .insert_location(self.washington.clone())
            .expect("organization inserted");
        store
            .insert_location(self.lancaster.clone())
            .expect("organization inserted");
        store.insert_category(self.category.clone());
        store
    }
}
