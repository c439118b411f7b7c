use std::collections::HashMap;

use crate::carrier::Carrier;
use crate::errors::{LendingError, Result, ValidationErrors, ValidationReason};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::organization::{Category, Location, Organization};
use crate::types::{CarrierId, CategoryId, LoanId, LocationId, OrganizationId};

/// persistence and lookup of carriers, loans and the records they reference
pub trait CarrierStore: Send + Sync {
    fn insert_organization(&mut self, organization: Organization) -> OrganizationId;

    /// the owning organization must already exist
    fn insert_location(&mut self, location: Location) -> Result<LocationId>;

    fn insert_category(&mut self, category: Category) -> CategoryId;

    fn organization(&self, id: OrganizationId) -> Result<&Organization>;

    fn location(&self, id: LocationId) -> Result<&Location>;

    fn category(&self, id: CategoryId) -> Result<&Category>;

    fn carrier(&self, id: CarrierId) -> Result<&Carrier>;

    /// validate, check references, then insert or replace
    fn save_carrier(&mut self, carrier: Carrier) -> Result<CarrierId>;

    /// record that a stored carrier is now somewhere else
    fn move_carrier(&mut self, id: CarrierId, to: LocationId) -> Result<()>;

    fn carriers_of(&self, organization_id: OrganizationId) -> Vec<&Carrier>;

    /// the loaned carrier must already be stored
    fn save_loan(&mut self, loan: Loan) -> Result<LoanId>;

    fn loans_for(&self, carrier_id: CarrierId) -> Vec<&Loan>;

    fn home_location_of(&self, carrier: &Carrier) -> Result<&Location> {
        let id = carrier
            .home_location_id
            .ok_or_else(|| missing("home_location_id"))?;
        self.location(id)
    }

    fn current_location_of(&self, carrier: &Carrier) -> Result<&Location> {
        let id = carrier
            .current_location_id
            .ok_or_else(|| missing("current_location_id"))?;
        self.location(id)
    }

    fn organization_of(&self, carrier: &Carrier) -> Result<&Organization> {
        let id = carrier
            .organization_id
            .ok_or_else(|| missing("organization_id"))?;
        self.organization(id)
    }

    fn loan_carrier(&self, loan: &Loan) -> Result<&Carrier> {
        self.carrier(loan.carrier_id)
    }
}

fn missing(field: &'static str) -> LendingError {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationReason::Missing);
    LendingError::Validation(errors)
}

/// hashmap backed store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    organizations: HashMap<OrganizationId, Organization>,
    locations: HashMap<LocationId, Location>,
    categories: HashMap<CategoryId, Category>,
    carriers: HashMap<CarrierId, Carrier>,
    loans: HashMap<LoanId, Loan>,
    pub events: EventStore,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn check_references(&self, carrier: &Carrier) -> Result<()> {
        let locations = [
            ("home_location_id", carrier.home_location_id),
            ("current_location_id", carrier.current_location_id),
        ];
        for (field, id) in locations {
            if let Some(id) = id {
                if !self.locations.contains_key(&id) {
                    return Err(LendingError::UnknownReference { field, id });
                }
            }
        }

        if let Some(id) = carrier.organization_id {
            if !self.organizations.contains_key(&id) {
                return Err(LendingError::UnknownReference {
                    field: "organization_id",
                    id,
                });
            }
        }

        if let Some(id) = carrier.category_id {
            if !self.categories.contains_key(&id) {
                return Err(LendingError::UnknownReference {
                    field: "category_id",
                    id,
                });
            }
        }

        Ok(())
    }
}

impl CarrierStore for InMemoryStore {
    fn insert_organization(&mut self, organization: Organization) -> OrganizationId {
        let id = organization.id;
        self.organizations.insert(id, organization);
        id
    }

    fn insert_location(&mut self, location: Location) -> Result<LocationId> {
        if !self.organizations.contains_key(&location.organization_id) {
            return Err(LendingError::UnknownReference {
                field: "organization_id",
                id: location.organization_id,
            });
        }
        let id = location.id;
        self.locations.insert(id, location);
        Ok(id)
    }

    fn insert_category(&mut self, category: Category) -> CategoryId {
        let id = category.id;
        self.categories.insert(id, category);
        id
    }

    fn organization(&self, id: OrganizationId) -> Result<&Organization> {
        self.organizations.get(&id).ok_or(LendingError::NotFound {
            entity: "organization",
            id,
        })
    }

    fn location(&self, id: LocationId) -> Result<&Location> {
        self.locations.get(&id).ok_or(LendingError::NotFound {
            entity: "location",
            id,
        })
    }

    fn category(&self, id: CategoryId) -> Result<&Category> {
        self.categories.get(&id).ok_or(LendingError::NotFound {
            entity: "category",
            id,
        })
    }

    fn carrier(&self, id: CarrierId) -> Result<&Carrier> {
        self.carriers.get(&id).ok_or(LendingError::NotFound {
            entity: "carrier",
            id,
        })
    }

    fn save_carrier(&mut self, carrier: Carrier) -> Result<CarrierId> {
        if let Err(err) = carrier.validate() {
            tracing::debug!(carrier_id = %carrier.id, error = %err, "rejected carrier");
            return Err(err);
        }
        self.check_references(&carrier)?;

        let id = carrier.id;
        let organization_id = carrier.organization_id;
        let created = self.carriers.insert(id, carrier).is_none();

        tracing::info!(carrier_id = %id, created, "saved carrier");
        self.events.emit(Event::CarrierSaved {
            carrier_id: id,
            organization_id,
            created,
        });

        Ok(id)
    }

    fn move_carrier(&mut self, id: CarrierId, to: LocationId) -> Result<()> {
        if !self.locations.contains_key(&to) {
            return Err(LendingError::UnknownReference {
                field: "current_location_id",
                id: to,
            });
        }

        let carrier = self.carriers.get_mut(&id).ok_or(LendingError::NotFound {
            entity: "carrier",
            id,
        })?;
        let from = carrier.current_location_id;
        carrier.move_to(to);

        tracing::info!(carrier_id = %id, to = %to, "moved carrier");
        self.events.emit(Event::CarrierMoved {
            carrier_id: id,
            from,
            to,
        });

        Ok(())
    }

    fn carriers_of(&self, organization_id: OrganizationId) -> Vec<&Carrier> {
        self.carriers
            .values()
            .filter(|c| c.organization_id == Some(organization_id))
            .collect()
    }

    fn save_loan(&mut self, loan: Loan) -> Result<LoanId> {
        if !self.carriers.contains_key(&loan.carrier_id) {
            return Err(LendingError::UnknownReference {
                field: "carrier_id",
                id: loan.carrier_id,
            });
        }

        let id = loan.id;
        tracing::info!(loan_id = %id, carrier_id = %loan.carrier_id, due_date = %loan.due_date, "saved loan");
        self.events.emit(Event::LoanSaved {
            loan_id: id,
            carrier_id: loan.carrier_id,
            due_date: loan.due_date,
            timestamp: loan.created_at,
        });
        self.loans.insert(id, loan);

        Ok(id)
    }

    fn loans_for(&self, carrier_id: CarrierId) -> Vec<&Loan> {
        let mut loans: Vec<&Loan> = self
            .loans
            .values()
            .filter(|l| l.carrier_id == carrier_id)
            .collect();
        loans.sort_by_key(|l| l.created_at);
        loans
    }
}
