use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CarrierId, LoanId, LocationId, OrganizationId, PhotoId};

/// events recorded by the collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    // carrier events
    CarrierSaved {
        carrier_id: CarrierId,
        organization_id: Option<OrganizationId>,
        created: bool,
    },
    CarrierMoved {
        carrier_id: CarrierId,
        from: Option<LocationId>,
        to: LocationId,
    },

    // loan events
    LoanSaved {
        loan_id: LoanId,
        carrier_id: CarrierId,
        due_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },

    // photo events
    PhotoAttached {
        carrier_id: CarrierId,
        photo_id: PhotoId,
        filename: String,
        byte_size: usize,
    },
    PhotoDetached {
        carrier_id: CarrierId,
        photo_id: PhotoId,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
