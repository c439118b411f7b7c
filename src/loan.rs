use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CarrierId, LoanId};

/// borrowing transaction against a single carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub carrier_id: CarrierId,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// create an unpersisted loan
    pub fn new(carrier_id: CarrierId, due_date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            carrier_id,
            due_date,
            created_at,
        }
    }

    /// true once the due date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date
    }

    /// days left until the due date, negative when overdue
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn loan_due(due_date: NaiveDate) -> Loan {
        Loan::new(
            Uuid::new_v4(),
            due_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_overdue_only_after_due_date() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let loan = loan_due(due);

        assert!(!loan.is_overdue(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()));
        assert!(!loan.is_overdue(due));
        assert!(loan.is_overdue(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()));
    }

    #[test]
    fn test_days_until_due() {
        let loan = loan_due(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        // leap year february
        assert_eq!(loan.days_until_due(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 29);
        assert_eq!(loan.days_until_due(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()), -3);
    }
}
