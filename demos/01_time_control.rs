/// time control - deterministic due dates with a test clock
use carrier_lending_rs::{Carrier, SafeTimeProvider, TimeSource, Uuid};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let carrier = Carrier::builder()
        .item_id("CAR-007")
        .name("Travel wrap")
        .manufacturer("Didymos")
        .color("indigo")
        .location(Uuid::new_v4())
        .default_loan_length_days(21)
        .build_valid()?;

    let loan = carrier.build_loan(None, &time)?;
    println!("built on {}, due {}", time.now().format("%Y-%m-%d"), loan.due_date);

    controller.advance(Duration::days(30));
    let today = time.now().date_naive();
    println!("\nadvanced to: {}", today);
    println!("overdue: {} ({} days)", loan.is_overdue(today), -loan.days_until_due(today));

    let renewal = carrier.build_loan(None, &time)?;
    println!("a new loan today would be due {}", renewal.due_date);

    Ok(())
}
