/// json state - views with derived fields
use std::io::Cursor;

use carrier_lending_rs::{
    Carrier, CarrierView, InMemoryPhotoStore, LoanView, PhotoStorage, SafeTimeProvider,
    TimeSource, Uuid,
};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    ));

    let carrier = Carrier::builder()
        .item_id("CAR-010")
        .name("Ring sling")
        .model("Linen")
        .color("sand")
        .location(Uuid::new_v4())
        .build_valid()?;

    let mut photos = InMemoryPhotoStore::default();
    photos.attach(carrier.id, Cursor::new(vec![0u8; 64]), "front.jpg")?;

    println!("{}", CarrierView::from_carrier(&carrier, &photos).to_json_pretty()?);

    let loan = carrier.build_loan(None, &time)?;
    println!("{}", LoanView::from_loan(&loan, &carrier, time.now().date_naive()).to_json_pretty()?);

    // a candidate missing required fields
    let candidate = Carrier::builder().name("Unlabelled").build();
    println!("{}", CarrierView::from_carrier(&candidate, &photos).to_json_pretty()?);

    Ok(())
}
