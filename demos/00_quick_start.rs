/// quick start - register a carrier and lend it out
use carrier_lending_rs::{
    Carrier, CarrierStore, InMemoryStore, LendingConfig, Location, Organization,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut store = InMemoryStore::new();
    let org = store.insert_organization(Organization::new("Carrier Library"));
    let home = store.insert_location(Location::new(org, "Washington"))?;

    let carrier = Carrier::builder()
        .item_id("CAR-001")
        .name("Everyday carrier")
        .manufacturer("Ergobaby")
        .model("Omni 360")
        .color("black")
        .location(home)
        .organization(org)
        .config(&LendingConfig::standard())
        .build_valid()?;
    store.save_carrier(carrier.clone())?;

    let loan = carrier.build_loan_now(None)?;
    store.save_loan(loan.clone())?;

    println!("{} is due back on {}", carrier.display_name(), loan.due_date);

    Ok(())
}
