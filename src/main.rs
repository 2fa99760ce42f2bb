//! Librarium status report
//!
//! Opens the configured snapshot, wires the services, and prints a summary
//! of the collection and any overdue loans. The interactive surface lives in
//! a separate frontend; this binary is the headless entry point.

use std::sync::Arc;

use librarium::{
    clock::SystemClock,
    config::AppConfig,
    id::UuidGenerator,
    logging,
    repository::{JsonStore, Repository},
    services::Services,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init(&config.logging);

    tracing::info!("Starting Librarium v{}", env!("CARGO_PKG_VERSION"));

    let store = JsonStore::open(&config.storage.path).await?;
    tracing::info!(path = %store.path().display(), "storage snapshot loaded");

    let repository = Repository::json(Arc::new(store));
    let services = Services::new(
        repository,
        Arc::new(UuidGenerator),
        Arc::new(SystemClock),
        config.policy,
    );

    let books = services.books.list().await?;
    let copies = services.copies.list().await?;
    let members = services.members.list().await?;
    let loans = services.loans.list().await?;
    let overdue = services.loans.list_overdue().await?;

    let active_loans = loans.iter().filter(|l| l.is_active()).count();

    println!("Librarium status");
    println!("  books:        {}", books.len());
    println!("  copies:       {}", copies.len());
    println!("  members:      {}", members.len());
    println!("  active loans: {}", active_loans);
    println!("  overdue:      {}", overdue.len());

    for loan in &overdue {
        println!(
            "    loan {} (copy {}, member {}) was due {}",
            loan.id, loan.copy_id, loan.member_id, loan.due_at
        );
    }

    Ok(())
}
