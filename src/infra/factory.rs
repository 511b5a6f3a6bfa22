use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::{
    aggregator::AggregatorService,
    entitlement::{self, EntitlementService},
    ledger::LedgerService,
    occupancy::OccupancyService,
};
use crate::infra::repositories::{
    sqlite_payment_repo::SqlitePaymentRepo, sqlite_property_repo::SqlitePropertyRepo,
    sqlite_subscriber_repo::SqliteSubscriberRepo, sqlite_tenant_repo::SqliteTenantRepo,
    sqlite_unit_repo::SqliteUnitRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    // Refuse to boot with a feature table where a higher tier lost an
    // entitlement of a lower one.
    entitlement::validate_feature_table();

    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let subscriber_repo = Arc::new(SqliteSubscriberRepo::new(pool.clone()));
    let property_repo = Arc::new(SqlitePropertyRepo::new(pool.clone()));
    let unit_repo = Arc::new(SqliteUnitRepo::new(pool.clone()));
    let tenant_repo = Arc::new(SqliteTenantRepo::new(pool.clone()));
    let payment_repo = Arc::new(SqlitePaymentRepo::new(pool.clone()));

    let entitlement = Arc::new(EntitlementService::new(
        subscriber_repo.clone(),
        property_repo.clone(),
        unit_repo.clone(),
    ));
    let occupancy = Arc::new(OccupancyService::new(tenant_repo.clone()));
    let ledger = Arc::new(LedgerService::new(
        property_repo.clone(),
        unit_repo.clone(),
        tenant_repo.clone(),
        payment_repo.clone(),
    ));
    let aggregator = Arc::new(AggregatorService::new(
        property_repo.clone(),
        unit_repo.clone(),
        tenant_repo.clone(),
        payment_repo.clone(),
    ));

    AppState {
        config: config.clone(),
        subscriber_repo,
        property_repo,
        unit_repo,
        tenant_repo,
        payment_repo,
        entitlement,
        occupancy,
        ledger,
        aggregator,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
