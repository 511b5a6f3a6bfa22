mod common;

use chrono::{TimeZone, Utc};
use common::TestApp;
use immogest_core::domain::models::subscriber::PlanTier;

#[tokio::test]
async fn test_monthly_revenue_preseeds_trailing_window() {
    let app = TestApp::new().await;
    let owner = app.seed_subscriber(PlanTier::Premium, None).await;
    let property = app.seed_property(&owner, "Immeuble Fann").await;
    let unit = app.seed_unit(&property, "A1", 50000.0).await;
    let tenant = app.seed_tenant(&unit, "Awa Diop").await;

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    // Two payments inside the window, one duplicate month, one ancient one outside.
    app.state.ledger.record_payment(&tenant, 50000.0, "2024-05", now).await.unwrap();
    app.state.ledger.record_payment(&tenant, 20000.0, "2024-05", now).await.unwrap();
    app.state.ledger.record_payment(&tenant, 50000.0, "2024-06", now).await.unwrap();
    app.state.ledger.record_payment(&tenant, 99999.0, "2020-01", now).await.unwrap();

    let revenue = app.state.aggregator.monthly_revenue(&owner.id, 12, now).await.unwrap();

    // Exactly the 12 trailing periods, 2023-07 through 2024-06.
    assert_eq!(revenue.len(), 12);
    let periods: Vec<&String> = revenue.keys().collect();
    assert_eq!(periods.first().map(|s| s.as_str()), Some("2023-07"));
    assert_eq!(periods.last().map(|s| s.as_str()), Some("2024-06"));

    // Duplicate months sum; untouched months are zero; 2020-01 is absent.
    assert_eq!(revenue.get("2024-05"), Some(&70000.0));
    assert_eq!(revenue.get("2024-06"), Some(&50000.0));
    assert_eq!(revenue.get("2024-01"), Some(&0.0));
    assert!(!revenue.contains_key("2020-01"));

    // Re-running with the same inputs yields the same map.
    let again = app.state.aggregator.monthly_revenue(&owner.id, 12, now).await.unwrap();
    assert_eq!(revenue, again);
}

#[tokio::test]
async fn test_monthly_revenue_includes_past_tenants() {
    let app = TestApp::new().await;
    let owner = app.seed_subscriber(PlanTier::Premium, None).await;
    let property = app.seed_property(&owner, "Immeuble Fann").await;
    let unit = app.seed_unit(&property, "A1", 50000.0).await;

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    let departed = app.seed_tenant(&unit, "Moussa Ndiaye").await;
    app.state.ledger.record_payment(&departed, 50000.0, "2024-04", now).await.unwrap();
    app.state.occupancy.vacate(&departed).await.unwrap();

    let current = app.seed_tenant(&unit, "Fatou Sall").await;
    app.state.ledger.record_payment(&current, 50000.0, "2024-06", now).await.unwrap();

    let revenue = app.state.aggregator.monthly_revenue(&owner.id, 12, now).await.unwrap();
    assert_eq!(revenue.get("2024-04"), Some(&50000.0));
    assert_eq!(revenue.get("2024-06"), Some(&50000.0));
}

#[tokio::test]
async fn test_portfolio_stats() {
    let app = TestApp::new().await;
    let owner = app.seed_subscriber(PlanTier::Premium, None).await;
    let property = app.seed_property(&owner, "Immeuble Fann").await;
    let occupied = app.seed_unit(&property, "A1", 50000.0).await;
    let _vacant = app.seed_unit(&property, "A2", 60000.0).await;
    let tenant = app.seed_tenant(&occupied, "Awa Diop").await;

    let now = Utc::now();
    app.state.ledger.record_payment(&tenant, 50000.0, "2024-02", now).await.unwrap();
    app.state.ledger.record_payment(&tenant, 40000.0, "2024-03", now).await.unwrap();

    let stats = app.state.aggregator.portfolio_stats(&owner.id).await.unwrap();
    assert_eq!(stats.total_payments, 2);
    assert_eq!(stats.total_revenue, 90000.0);
    assert_eq!(stats.avg_payment, 45000.0);
    // 1 of 2 units occupied.
    assert_eq!(stats.collection_rate, 50.0);
}

#[tokio::test]
async fn test_stats_on_empty_portfolio_never_divide_by_zero() {
    let app = TestApp::new().await;
    let owner = app.seed_subscriber(PlanTier::Free, None).await;

    let stats = app.state.aggregator.portfolio_stats(&owner.id).await.unwrap();
    assert_eq!(stats.total_payments, 0);
    assert_eq!(stats.total_revenue, 0.0);
    assert_eq!(stats.avg_payment, 0.0);
    assert_eq!(stats.collection_rate, 0.0);

    let snapshot = app.state.aggregator.dashboard_snapshot(&owner.id).await.unwrap();
    assert_eq!(snapshot.total_properties, 0);
    assert_eq!(snapshot.total_units, 0);
    assert_eq!(snapshot.occupancy_rate, 0);
    assert_eq!(snapshot.monthly_potential, 0.0);
}

#[tokio::test]
async fn test_dashboard_snapshot_counts_occupied_rent_only() {
    let app = TestApp::new().await;
    let owner = app.seed_subscriber(PlanTier::Standard, None).await;
    let property = app.seed_property(&owner, "Immeuble Yoff").await;

    let a1 = app.seed_unit(&property, "A1", 50000.0).await;
    let a2 = app.seed_unit(&property, "A2", 70000.0).await;
    let _a3 = app.seed_unit(&property, "A3", 100000.0).await;

    app.seed_tenant(&a1, "Awa Diop").await;
    app.seed_tenant(&a2, "Moussa Ndiaye").await;

    let snapshot = app.state.aggregator.dashboard_snapshot(&owner.id).await.unwrap();
    assert_eq!(snapshot.total_properties, 1);
    assert_eq!(snapshot.total_units, 3);
    assert_eq!(snapshot.occupied_units, 2);
    assert_eq!(snapshot.vacant_units, 1);
    // 2/3 rounds to 67%.
    assert_eq!(snapshot.occupancy_rate, 67);
    // Vacant A3 contributes nothing.
    assert_eq!(snapshot.monthly_potential, 120000.0);
}
