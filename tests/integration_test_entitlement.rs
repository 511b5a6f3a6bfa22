mod common;

use chrono::{Duration, TimeZone, Utc};
use common::TestApp;
use immogest_core::domain::models::subscriber::PlanTier;
use immogest_core::domain::services::entitlement::{
    effective_plan, extended_subscription_end, Feature,
};

#[tokio::test]
async fn test_expired_paid_plan_falls_back_to_free() {
    let app = TestApp::new().await;
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    // One second past the end is enough to lose the paid tier.
    let expired = app
        .seed_subscriber(PlanTier::Premium, Some(now - Duration::seconds(1)))
        .await;
    assert_eq!(effective_plan(&expired, now), PlanTier::Free);
    assert!(!app.state.entitlement.has_feature(&expired, Feature::ExportExcel, now));
    assert!(!expired.is_subscription_active(now));

    let active = app
        .seed_subscriber(PlanTier::Premium, Some(now + Duration::days(10)))
        .await;
    assert_eq!(effective_plan(&active, now), PlanTier::Premium);
    assert!(app.state.entitlement.has_feature(&active, Feature::ExportExcel, now));
    assert!(active.is_subscription_active(now));

    // A free subscriber never expires.
    let free = app.seed_subscriber(PlanTier::Free, None).await;
    assert_eq!(effective_plan(&free, now), PlanTier::Free);
    assert!(free.is_subscription_active(now));
}

#[tokio::test]
async fn test_feature_access_per_tier() {
    let app = TestApp::new().await;
    let now = Utc::now();

    let free = app.seed_subscriber(PlanTier::Free, None).await;
    assert!(app.state.entitlement.has_feature(&free, Feature::BasicStats, now));
    assert!(app.state.entitlement.has_feature(&free, Feature::PdfReceipts, now));
    assert!(!app.state.entitlement.has_feature(&free, Feature::AdvancedStats, now));
    assert!(!app.state.entitlement.has_feature(&free, Feature::PaymentReminders, now));

    let standard = app
        .seed_subscriber(PlanTier::Standard, Some(now + Duration::days(30)))
        .await;
    assert!(app.state.entitlement.has_feature(&standard, Feature::MultiProperties, now));
    assert!(app.state.entitlement.has_feature(&standard, Feature::BasicStats, now));
    assert!(!app.state.entitlement.has_feature(&standard, Feature::AutoWhatsapp, now));

    let premium = app
        .seed_subscriber(PlanTier::Premium, Some(now + Duration::days(30)))
        .await;
    assert!(app.state.entitlement.has_feature(&premium, Feature::AnalyticsDashboard, now));
    assert!(app.state.entitlement.has_feature(&premium, Feature::MultiProperties, now));
}

#[tokio::test]
async fn test_unit_quota_free_plan() {
    let app = TestApp::new().await;
    let now = Utc::now();

    let subscriber = app.seed_subscriber(PlanTier::Free, None).await;
    let property = app.seed_property(&subscriber, "Immeuble Keur Massar").await;

    assert!(app.state.entitlement.can_add_unit(&subscriber, now).await.unwrap());
    app.seed_unit(&property, "A1", 75000.0).await;
    assert!(app.state.entitlement.can_add_unit(&subscriber, now).await.unwrap());
    app.seed_unit(&property, "A2", 85000.0).await;

    // Free quota is 2 units; the third is refused.
    assert!(!app.state.entitlement.can_add_unit(&subscriber, now).await.unwrap());

    // Upgrading to standard (quota 10) unblocks the same subscriber.
    let upgraded = app
        .state
        .entitlement
        .activate_plan(&subscriber.id, PlanTier::Standard, 30, now)
        .await
        .unwrap();
    assert!(app.state.entitlement.can_add_unit(&upgraded, now).await.unwrap());
}

#[tokio::test]
async fn test_property_quota_free_plan() {
    let app = TestApp::new().await;
    let now = Utc::now();

    let subscriber = app.seed_subscriber(PlanTier::Free, None).await;
    assert!(app.state.entitlement.can_add_property(&subscriber, now).await.unwrap());

    app.seed_property(&subscriber, "Immeuble Liberté 6").await;
    assert!(!app.state.entitlement.can_add_property(&subscriber, now).await.unwrap());

    let premium = app
        .state
        .entitlement
        .activate_plan(&subscriber.id, PlanTier::Premium, 365, now)
        .await
        .unwrap();
    assert!(app.state.entitlement.can_add_property(&premium, now).await.unwrap());
}

#[tokio::test]
async fn test_unit_quota_counts_across_properties() {
    let app = TestApp::new().await;
    let now = Utc::now();

    let subscriber = app
        .seed_subscriber(PlanTier::Standard, Some(now + Duration::days(30)))
        .await;
    let first = app.seed_property(&subscriber, "Immeuble A").await;
    let second = app.seed_property(&subscriber, "Immeuble B").await;

    for i in 0..6 {
        app.seed_unit(&first, &format!("A{}", i), 50000.0).await;
    }
    for i in 0..4 {
        app.seed_unit(&second, &format!("B{}", i), 60000.0).await;
    }

    // 10 units total across both properties exhausts the standard quota.
    assert!(!app.state.entitlement.can_add_unit(&subscriber, now).await.unwrap());
}

#[tokio::test]
async fn test_extension_stacks_on_unexpired_time() {
    let app = TestApp::new().await;
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    // No end date yet: window starts now.
    let fresh = app.seed_subscriber(PlanTier::Free, None).await;
    assert_eq!(extended_subscription_end(&fresh, 30, now), now + Duration::days(30));

    // Expired 5 days ago: expired time does not carry over.
    let lapsed = app
        .seed_subscriber(PlanTier::Standard, Some(now - Duration::days(5)))
        .await;
    assert_eq!(extended_subscription_end(&lapsed, 30, now), now + Duration::days(30));

    // 10 days left: the remainder stacks.
    let running = app
        .seed_subscriber(PlanTier::Premium, Some(now + Duration::days(10)))
        .await;
    assert_eq!(extended_subscription_end(&running, 30, now), now + Duration::days(40));
}

#[tokio::test]
async fn test_activate_plan_persists_both_fields() {
    let app = TestApp::new().await;
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    let subscriber = app.seed_subscriber(PlanTier::Free, None).await;

    let upgraded = app
        .state
        .entitlement
        .activate_plan(&subscriber.id, PlanTier::Premium, 365, now)
        .await
        .unwrap();
    assert_eq!(upgraded.plan, PlanTier::Premium);
    assert_eq!(upgraded.subscription_end, Some(now + Duration::days(365)));

    let reloaded = app
        .state
        .subscriber_repo
        .find_by_id(&subscriber.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.plan, PlanTier::Premium);
    assert_eq!(reloaded.subscription_end, Some(now + Duration::days(365)));

    // Back to free clears the end date in the same write.
    let downgraded = app
        .state
        .entitlement
        .activate_plan(&subscriber.id, PlanTier::Free, 0, now)
        .await
        .unwrap();
    assert_eq!(downgraded.plan, PlanTier::Free);
    assert_eq!(downgraded.subscription_end, None);
}

#[tokio::test]
async fn test_subscriber_listing_is_newest_first() {
    let app = TestApp::new().await;

    let first = app.seed_subscriber(PlanTier::Free, None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app.seed_subscriber(PlanTier::Free, None).await;

    let listed = app.state.subscriber_repo.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}
