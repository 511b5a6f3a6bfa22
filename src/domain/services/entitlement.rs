use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::domain::models::subscriber::{PlanTier, Subscriber};
use crate::domain::ports::{PropertyRepository, SubscriberRepository, UnitRepository};
use crate::error::AppError;

/// Capability tags gated by the subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    BasicStats,
    PdfReceipts,
    TenantManagement,
    AdvancedStats,
    MultiProperties,
    WhatsappSupport,
    AutoWhatsapp,
    PaymentReminders,
    ExportExcel,
    AnalyticsDashboard,
    CustomBranding,
    MultiUsers,
    PrioritySupport,
}

const FREE_FEATURES: &[Feature] = &[
    Feature::BasicStats,
    Feature::PdfReceipts,
    Feature::TenantManagement,
];

const STANDARD_FEATURES: &[Feature] = &[
    Feature::BasicStats,
    Feature::PdfReceipts,
    Feature::TenantManagement,
    Feature::AdvancedStats,
    Feature::MultiProperties,
    Feature::WhatsappSupport,
];

const PREMIUM_FEATURES: &[Feature] = &[
    Feature::BasicStats,
    Feature::PdfReceipts,
    Feature::TenantManagement,
    Feature::AdvancedStats,
    Feature::MultiProperties,
    Feature::WhatsappSupport,
    Feature::AutoWhatsapp,
    Feature::PaymentReminders,
    Feature::ExportExcel,
    Feature::AnalyticsDashboard,
    Feature::CustomBranding,
    Feature::MultiUsers,
    Feature::PrioritySupport,
];

pub fn feature_set(plan: PlanTier) -> &'static [Feature] {
    match plan {
        PlanTier::Free => FREE_FEATURES,
        PlanTier::Standard => STANDARD_FEATURES,
        PlanTier::Premium => PREMIUM_FEATURES,
    }
}

/// Each tier must entitle every feature of the tier below it. Called once at
/// bootstrap so an edited table cannot silently drop an entitlement.
pub fn validate_feature_table() {
    for feature in FREE_FEATURES {
        assert!(
            STANDARD_FEATURES.contains(feature),
            "standard tier is missing free feature {:?}",
            feature
        );
    }
    for feature in STANDARD_FEATURES {
        assert!(
            PREMIUM_FEATURES.contains(feature),
            "premium tier is missing standard feature {:?}",
            feature
        );
    }
}

/// The plan a subscriber is actually entitled to at `now`: a paid plan whose
/// `subscription_end` has passed falls back to `Free`.
pub fn effective_plan(subscriber: &Subscriber, now: DateTime<Utc>) -> PlanTier {
    if subscriber.plan != PlanTier::Free {
        if let Some(end) = subscriber.subscription_end {
            if now > end {
                return PlanTier::Free;
            }
        }
    }
    subscriber.plan
}

/// Maximum number of units a plan allows, `None` meaning unlimited.
pub fn unit_quota(plan: PlanTier) -> Option<i64> {
    match plan {
        PlanTier::Free => Some(2),
        PlanTier::Standard => Some(10),
        PlanTier::Premium => None,
    }
}

/// Maximum number of properties a plan allows, `None` meaning unlimited.
pub fn property_quota(plan: PlanTier) -> Option<i64> {
    match plan {
        PlanTier::Free => Some(1),
        PlanTier::Standard | PlanTier::Premium => None,
    }
}

/// Where a renewed subscription window ends: `days` counted from the current
/// end when it is still in the future, from `now` otherwise. Remaining paid
/// time stacks; expired time does not carry over.
pub fn extended_subscription_end(
    subscriber: &Subscriber,
    days: i64,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let start = match subscriber.subscription_end {
        Some(end) if end > now => end,
        _ => now,
    };
    start + Duration::days(days)
}

pub struct EntitlementService {
    subscriber_repo: Arc<dyn SubscriberRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
}

impl EntitlementService {
    pub fn new(
        subscriber_repo: Arc<dyn SubscriberRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        unit_repo: Arc<dyn UnitRepository>,
    ) -> Self {
        Self {
            subscriber_repo,
            property_repo,
            unit_repo,
        }
    }

    /// Advisory predicate: whether one more unit fits the subscriber's quota.
    /// The caller decides between denying and allow-and-warn.
    pub async fn can_add_unit(
        &self,
        subscriber: &Subscriber,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        match unit_quota(effective_plan(subscriber, now)) {
            None => Ok(true),
            Some(limit) => {
                let owned = self.unit_repo.count_by_owner(&subscriber.id).await?;
                Ok(owned < limit)
            }
        }
    }

    /// Advisory predicate: whether one more property fits the subscriber's quota.
    pub async fn can_add_property(
        &self,
        subscriber: &Subscriber,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        match property_quota(effective_plan(subscriber, now)) {
            None => Ok(true),
            Some(limit) => {
                let owned = self.property_repo.count_by_owner(&subscriber.id).await?;
                Ok(owned < limit)
            }
        }
    }

    pub fn has_feature(&self, subscriber: &Subscriber, feature: Feature, now: DateTime<Utc>) -> bool {
        feature_set(effective_plan(subscriber, now)).contains(&feature)
    }

    /// Admin plan change. Paid tiers get `days` added on top of any unexpired
    /// window; switching back to `Free` clears the end date. Both fields are
    /// committed in one storage write.
    pub async fn activate_plan(
        &self,
        subscriber_id: &str,
        plan: PlanTier,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<Subscriber, AppError> {
        let subscriber = self
            .subscriber_repo
            .find_by_id(subscriber_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("subscriber {}", subscriber_id)))?;

        let new_end = match plan {
            PlanTier::Free => None,
            PlanTier::Standard | PlanTier::Premium => {
                Some(extended_subscription_end(&subscriber, days, now))
            }
        };

        let updated = self
            .subscriber_repo
            .update_plan(subscriber_id, plan, new_end)
            .await?;

        info!(
            subscriber = subscriber_id,
            plan = plan.display_name(),
            until = ?new_end,
            "Plan updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_tiers_are_nested() {
        validate_feature_table();
        assert!(FREE_FEATURES.len() < STANDARD_FEATURES.len());
        assert!(STANDARD_FEATURES.len() < PREMIUM_FEATURES.len());
    }

    #[test]
    fn test_quotas_per_tier() {
        assert_eq!(unit_quota(PlanTier::Free), Some(2));
        assert_eq!(unit_quota(PlanTier::Standard), Some(10));
        assert_eq!(unit_quota(PlanTier::Premium), None);
        assert_eq!(property_quota(PlanTier::Free), Some(1));
        assert_eq!(property_quota(PlanTier::Standard), None);
    }
}
