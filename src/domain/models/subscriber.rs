use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Subscription tier of a property owner. Ordering matters: each tier
/// entitles a superset of the features of the tier below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Standard,
    Premium,
}

impl PlanTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Gratuit (Découverte)",
            PlanTier::Standard => "Standard",
            PlanTier::Premium => "Premium Illimité",
        }
    }
}

/// A property owner account. `subscription_end` is only meaningful for paid
/// plans; `Free` never expires.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan: PlanTier,
    pub subscription_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            phone,
            plan: PlanTier::Free,
            subscription_end: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_subscription_active(&self, now: DateTime<Utc>) -> bool {
        if self.plan == PlanTier::Free {
            return true;
        }
        match self.subscription_end {
            Some(end) => now < end,
            None => false,
        }
    }
}
