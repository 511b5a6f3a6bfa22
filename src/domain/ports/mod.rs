use crate::domain::models::{
    subscriber::{PlanTier, Subscriber},
    property::Property,
    unit::Unit,
    tenant::Tenant,
    payment::Payment,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn create(&self, subscriber: &Subscriber) -> Result<Subscriber, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Subscriber>, AppError>;
    /// All subscribers, newest signup first.
    async fn list(&self) -> Result<Vec<Subscriber>, AppError>;
    /// Commits `plan` and `subscription_end` together; a plan change must
    /// never be observable with only one of the two fields applied.
    async fn update_plan(
        &self,
        id: &str,
        plan: PlanTier,
        subscription_end: Option<DateTime<Utc>>,
    ) -> Result<Subscriber, AppError>;
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_id(&self, owner_id: &str, id: &str) -> Result<Option<Property>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Property>, AppError>;
    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError>;
    async fn update(&self, property: &Property) -> Result<Property, AppError>;
    /// Deletes the property and, in the same transaction, every unit, tenant
    /// and payment underneath it.
    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn create(&self, unit: &Unit) -> Result<Unit, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Unit>, AppError>;
    async fn list_by_property(&self, property_id: &str) -> Result<Vec<Unit>, AppError>;
    /// Total units across every property of one owner, for quota checks.
    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError>;
    async fn update(&self, unit: &Unit) -> Result<Unit, AppError>;
    /// Deletes the unit and, in the same transaction, its tenants and their payments.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_active_by_unit(&self, unit_id: &str) -> Result<Option<Tenant>, AppError>;
    /// Full tenant history of a unit, oldest entry first.
    async fn list_by_unit(&self, unit_id: &str) -> Result<Vec<Tenant>, AppError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<(), AppError>;
    /// Deletes the tenant and, in the same transaction, its payments.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>, AppError>;
    async fn find_by_receipt_token(&self, token: &str) -> Result<Option<Payment>, AppError>;
    /// Payments of one tenant, most recent `date_paid` first.
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Payment>, AppError>;
    /// Whether at least one payment exists for (tenant, period). Duplicates
    /// are allowed, so this is an any-match test rather than a lookup.
    async fn exists_for_period(&self, tenant_id: &str, period: &str) -> Result<bool, AppError>;
    async fn set_delivery_flags(
        &self,
        id: &str,
        whatsapp_sent: bool,
        reminder_sent: bool,
    ) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
