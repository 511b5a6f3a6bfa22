use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::models::payment::{parse_period, Payment};
use crate::domain::models::property::Property;
use crate::domain::models::tenant::Tenant;
use crate::domain::models::unit::Unit;
use crate::domain::ports::{PaymentRepository, PropertyRepository, TenantRepository, UnitRepository};
use crate::error::AppError;

/// Grace window used when `GRACE_DAYS` is not configured. `Config::grace_days`
/// is the single runtime source; callers hand it to `Payment::is_overdue`.
pub const DEFAULT_GRACE_DAYS: i64 = 5;

/// An occupied unit with no payment logged for the reference period.
#[derive(Debug, Serialize, Clone)]
pub struct LateTenant {
    pub tenant: Tenant,
    pub unit: Unit,
    pub property: Property,
    pub amount_due: f64,
    pub period: String,
}

/// One payment joined with its full ownership chain, for history views and
/// export collaborators.
#[derive(Debug, Serialize, Clone)]
pub struct PaymentRecord {
    pub payment: Payment,
    pub tenant: Tenant,
    pub unit: Unit,
    pub property: Property,
}

pub struct LedgerService {
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
}

impl LedgerService {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        unit_repo: Arc<dyn UnitRepository>,
        tenant_repo: Arc<dyn TenantRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            property_repo,
            unit_repo,
            tenant_repo,
            payment_repo,
        }
    }

    /// Logs a rent payment with a freshly minted receipt token. A second
    /// payment for the same period is accepted; split payments exist and the
    /// aggregation side sums them.
    pub async fn record_payment(
        &self,
        tenant: &Tenant,
        amount: f64,
        period: &str,
        now: DateTime<Utc>,
    ) -> Result<Payment, AppError> {
        if amount <= 0.0 {
            return Err(AppError::InvalidAmount(amount));
        }
        if parse_period(period).is_none() {
            return Err(AppError::InvalidPeriod(period.to_string()));
        }

        let payment = Payment::new(tenant.id.clone(), amount, period.to_string(), now);
        let created = self.payment_repo.create(&payment).await?;
        info!(
            tenant = %tenant.full_name,
            amount = created.amount,
            period = %created.period,
            "Payment recorded"
        );
        Ok(created)
    }

    /// Removes one payment, e.g. after a data-entry mistake. Aggregates pick
    /// the removal up on their next read; nothing else cascades.
    pub async fn delete_payment(&self, payment_id: &str) -> Result<(), AppError> {
        self.payment_repo.delete(payment_id).await?;
        info!(payment = payment_id, "Payment deleted");
        Ok(())
    }

    /// Flags every active tenant under the subscriber with no payment logged
    /// for `reference_period`. This answers "has this month's rent been
    /// logged at all" and is independent of per-payment overdue grace math.
    pub async fn late_tenants(
        &self,
        subscriber_id: &str,
        reference_period: &str,
    ) -> Result<Vec<LateTenant>, AppError> {
        let mut late = Vec::new();

        for property in self.property_repo.list_by_owner(subscriber_id).await? {
            for unit in self.unit_repo.list_by_property(&property.id).await? {
                let Some(tenant) = self.tenant_repo.find_active_by_unit(&unit.id).await? else {
                    continue;
                };

                let has_paid = self
                    .payment_repo
                    .exists_for_period(&tenant.id, reference_period)
                    .await?;
                if !has_paid {
                    late.push(LateTenant {
                        amount_due: unit.rent_amount,
                        period: reference_period.to_string(),
                        tenant,
                        unit,
                        property: property.clone(),
                    });
                }
            }
        }

        Ok(late)
    }

    /// Every payment across the subscriber's portfolio, most recent first.
    pub async fn payment_history(
        &self,
        subscriber_id: &str,
    ) -> Result<Vec<PaymentRecord>, AppError> {
        let mut records = Vec::new();

        for property in self.property_repo.list_by_owner(subscriber_id).await? {
            for unit in self.unit_repo.list_by_property(&property.id).await? {
                for tenant in self.tenant_repo.list_by_unit(&unit.id).await? {
                    for payment in self.payment_repo.list_by_tenant(&tenant.id).await? {
                        records.push(PaymentRecord {
                            payment,
                            tenant: tenant.clone(),
                            unit: unit.clone(),
                            property: property.clone(),
                        });
                    }
                }
            }
        }

        records.sort_by(|a, b| b.payment.date_paid.cmp(&a.payment.date_paid));
        Ok(records)
    }

    /// Records that the receipt went out on the WhatsApp channel.
    pub async fn mark_receipt_sent(&self, payment: &Payment) -> Result<(), AppError> {
        self.payment_repo
            .set_delivery_flags(&payment.id, true, payment.reminder_sent)
            .await
    }

    /// Records that an arrears reminder went out for this payment's period.
    pub async fn mark_reminder_sent(&self, payment: &Payment) -> Result<(), AppError> {
        self.payment_repo
            .set_delivery_flags(&payment.id, payment.whatsapp_sent, true)
            .await
    }
}
