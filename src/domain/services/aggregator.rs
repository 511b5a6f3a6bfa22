use std::collections::BTreeMap;
use std::sync::Arc;
use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use crate::domain::ports::{PaymentRepository, PropertyRepository, TenantRepository, UnitRepository};
use crate::error::AppError;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PortfolioStats {
    pub total_payments: u64,
    pub total_revenue: f64,
    pub avg_payment: f64,
    /// Occupied units as a percentage of all units; a proxy for how much of
    /// the expected rent is collectable.
    pub collection_rate: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub total_properties: u64,
    pub total_units: u64,
    pub occupied_units: u64,
    pub vacant_units: u64,
    /// Rounded percentage of units with an active tenant.
    pub occupancy_rate: u32,
    /// Sum of rents over occupied units only; vacant units contribute nothing.
    pub monthly_potential: f64,
}

/// Read-only reports over the entity graph. Always recomputed on demand:
/// portfolios are tens to low thousands of entities, not worth a cache.
pub struct AggregatorService {
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
}

impl AggregatorService {
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

    /// Revenue per period over the trailing `window_months` months including
    /// the current one. Every period in the window is present (zero when
    /// nothing was paid); periods outside the window are absent entirely.
    /// BTreeMap ordering is lexicographic, which for "YYYY-MM" tokens is
    /// chronological.
    pub async fn monthly_revenue(
        &self,
        subscriber_id: &str,
        window_months: u32,
        now: DateTime<Utc>,
    ) -> Result<BTreeMap<String, f64>, AppError> {
        let mut revenue = BTreeMap::new();
        let today = now.date_naive();
        for offset in 0..window_months {
            if let Some(month) = today.checked_sub_months(Months::new(offset)) {
                revenue.insert(month.format("%Y-%m").to_string(), 0.0);
            }
        }

        for property in self.property_repo.list_by_owner(subscriber_id).await? {
            for unit in self.unit_repo.list_by_property(&property.id).await? {
                for tenant in self.tenant_repo.list_by_unit(&unit.id).await? {
                    for payment in self.payment_repo.list_by_tenant(&tenant.id).await? {
                        if let Some(total) = revenue.get_mut(&payment.period) {
                            *total += payment.amount;
                        }
                    }
                }
            }
        }

        Ok(revenue)
    }

    pub async fn portfolio_stats(&self, subscriber_id: &str) -> Result<PortfolioStats, AppError> {
        let mut total_payments: u64 = 0;
        let mut total_revenue = 0.0;
        let mut total_units: u64 = 0;
        let mut occupied_units: u64 = 0;

        for property in self.property_repo.list_by_owner(subscriber_id).await? {
            for unit in self.unit_repo.list_by_property(&property.id).await? {
                total_units += 1;
                if self.tenant_repo.find_active_by_unit(&unit.id).await?.is_some() {
                    occupied_units += 1;
                }
                for tenant in self.tenant_repo.list_by_unit(&unit.id).await? {
                    for payment in self.payment_repo.list_by_tenant(&tenant.id).await? {
                        total_payments += 1;
                        total_revenue += payment.amount;
                    }
                }
            }
        }

        let avg_payment = if total_payments > 0 {
            total_revenue / total_payments as f64
        } else {
            0.0
        };
        let collection_rate = if total_units > 0 {
            occupied_units as f64 / total_units as f64 * 100.0
        } else {
            0.0
        };

        Ok(PortfolioStats {
            total_payments,
            total_revenue,
            avg_payment,
            collection_rate,
        })
    }

    pub async fn dashboard_snapshot(
        &self,
        subscriber_id: &str,
    ) -> Result<DashboardSnapshot, AppError> {
        let properties = self.property_repo.list_by_owner(subscriber_id).await?;
        let total_properties = properties.len() as u64;

        let mut total_units: u64 = 0;
        let mut occupied_units: u64 = 0;
        let mut monthly_potential = 0.0;

        for property in &properties {
            for unit in self.unit_repo.list_by_property(&property.id).await? {
                total_units += 1;
                if self.tenant_repo.find_active_by_unit(&unit.id).await?.is_some() {
                    occupied_units += 1;
                    monthly_potential += unit.rent_amount;
                }
            }
        }

        let occupancy_rate = if total_units > 0 {
            (occupied_units as f64 / total_units as f64 * 100.0).round() as u32
        } else {
            0
        };

        Ok(DashboardSnapshot {
            total_properties,
            total_units,
            occupied_units,
            vacant_units: total_units - occupied_units,
            occupancy_rate,
            monthly_potential,
        })
    }
}
