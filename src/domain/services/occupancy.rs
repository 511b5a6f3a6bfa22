use std::sync::Arc;
use tracing::info;

use crate::domain::models::tenant::{NewTenantParams, Tenant};
use crate::domain::models::unit::Unit;
use crate::domain::ports::TenantRepository;
use crate::error::AppError;

/// Guards the single-active-tenant invariant: a unit has at most one tenant
/// with `is_active = true`. The check runs at assignment time, and the schema
/// backs it with a unique index over active rows, so a write that slips past
/// the check still fails at the database.
pub struct OccupancyService {
    tenant_repo: Arc<dyn TenantRepository>,
}

impl OccupancyService {
    pub fn new(tenant_repo: Arc<dyn TenantRepository>) -> Self {
        Self { tenant_repo }
    }

    pub async fn active_tenant(&self, unit_id: &str) -> Result<Option<Tenant>, AppError> {
        self.tenant_repo.find_active_by_unit(unit_id).await
    }

    /// Moves a new tenant in. Fails if the unit already has an active tenant;
    /// the conflict is always surfaced, never silently resolved.
    pub async fn assign_tenant(
        &self,
        unit: &Unit,
        params: NewTenantParams,
    ) -> Result<Tenant, AppError> {
        if let Some(current) = self.tenant_repo.find_active_by_unit(&unit.id).await? {
            return Err(AppError::OccupancyConflict(format!(
                "unit {} is already occupied by {}",
                unit.door_number, current.full_name
            )));
        }

        let tenant = Tenant::new(unit.id.clone(), params);
        let created = self.tenant_repo.create(&tenant).await?;
        info!(unit = %unit.door_number, tenant = %created.full_name, "Tenant assigned");
        Ok(created)
    }

    /// Moves a tenant out. The record stays for historical reporting.
    pub async fn vacate(&self, tenant: &Tenant) -> Result<(), AppError> {
        self.tenant_repo.set_active(&tenant.id, false).await?;
        info!(tenant = %tenant.full_name, "Tenant vacated");
        Ok(())
    }

    /// Every tenant the unit has had, oldest entry first.
    pub async fn tenant_history(&self, unit_id: &str) -> Result<Vec<Tenant>, AppError> {
        self.tenant_repo.list_by_unit(unit_id).await
    }
}
