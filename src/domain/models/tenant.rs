use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// An occupant of a unit. A unit keeps its full tenant history; only one
/// tenant per unit may have `is_active = true` at any time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub unit_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub struct NewTenantParams {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub entry_date: NaiveDate,
}

impl Tenant {
    pub fn new(unit_id: String, params: NewTenantParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            unit_id,
            full_name: params.full_name,
            phone: params.phone,
            email: params.email,
            is_active: true,
            entry_date: params.entry_date,
            created_at: Utc::now(),
        }
    }
}
