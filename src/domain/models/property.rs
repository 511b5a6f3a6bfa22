use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A building owned by exactly one subscriber.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(owner_id: String, name: String, address: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name,
            address,
            created_at: Utc::now(),
        }
    }
}
