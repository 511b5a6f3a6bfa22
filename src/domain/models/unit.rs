use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A rentable apartment inside a property. `rent_amount` is the nominal
/// monthly rent in FCFA.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Unit {
    pub id: String,
    pub property_id: String,
    pub door_number: String,
    pub rent_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn new(property_id: String, door_number: String, rent_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id,
            door_number,
            rent_amount,
            created_at: Utc::now(),
        }
    }
}
