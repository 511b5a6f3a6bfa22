use std::env;

use crate::domain::services::ledger::DEFAULT_GRACE_DAYS;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL prepended to receipt tokens when building download links.
    pub receipt_base_url: String,
    /// Days of grace after the end of a rent period before a payment counts as
    /// overdue. This is the value callers pass to `Payment::is_overdue`.
    pub grace_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            receipt_base_url: env::var("RECEIPT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            grace_days: env::var("GRACE_DAYS")
                .map(|v| v.parse().expect("GRACE_DAYS must be a number"))
                .unwrap_or(DEFAULT_GRACE_DAYS),
        }
    }
}
