use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use sqlx::FromRow;

/// One rent payment logged against a tenant for a calendar month.
///
/// Several payments may exist for the same (tenant, period) pair; partial or
/// split payments are a real-world occurrence and aggregation sums them all.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub amount: f64,
    pub date_paid: DateTime<Utc>,
    /// Calendar-month token, "YYYY-MM".
    pub period: String,
    /// Opaque unique token used by collaborators to build receipt download links.
    pub receipt_token: String,
    pub whatsapp_sent: bool,
    pub reminder_sent: bool,
}

impl Payment {
    pub fn new(tenant_id: String, amount: f64, period: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            amount,
            date_paid: now,
            period,
            receipt_token: Uuid::new_v4().to_string(),
            whatsapp_sent: false,
            reminder_sent: false,
        }
    }

    /// Whether this payment arrived past its due date: the first of the month
    /// after the covered period, plus `grace_days`. A malformed period token
    /// is never reported overdue; legacy data must not block the caller.
    pub fn is_overdue(&self, grace_days: i64, now: DateTime<Utc>) -> bool {
        let Some(period_start) = parse_period(&self.period) else {
            return false;
        };
        let Some(next_month) = period_start.checked_add_months(Months::new(1)) else {
            return false;
        };
        let Some(midnight) = next_month.and_hms_opt(0, 0, 0) else {
            return false;
        };
        let due_date = midnight + Duration::days(grace_days);
        now.naive_utc() > due_date
    }
}

/// Parses a "YYYY-MM" period token into the first day of that month.
/// Rejects out-of-range months and anything not zero-padded to 4+2 digits.
pub fn parse_period(period: &str) -> Option<NaiveDate> {
    let (year, month) = period.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}
