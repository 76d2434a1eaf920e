use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A consumption reading for one meter in one billing period.
///
/// The store holds at most one reading per meter/month; registering a second
/// one for the same period overwrites the first (same key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub meter_code: String,
    pub year: i32,
    pub month: u32,
    pub kwh: f64,
}

impl Reading {
    pub fn new(meter_code: impl Into<String>, year: i32, month: u32, kwh: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            meter_code: meter_code.into(),
            year,
            month,
            kwh,
        }
    }

    /// Orderable period key (e.g. 2025-11 -> 202511), used to pick the most
    /// recent reading without parsing dates.
    pub fn period_ord(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.month)
    }
}
