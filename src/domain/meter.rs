use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An electricity meter installed at a supply address.
///
/// Closed variant set; the `type` tag is the serialization discriminant, so
/// both variants can live under the same key prefix in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Meter {
    SinglePhase {
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        code: String,
        supply_address: String,
        active: bool,
        max_power_kw: f64,
    },
    ThreePhase {
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        code: String,
        supply_address: String,
        active: bool,
        max_power_kw: f64,
        power_factor: f64,
    },
}

impl Meter {
    pub fn single_phase(
        code: impl Into<String>,
        supply_address: impl Into<String>,
        max_power_kw: f64,
    ) -> Self {
        let code = code.into();
        let now = Utc::now();
        Meter::SinglePhase {
            id: code.clone(),
            created_at: now,
            updated_at: now,
            code,
            supply_address: supply_address.into(),
            active: true,
            max_power_kw,
        }
    }

    pub fn three_phase(
        code: impl Into<String>,
        supply_address: impl Into<String>,
        max_power_kw: f64,
        power_factor: f64,
    ) -> Self {
        let code = code.into();
        let now = Utc::now();
        Meter::ThreePhase {
            id: code.clone(),
            created_at: now,
            updated_at: now,
            code,
            supply_address: supply_address.into(),
            active: true,
            max_power_kw,
            power_factor,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Meter::SinglePhase { code, .. } | Meter::ThreePhase { code, .. } => code,
        }
    }

    pub fn supply_address(&self) -> &str {
        match self {
            Meter::SinglePhase { supply_address, .. }
            | Meter::ThreePhase { supply_address, .. } => supply_address,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Meter::SinglePhase { active, .. } | Meter::ThreePhase { active, .. } => *active,
        }
    }

    pub fn max_power_kw(&self) -> f64 {
        match self {
            Meter::SinglePhase { max_power_kw, .. } | Meter::ThreePhase { max_power_kw, .. } => {
                *max_power_kw
            }
        }
    }

    /// Human readable meter kind, for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Meter::SinglePhase { .. } => "single-phase",
            Meter::ThreePhase { .. } => "three-phase",
        }
    }
}
