use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A billed client, keyed by their tax id (RUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tax_id: String,
    pub name: String,
    pub email: String,
    pub billing_address: String,
    pub status: ClientStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl Client {
    pub fn new(
        tax_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        billing_address: impl Into<String>,
    ) -> Self {
        let tax_id = tax_id.into();
        let now = Utc::now();
        Self {
            id: tax_id.clone(),
            created_at: now,
            updated_at: now,
            tax_id,
            name: name.into(),
            email: email.into(),
            billing_address: billing_address.into(),
            status: ClientStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "active"),
            ClientStatus::Inactive => write!(f, "inactive"),
        }
    }
}
