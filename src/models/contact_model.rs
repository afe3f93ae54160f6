use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear o actualizar un contacto
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrUpdateContact {
    pub email: String,
    #[serde(default)]
    pub name: String,
}
