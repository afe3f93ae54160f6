use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::contact_model::Contact;

/// Grupo de contactos con nombre. Los miembros se leen siempre desde la DB,
/// nunca se cachean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub contacts: Vec<Contact>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    pub fn contact_ids(&self) -> Vec<i64> {
        self.contacts.iter().map(|c| c.id).collect()
    }
}

/// Request para crear o actualizar un segmento.
/// `contacts` son emails de contactos existentes.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrUpdateSegment {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub contacts: BTreeSet<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddContactsRequest {
    pub contacts: BTreeSet<String>,
}
