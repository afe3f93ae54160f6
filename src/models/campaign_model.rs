use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{contact_model::Contact, segment_model::Segment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub template_id: i64,
    pub contacts: Vec<Contact>,
    pub segments: Vec<Segment>,
    pub created_at: DateTime<Utc>,
}

/// Request de envío de campaña:
/// `{ name, templateId, sendTo: { contacts: [..], segments: [..] } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[serde(default)]
    pub name: String,
    pub template_id: Option<i64>,
    #[serde(default)]
    pub send_to: SendTo,
}

/// Selector de destinatarios: contactos directos y/o segmentos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendTo {
    #[serde(default)]
    pub contacts: BTreeSet<i64>,
    #[serde(default)]
    pub segments: BTreeSet<i64>,
}

impl SendTo {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.segments.is_empty()
    }
}

/// Resumen devuelto al cliente después de un envío
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSendResponse {
    pub success: bool,
    pub campaign: Campaign,
    pub sent: usize,
    pub failed: usize,
}
