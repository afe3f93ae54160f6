//! services/recipient_resolver.rs
//! Convierte el selector `sendTo` en el conjunto final de contactos.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    errors::{ServiceError, ServiceResult},
    models::{campaign_model::SendTo, contact_model::Contact, segment_model::Segment},
    repositories::{ContactRepository, SegmentRepository},
};

/// Destinatarios resueltos, sin duplicados y ordenados por id de contacto
#[derive(Debug, Clone, Default)]
pub struct ResolvedRecipients {
    pub contacts: Vec<Contact>,
    pub segments: Vec<Segment>,
}

#[derive(Clone)]
pub struct RecipientResolver {
    contacts: Arc<dyn ContactRepository>,
    segments: Arc<dyn SegmentRepository>,
}

impl RecipientResolver {
    pub fn new(contacts: Arc<dyn ContactRepository>, segments: Arc<dyn SegmentRepository>) -> Self {
        Self { contacts, segments }
    }

    /// Todo o nada: el primer id inexistente aborta la resolución completa.
    pub async fn resolve(&self, send_to: &SendTo) -> ServiceResult<ResolvedRecipients> {
        let mut recipients: BTreeMap<i64, Contact> = BTreeMap::new();

        for &contact_id in &send_to.contacts {
            let contact = self
                .contacts
                .find_by_id(contact_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Contact", "id", contact_id))?;
            recipients.insert(contact.id, contact);
        }

        let mut segments = Vec::with_capacity(send_to.segments.len());
        for &segment_id in &send_to.segments {
            let segment = self
                .segments
                .find_by_id(segment_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Segment", "id", segment_id))?;
            for member in &segment.contacts {
                recipients
                    .entry(member.id)
                    .or_insert_with(|| member.clone());
            }
            segments.push(segment);
        }

        log::info!(
            "(resolve) {} contactos directos + {} segmentos -> {} destinatarios",
            send_to.contacts.len(),
            segments.len(),
            recipients.len()
        );

        Ok(ResolvedRecipients {
            contacts: recipients.into_values().collect(),
            segments,
        })
    }
}
