//! services/delivery_recorder.rs
//! Registro en dos escrituras de cada entrega: primero PENDING, luego
//! SENT/FAILED. Si el proceso muere a mitad del envío queda el PENDING.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::ServiceResult,
    models::{
        contact_model::Contact,
        sent_email_model::{EmailStatus, SentEmail},
    },
    providers::SendMailError,
    repositories::SentEmailRepository,
};

#[derive(Clone)]
pub struct DeliveryRecorder {
    sent_emails: Arc<dyn SentEmailRepository>,
}

impl DeliveryRecorder {
    pub fn new(sent_emails: Arc<dyn SentEmailRepository>) -> Self {
        Self { sent_emails }
    }

    /// Primera escritura: crea el registro en PENDING
    pub async fn open(&self, campaign_id: &str, contact: &Contact) -> ServiceResult<SentEmail> {
        let now = Utc::now();
        let record = SentEmail {
            id: Uuid::new_v4().to_string(),
            campaign_id: campaign_id.to_string(),
            contact_id: contact.id,
            recipient: contact.email.clone(),
            status: EmailStatus::Pending,
            error_message: None,
            created_at: now,
            updated_at: now,
        };
        Ok(self.sent_emails.save(&record).await?)
    }

    /// Segunda escritura: estado terminal según el resultado del envío
    pub async fn close(
        &self,
        mut record: SentEmail,
        outcome: Result<(), &SendMailError>,
    ) -> ServiceResult<SentEmail> {
        match outcome {
            Ok(()) => {
                record.status = EmailStatus::Sent;
                record.error_message = None;
            }
            Err(e) => {
                record.status = EmailStatus::Failed;
                record.error_message = Some(e.to_string());
            }
        }
        record.updated_at = Utc::now();
        Ok(self.sent_emails.save(&record).await?)
    }

    pub async fn list_for_campaign(&self, campaign_id: &str) -> ServiceResult<Vec<SentEmail>> {
        Ok(self.sent_emails.find_by_campaign(campaign_id).await?)
    }
}
