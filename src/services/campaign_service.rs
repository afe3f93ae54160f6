//! services/campaign_service.rs
//! Pipeline de envío de campañas:
//! validar -> resolver contenido y destinatarios -> enviar uno por uno
//! (registrando cada resultado) -> persistir la campaña.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join;
use uuid::Uuid;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::{
        campaign_model::{Campaign, CreateCampaignRequest},
        contact_model::Contact,
        mail_model::MailMessage,
        sent_email_model::{EmailStatus, SentEmail},
        template_model::TemplateContent,
    },
    providers::MailSender,
    repositories::{
        CampaignRepository, ContactRepository, SegmentRepository, SentEmailRepository,
        TemplateContentRepository,
    },
    services::{
        content_resolver::ContentResolver, delivery_recorder::DeliveryRecorder,
        recipient_resolver::RecipientResolver,
    },
};

/// Resultado de un envío: la campaña persistida y el conteo por estado
#[derive(Debug, Clone)]
pub struct CampaignSendOutcome {
    pub campaign: Campaign,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct CampaignService {
    mail_sender: Arc<dyn MailSender>,
    mail_from: String,
    content_resolver: ContentResolver,
    recipient_resolver: RecipientResolver,
    delivery_recorder: DeliveryRecorder,
    campaigns: Arc<dyn CampaignRepository>,
}

impl CampaignService {
    pub fn new(
        mail_sender: Arc<dyn MailSender>,
        mail_from: impl Into<String>,
        template_contents: Arc<dyn TemplateContentRepository>,
        contacts: Arc<dyn ContactRepository>,
        segments: Arc<dyn SegmentRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        sent_emails: Arc<dyn SentEmailRepository>,
    ) -> Self {
        Self {
            mail_sender,
            mail_from: mail_from.into(),
            content_resolver: ContentResolver::new(template_contents),
            recipient_resolver: RecipientResolver::new(contacts, segments),
            delivery_recorder: DeliveryRecorder::new(sent_emails),
            campaigns,
        }
    }

    /// Envía la campaña. Sólo los errores de validación o resolución llegan al
    /// caller; los fallos de transporte quedan en los registros FAILED.
    pub async fn send(&self, req: CreateCampaignRequest) -> ServiceResult<CampaignSendOutcome> {
        let template_id = Self::validate(&req)?;

        let (content, recipients) = try_join(
            self.content_resolver.resolve(template_id),
            self.recipient_resolver.resolve(&req.send_to),
        )
        .await?;

        let campaign_id = Uuid::new_v4().to_string();
        log::info!(
            "(send) Campaña '{}' id={} template={} -> {} destinatarios",
            req.name,
            campaign_id,
            template_id,
            recipients.contacts.len()
        );

        let (mut sent, mut failed) = (0, 0);
        for contact in &recipients.contacts {
            let record = self.dispatch(&campaign_id, &content, contact).await?;
            debug_assert!(record.status.is_terminal());
            match record.status {
                EmailStatus::Sent => sent += 1,
                _ => failed += 1,
            }
        }

        let campaign = Campaign {
            id: campaign_id,
            name: req.name,
            template_id,
            contacts: recipients.contacts,
            segments: recipients.segments,
            created_at: Utc::now(),
        };
        let campaign = self.campaigns.save(&campaign).await?;

        log::info!(
            "(send) Campaña id={} finalizada: sent={} failed={}",
            campaign.id,
            sent,
            failed
        );

        Ok(CampaignSendOutcome {
            campaign,
            sent,
            failed,
        })
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Campaign> {
        self.campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Campaign", "id", id))
    }

    pub async fn list(&self) -> ServiceResult<Vec<Campaign>> {
        Ok(self.campaigns.find_all().await?)
    }

    /// Registros de entrega de una campaña existente
    pub async fn sent_emails(&self, id: &str) -> ServiceResult<Vec<SentEmail>> {
        let campaign = self.get(id).await?;
        self.delivery_recorder.list_for_campaign(&campaign.id).await
    }

    fn validate(req: &CreateCampaignRequest) -> ServiceResult<i64> {
        let template_id = req
            .template_id
            .ok_or_else(|| ServiceError::Validation("templateId is required".to_string()))?;
        if req.send_to.is_empty() {
            return Err(ServiceError::Validation(
                "sendTo must name at least one contact or segment".to_string(),
            ));
        }
        Ok(template_id)
    }

    fn render(&self, content: &TemplateContent, contact: &Contact) -> MailMessage {
        MailMessage {
            from: self.mail_from.clone(),
            to: contact.email.clone(),
            subject: content.about.clone(),
            content: content.content.clone(),
        }
    }

    /// PENDING -> send -> SENT/FAILED para un destinatario.
    /// Un error del sender nunca se propaga.
    async fn dispatch(
        &self,
        campaign_id: &str,
        content: &TemplateContent,
        contact: &Contact,
    ) -> ServiceResult<SentEmail> {
        let message = self.render(content, contact);
        let record = self.delivery_recorder.open(campaign_id, contact).await?;

        let result = self.mail_sender.send(&message).await;
        if let Err(e) = &result {
            log::warn!(
                "(dispatch) Fallo al enviar a contact_id={} ({}): {}",
                contact.id,
                contact.email,
                e
            );
        }

        self.delivery_recorder.close(record, result.as_ref().map(|_| ())).await
    }
}
