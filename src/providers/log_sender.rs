use async_trait::async_trait;

use super::{MailSender, SendMailError};
use crate::models::mail_model::MailMessage;

/// Transporte de desarrollo: sólo escribe el mensaje en el log.
#[derive(Debug, Clone, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendMailError> {
        log::info!(
            "(log_sender) from={} to={} subject='{}' ({} chars)",
            message.from,
            message.to,
            message.subject,
            message.content.len()
        );
        Ok(())
    }
}
