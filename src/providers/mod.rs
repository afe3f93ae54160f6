//! providers/mod.rs
//! Transportes de correo. El pipeline de campañas sólo conoce el trait
//! `MailSender`; la implementación concreta se elige por configuración.

pub mod log_sender;
pub mod resend_sender;
pub mod smtp_sender;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::{
    config::app_config::{MailConfig, MailTransport},
    models::mail_model::MailMessage,
};

pub use log_sender::LogMailSender;
pub use resend_sender::ResendMailSender;
pub use smtp_sender::SmtpMailSender;

/// Fallo de transporte al enviar un mensaje. Conserva el mensaje intentado.
#[derive(Debug, Error)]
#[error("Failed to send mail to {}: {source}", .message.to)]
pub struct SendMailError {
    pub message: MailMessage,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl SendMailError {
    pub fn new(
        message: &MailMessage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.clone(),
            source: source.into(),
        }
    }
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), SendMailError>;
}

/// Construye el transporte configurado en `MAIL_TRANSPORT`
pub fn build_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>> {
    let sender: Arc<dyn MailSender> = match &config.transport {
        MailTransport::Log => Arc::new(LogMailSender),
        MailTransport::Smtp(smtp) => Arc::new(SmtpMailSender::new(smtp)?),
        MailTransport::Resend(resend) => Arc::new(ResendMailSender::new(resend)),
    };
    Ok(sender)
}
