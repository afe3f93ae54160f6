use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{MailSender, SendMailError};
use crate::{config::app_config::SmtpConfig, models::mail_model::MailMessage};

/// Tiempo máximo por envío SMTP
const SMTP_SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct SmtpMailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let tls_params =
            TlsParameters::new(config.host.clone()).context("Parámetros TLS inválidos")?;
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .with_context(|| format!("No se pudo configurar relay SMTP {}", config.host))?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.pass.clone(),
            ))
            .tls(Tls::Required(tls_params))
            .build();

        Ok(Self { mailer })
    }

    fn build_message(message: &MailMessage) -> Result<Message> {
        let from: Mailbox = message.from.parse().context("Invalid from address")?;
        let to: Mailbox = message.to.parse().context("Invalid recipient address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.content.clone())
            .context("No se pudo construir el mensaje")
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendMailError> {
        let email = Self::build_message(message).map_err(|e| SendMailError::new(message, e))?;

        match tokio::time::timeout(SMTP_SEND_TIMEOUT, self.mailer.send(email)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(SendMailError::new(message, e)),
            Err(_) => Err(SendMailError::new(
                message,
                format!("SMTP send timed out after {}s", SMTP_SEND_TIMEOUT.as_secs()),
            )),
        }
    }
}
