use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{MailSender, SendMailError};
use crate::{config::app_config::ResendConfig, models::mail_model::MailMessage};

/// Envío vía API HTTP de Resend (`POST {api_url}/emails`)
#[derive(Clone)]
pub struct ResendMailSender {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl ResendMailSender {
    pub fn new(config: &ResendConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn post_email(&self, message: &MailMessage) -> Result<()> {
        let payload = json!({
            "from": message.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.content
        });

        let resp = self
            .http_client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Fallo al hacer POST /emails")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Resend respondió {}: {}", status, body_txt));
        }
        Ok(())
    }
}

#[async_trait]
impl MailSender for ResendMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendMailError> {
        self.post_email(message)
            .await
            .map_err(|e| SendMailError::new(message, e))
    }
}
