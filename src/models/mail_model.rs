use serde::{Deserialize, Serialize};

/// Mensaje ya renderizado, listo para el `MailSender`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub content: String,
}
