//! config/app_config.rs
//! Configuración de la app leída desde variables de entorno (.env incluido).

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Remitente fijo de las campañas si no se define `MAIL_FROM`
pub const DEFAULT_MAIL_FROM: &str = "onboarding@resend.dev";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub from: String,
    pub transport: MailTransport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MailTransport {
    Log,
    Smtp(SmtpConfig),
    Resend(ResendConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub pass: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl MailTransport {
    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::Log => "log",
            MailTransport::Smtp(_) => "smtp",
            MailTransport::Resend(_) => "resend",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "sqlite:data/campaigns.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5022,
            workers: 1,
            mail: MailConfig {
                from: DEFAULT_MAIL_FROM.to_string(),
                transport: MailTransport::Log,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la config a partir de cualquier fuente clave -> valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| anyhow!("No se definió {key}"));

        let transport = match var("MAIL_TRANSPORT").as_deref().unwrap_or("log") {
            "log" => MailTransport::Log,
            "smtp" => MailTransport::Smtp(SmtpConfig {
                host: required("SMTP_HOST")?,
                port: parse_or(var("SMTP_PORT"), "SMTP_PORT", 587)?,
                user: required("SMTP_USER")?,
                pass: required("SMTP_PASS")?,
            }),
            "resend" => MailTransport::Resend(ResendConfig {
                api_url: var("RESEND_API_URL")
                    .unwrap_or_else(|| "https://api.resend.com".to_string()),
                api_key: required("RESEND_API_KEY")?,
            }),
            other => bail!("MAIL_TRANSPORT desconocido: {other} (log, smtp, resend)"),
        };

        let workers = parse_or(var("SERVER_WORKERS"), "SERVER_WORKERS", defaults.workers)?;
        if workers == 0 {
            bail!("SERVER_WORKERS debe ser mayor que 0");
        }

        Ok(AppConfig {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: var("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(var("SERVER_PORT"), "SERVER_PORT", defaults.port)?,
            workers,
            mail: MailConfig {
                from: var("MAIL_FROM").unwrap_or(defaults.mail.from),
                transport,
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {key}: {v}")),
        None => Ok(default),
    }
}
