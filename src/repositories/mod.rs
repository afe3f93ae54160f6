//! repositories/mod.rs
//! Capacidades de almacenamiento que usan los servicios. Cada trait es una
//! operación puntual; ninguna asume una transacción que abarque todo el envío.

pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    campaign_model::Campaign, contact_model::Contact, segment_model::Segment,
    sent_email_model::SentEmail, template_model::Template, template_model::TemplateContent,
    user_model::User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create(&self, username: &str) -> Result<User>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>>;
    async fn find_all(&self) -> Result<Vec<Contact>>;
    async fn create(&self, email: &str, name: &str) -> Result<Contact>;
    async fn update(&self, contact: &Contact) -> Result<Contact>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait SegmentRepository: Send + Sync {
    /// Carga el segmento con sus miembros actuales
    async fn find_by_id(&self, id: i64) -> Result<Option<Segment>>;
    async fn find_all(&self) -> Result<Vec<Segment>>;
    async fn create(&self, name: &str, user_id: i64, contact_ids: &[i64]) -> Result<Segment>;
    /// Reemplaza nombre, dueño y miembros
    async fn update(&self, segment: &Segment) -> Result<Segment>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>>;
    async fn find_all(&self) -> Result<Vec<Template>>;
    async fn create(&self, name: &str, favorite: bool, user_id: i64) -> Result<Template>;
    async fn update(&self, template: &Template) -> Result<Template>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TemplateContentRepository: Send + Sync {
    /// Última versión creada para el template, si existe
    async fn find_latest(&self, template_id: i64) -> Result<Option<TemplateContent>>;
    async fn create(&self, template_id: i64, about: &str, content: &str)
        -> Result<TemplateContent>;
}

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Persiste la campaña con sus asociaciones a contactos y segmentos
    async fn save(&self, campaign: &Campaign) -> Result<Campaign>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>>;
    async fn find_all(&self) -> Result<Vec<Campaign>>;
    /// Campañas persistidas que usan el template
    async fn count_by_template(&self, template_id: i64) -> Result<i64>;
    /// Campañas persistidas que tienen al contacto como destinatario
    async fn count_by_contact(&self, contact_id: i64) -> Result<i64>;
    async fn count_by_segment(&self, segment_id: i64) -> Result<i64>;
}

#[async_trait]
pub trait SentEmailRepository: Send + Sync {
    /// Inserta el registro o actualiza estado/error si ya existe
    async fn save(&self, sent_email: &SentEmail) -> Result<SentEmail>;
    async fn find_by_campaign(&self, campaign_id: &str) -> Result<Vec<SentEmail>>;
}
