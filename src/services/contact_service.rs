use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::contact_model::{Contact, CreateOrUpdateContact},
    repositories::{CampaignRepository, ContactRepository},
};

#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>, campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { contacts, campaigns }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.contacts.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Contact> {
        self.contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Contact", "id", id))
    }

    pub async fn save(&self, req: CreateOrUpdateContact) -> ServiceResult<Contact> {
        let email = normalize_email(&req.email)?;
        self.ensure_email_free(&email, None).await?;
        Ok(self.contacts.create(&email, req.name.trim()).await?)
    }

    /// No guarda nada si el contacto no existe
    pub async fn update(&self, id: i64, req: CreateOrUpdateContact) -> ServiceResult<Contact> {
        let mut contact = self.get(id).await?;
        let email = normalize_email(&req.email)?;
        self.ensure_email_free(&email, Some(id)).await?;

        contact.email = email;
        contact.name = req.name.trim().to_string();
        contact.updated_at = Utc::now();
        Ok(self.contacts.update(&contact).await?)
    }

    /// Un contacto que ya recibió una campaña no se puede borrar
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.get(id).await?;
        let used = self.campaigns.count_by_contact(id).await?;
        if used > 0 {
            return Err(ServiceError::Conflict(format!(
                "Contact with id = {id} is referenced by {used} campaign(s)"
            )));
        }
        if !self.contacts.delete(id).await? {
            return Err(ServiceError::not_found("Contact", "id", id));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> ServiceResult<()> {
        match self.contacts.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(ServiceError::Conflict(format!(
                "Contact with email = {email} already exists"
            ))),
            _ => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> ServiceResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ServiceError::Validation(format!("Invalid email: '{email}'")));
    }
    Ok(email.to_string())
}
