use std::{collections::BTreeSet, sync::Arc};

use chrono::Utc;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::{
        contact_model::Contact,
        segment_model::{CreateOrUpdateSegment, Segment},
        user_model::User,
    },
    repositories::{CampaignRepository, ContactRepository, SegmentRepository, UserRepository},
};

#[derive(Clone)]
pub struct SegmentService {
    segments: Arc<dyn SegmentRepository>,
    contacts: Arc<dyn ContactRepository>,
    users: Arc<dyn UserRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl SegmentService {
    pub fn new(
        segments: Arc<dyn SegmentRepository>,
        contacts: Arc<dyn ContactRepository>,
        users: Arc<dyn UserRepository>,
        campaigns: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            segments,
            contacts,
            users,
            campaigns,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Segment>> {
        Ok(self.segments.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Segment> {
        self.segments
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Segment", "id", id))
    }

    pub async fn save(&self, req: CreateOrUpdateSegment) -> ServiceResult<Segment> {
        let user = self.user_by_username(&req.username).await?;
        let members = self.contacts_by_email(&req.contacts).await?;
        let ids: Vec<i64> = members.iter().map(|c| c.id).collect();

        Ok(self.segments.create(&req.name, user.id, &ids).await?)
    }

    /// Reemplaza nombre, dueño y miembros del segmento
    pub async fn update(&self, id: i64, req: CreateOrUpdateSegment) -> ServiceResult<Segment> {
        let mut segment = self.get(id).await?;
        segment.user_id = self.user_by_username(&req.username).await?.id;
        segment.contacts = self.contacts_by_email(&req.contacts).await?;
        segment.name = req.name;
        segment.updated_at = Utc::now();
        Ok(self.segments.update(&segment).await?)
    }

    pub async fn add_contacts(&self, id: i64, emails: &BTreeSet<String>) -> ServiceResult<Segment> {
        let mut segment = self.get(id).await?;
        for contact in self.contacts_by_email(emails).await? {
            if !segment.contacts.iter().any(|c| c.id == contact.id) {
                segment.contacts.push(contact);
            }
        }
        segment.updated_at = Utc::now();
        Ok(self.segments.update(&segment).await?)
    }

    /// Un segmento usado por alguna campaña no se puede borrar
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.get(id).await?;
        let used = self.campaigns.count_by_segment(id).await?;
        if used > 0 {
            return Err(ServiceError::Conflict(format!(
                "Segment with id = {id} is referenced by {used} campaign(s)"
            )));
        }
        if !self.segments.delete(id).await? {
            return Err(ServiceError::not_found("Segment", "id", id));
        }
        Ok(())
    }

    async fn user_by_username(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", "username", username))
    }

    /// Busca todos los emails y reporta juntos los que no existen
    async fn contacts_by_email(&self, emails: &BTreeSet<String>) -> ServiceResult<Vec<Contact>> {
        let mut found = Vec::with_capacity(emails.len());
        let mut missing = Vec::new();
        for email in emails {
            match self.contacts.find_by_email(email).await? {
                Some(contact) => found.push(contact),
                None => missing.push(email.as_str()),
            }
        }

        if !missing.is_empty() {
            return Err(ServiceError::not_found(
                "Contacts",
                "email",
                missing.join(", "),
            ));
        }
        Ok(found)
    }
}
