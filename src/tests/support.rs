//! tests/support.rs
//! Repositorios en memoria y un sender programable para los tests.
//! Todas las escrituras y envíos quedan en un log de eventos compartido.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::{
    models::{
        campaign_model::Campaign, contact_model::Contact, mail_model::MailMessage,
        segment_model::Segment, sent_email_model::SentEmail, template_model::Template,
        template_model::TemplateContent, user_model::User,
    },
    providers::{MailSender, SendMailError},
    repositories::{
        sqlite::SqliteStore, CampaignRepository, ContactRepository, SegmentRepository,
        SentEmailRepository, TemplateContentRepository, TemplateRepository, UserRepository,
    },
    services::campaign_service::CampaignService,
};

pub type EventLog = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    contacts: BTreeMap<i64, Contact>,
    segments: BTreeMap<i64, Segment>,
    templates: BTreeMap<i64, Template>,
    contents: Vec<TemplateContent>,
    campaigns: Vec<Campaign>,
    sent_emails: BTreeMap<String, SentEmail>,
    sent_email_writes: Vec<SentEmail>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct InMemoryStore {
    state: Mutex<State>,
    events: EventLog,
}

impl InMemoryStore {
    pub fn new(events: EventLog) -> Self {
        Self {
            state: Mutex::new(State::default()),
            events,
        }
    }

    fn log(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    // ---- seeding (no genera eventos) ----

    pub fn seed_contact(&self, id: i64, email: &str) -> Contact {
        let now = Utc::now();
        let contact = Contact {
            id,
            email: email.to_string(),
            name: String::new(),
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.contacts.insert(id, contact.clone());
        contact
    }

    pub fn seed_segment(&self, id: i64, members: Vec<Contact>) -> Segment {
        let now = Utc::now();
        let segment = Segment {
            id,
            name: format!("segment-{id}"),
            user_id: 1,
            contacts: members,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.segments.insert(id, segment.clone());
        segment
    }

    pub fn seed_user(&self, id: i64, username: &str) -> User {
        let user = User {
            id,
            username: username.to_string(),
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.users.insert(id, user.clone());
        user
    }

    pub fn seed_template(&self, id: i64, versions: &[(&str, &str)]) {
        let now = Utc::now();
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.templates.insert(
            id,
            Template {
                id,
                name: format!("template-{id}"),
                favorite: false,
                user_id: 1,
                created_at: now,
                updated_at: now,
            },
        );
        for (about, content) in versions {
            let content_id = state.next_id();
            state.contents.push(TemplateContent {
                id: content_id,
                template_id: id,
                about: about.to_string(),
                content: content.to_string(),
                created_at: now,
            });
        }
    }

    // ---- inspección ----

    /// Cada escritura de sent_emails, en orden
    pub fn sent_email_writes(&self) -> Vec<SentEmail> {
        self.state.lock().unwrap().sent_email_writes.clone()
    }

    /// Estado final de los registros de entrega
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.state.lock().unwrap().sent_emails.values().cloned().collect()
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.state.lock().unwrap().campaigns.clone()
    }

    pub fn template_versions(&self, template_id: i64) -> usize {
        let state = self.state.lock().unwrap();
        state
            .contents
            .iter()
            .filter(|c| c.template_id == template_id)
            .count()
    }

    pub fn write_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("write:"))
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str) -> Result<User> {
        self.log(format!("write:user:{username}"));
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let user = User {
            id,
            username: username.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
        Ok(self.state.lock().unwrap().contacts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let state = self.state.lock().unwrap();
        Ok(state.contacts.values().find(|c| c.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.state.lock().unwrap().contacts.values().cloned().collect())
    }

    async fn create(&self, email: &str, name: &str) -> Result<Contact> {
        self.log(format!("write:contact:{email}"));
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        let contact = Contact {
            id,
            email: email.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.contacts.insert(id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, contact: &Contact) -> Result<Contact> {
        self.log(format!("write:contact:{}", contact.id));
        let mut state = self.state.lock().unwrap();
        state.contacts.insert(contact.id, contact.clone());
        Ok(contact.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.log(format!("write:contact-delete:{id}"));
        Ok(self.state.lock().unwrap().contacts.remove(&id).is_some())
    }
}

#[async_trait]
impl SegmentRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Segment>> {
        Ok(self.state.lock().unwrap().segments.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Segment>> {
        Ok(self.state.lock().unwrap().segments.values().cloned().collect())
    }

    async fn create(&self, name: &str, user_id: i64, contact_ids: &[i64]) -> Result<Segment> {
        self.log(format!("write:segment:{name}"));
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let contacts = contact_ids
            .iter()
            .filter_map(|cid| state.contacts.get(cid).cloned())
            .collect();
        let now = Utc::now();
        let segment = Segment {
            id,
            name: name.to_string(),
            user_id,
            contacts,
            created_at: now,
            updated_at: now,
        };
        state.segments.insert(id, segment.clone());
        Ok(segment)
    }

    async fn update(&self, segment: &Segment) -> Result<Segment> {
        self.log(format!("write:segment:{}", segment.id));
        let mut state = self.state.lock().unwrap();
        state.segments.insert(segment.id, segment.clone());
        Ok(segment.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.log(format!("write:segment-delete:{id}"));
        Ok(self.state.lock().unwrap().segments.remove(&id).is_some())
    }
}

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>> {
        Ok(self.state.lock().unwrap().templates.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Template>> {
        Ok(self.state.lock().unwrap().templates.values().cloned().collect())
    }

    async fn create(&self, name: &str, favorite: bool, user_id: i64) -> Result<Template> {
        self.log(format!("write:template:{name}"));
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        let template = Template {
            id,
            name: name.to_string(),
            favorite,
            user_id,
            created_at: now,
            updated_at: now,
        };
        state.templates.insert(id, template.clone());
        Ok(template)
    }

    async fn update(&self, template: &Template) -> Result<Template> {
        self.log(format!("write:template:{}", template.id));
        let mut state = self.state.lock().unwrap();
        state.templates.insert(template.id, template.clone());
        Ok(template.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.log(format!("write:template-delete:{id}"));
        Ok(self.state.lock().unwrap().templates.remove(&id).is_some())
    }
}

#[async_trait]
impl TemplateContentRepository for InMemoryStore {
    async fn find_latest(&self, template_id: i64) -> Result<Option<TemplateContent>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .contents
            .iter()
            .filter(|c| c.template_id == template_id)
            .max_by_key(|c| c.id)
            .cloned())
    }

    async fn create(
        &self,
        template_id: i64,
        about: &str,
        content: &str,
    ) -> Result<TemplateContent> {
        self.log(format!("write:template-content:{template_id}"));
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let version = TemplateContent {
            id,
            template_id,
            about: about.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        state.contents.push(version.clone());
        Ok(version)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn save(&self, campaign: &Campaign) -> Result<Campaign> {
        self.log(format!("write:campaign:{}", campaign.name));
        self.state.lock().unwrap().campaigns.push(campaign.clone());
        Ok(campaign.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>> {
        let state = self.state.lock().unwrap();
        Ok(state.campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Campaign>> {
        Ok(self.state.lock().unwrap().campaigns.clone())
    }

    async fn count_by_template(&self, template_id: i64) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .campaigns
            .iter()
            .filter(|c| c.template_id == template_id)
            .count() as i64)
    }

    async fn count_by_contact(&self, contact_id: i64) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .campaigns
            .iter()
            .filter(|c| c.contacts.iter().any(|x| x.id == contact_id))
            .count() as i64)
    }

    async fn count_by_segment(&self, segment_id: i64) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .campaigns
            .iter()
            .filter(|c| c.segments.iter().any(|x| x.id == segment_id))
            .count() as i64)
    }
}

#[async_trait]
impl SentEmailRepository for InMemoryStore {
    async fn save(&self, sent_email: &SentEmail) -> Result<SentEmail> {
        self.log(format!(
            "write:sent_email:{}:{}",
            sent_email.recipient, sent_email.status
        ));
        let mut state = self.state.lock().unwrap();
        state.sent_email_writes.push(sent_email.clone());
        state
            .sent_emails
            .insert(sent_email.id.clone(), sent_email.clone());
        Ok(sent_email.clone())
    }

    async fn find_by_campaign(&self, campaign_id: &str) -> Result<Vec<SentEmail>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sent_emails
            .values()
            .filter(|s| s.campaign_id == campaign_id)
            .cloned()
            .collect())
    }
}

/// Sender que falla para las direcciones indicadas (o para todas)
pub struct FakeMailSender {
    events: EventLog,
    failing: HashSet<String>,
    fail_all: bool,
    sent: Mutex<Vec<MailMessage>>,
}

impl FakeMailSender {
    pub fn ok(events: EventLog) -> Self {
        Self {
            events,
            failing: HashSet::new(),
            fail_all: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_all(events: EventLog) -> Self {
        Self {
            fail_all: true,
            ..Self::ok(events)
        }
    }

    pub fn failing_for(events: EventLog, addresses: &[&str]) -> Self {
        Self {
            failing: addresses.iter().map(|a| a.to_string()).collect(),
            ..Self::ok(events)
        }
    }

    /// Mensajes que llegaron al sender (exitosos o no)
    pub fn attempts(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for FakeMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendMailError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("send:{}", message.to));
        self.sent.lock().unwrap().push(message.clone());

        if self.fail_all || self.failing.contains(&message.to) {
            return Err(SendMailError::new(message, anyhow!("Failed to send")));
        }
        Ok(())
    }
}

pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn campaign_service(store: &Arc<InMemoryStore>, sender: Arc<FakeMailSender>) -> CampaignService {
    CampaignService::new(
        sender,
        "onboarding@resend.dev",
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

/// SQLite en memoria con las migraciones aplicadas
pub async fn memory_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:", 1)
        .await
        .expect("sqlite en memoria");
    store.run_migrations().await.expect("migraciones");
    store
}
