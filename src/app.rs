//! app.rs
use std::sync::Arc;

use actix_web::web;

use crate::handlers::{
    campaign_handler, contact_handler, segment_handler, template_handler, user_handler,
};
use crate::providers::MailSender;
use crate::repositories::sqlite::SqliteStore;
use crate::services::{
    campaign_service::CampaignService, contact_service::ContactService,
    segment_service::SegmentService, template_service::TemplateService,
    user_service::UserService,
};

/// Servicios compartidos entre workers de actix
#[derive(Clone)]
pub struct AppServices {
    pub users: UserService,
    pub contacts: ContactService,
    pub segments: SegmentService,
    pub templates: TemplateService,
    pub campaigns: CampaignService,
}

impl AppServices {
    pub fn new(store: SqliteStore, mail_sender: Arc<dyn MailSender>, mail_from: &str) -> Self {
        let store = Arc::new(store);
        AppServices {
            users: UserService::new(store.clone()),
            contacts: ContactService::new(store.clone(), store.clone()),
            segments: SegmentService::new(store.clone(), store.clone(), store.clone(), store.clone()),
            templates: TemplateService::new(store.clone(), store.clone(), store.clone(), store.clone()),
            campaigns: CampaignService::new(
                mail_sender,
                mail_from,
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store,
            ),
        }
    }

    pub fn configure_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.contacts.clone()))
            .app_data(web::Data::new(self.segments.clone()))
            .app_data(web::Data::new(self.templates.clone()))
            .app_data(web::Data::new(self.campaigns.clone()));
    }
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/users")
                    .route("", web::post().to(user_handler::create_user_endpoint))
                    .route("/{username}", web::get().to(user_handler::get_user_endpoint)),
            )
            .service(
                web::scope("/contacts")
                    .route("", web::get().to(contact_handler::list_contacts_endpoint))
                    .route("", web::post().to(contact_handler::create_contact_endpoint))
                    .route("/{id}", web::get().to(contact_handler::get_contact_endpoint))
                    .route(
                        "/{id}",
                        web::put().to(contact_handler::update_contact_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(contact_handler::delete_contact_endpoint),
                    ),
            )
            .service(
                web::scope("/segments")
                    .route("", web::get().to(segment_handler::list_segments_endpoint))
                    .route("", web::post().to(segment_handler::create_segment_endpoint))
                    .route("/{id}", web::get().to(segment_handler::get_segment_endpoint))
                    .route(
                        "/{id}",
                        web::put().to(segment_handler::update_segment_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(segment_handler::delete_segment_endpoint),
                    )
                    .route(
                        "/{id}/contacts",
                        web::post().to(segment_handler::add_contacts_endpoint),
                    ),
            )
            .service(
                web::scope("/templates")
                    .route("", web::get().to(template_handler::list_templates_endpoint))
                    .route(
                        "",
                        web::post().to(template_handler::create_template_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::get().to(template_handler::get_template_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::put().to(template_handler::update_template_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(template_handler::delete_template_endpoint),
                    )
                    .route(
                        "/{id}/content",
                        web::get().to(template_handler::latest_content_endpoint),
                    ),
            )
            .service(
                web::scope("/campaigns")
                    .route("", web::get().to(campaign_handler::list_campaigns_endpoint))
                    .route(
                        "/send",
                        web::post().to(campaign_handler::send_campaign_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::get().to(campaign_handler::get_campaign_endpoint),
                    )
                    .route(
                        "/{id}/emails",
                        web::get().to(campaign_handler::campaign_emails_endpoint),
                    ),
            ),
    );
}
