//! handlers/contact_handler.rs
use actix_web::{web, HttpResponse};

use super::error_response;
use crate::{
    models::contact_model::CreateOrUpdateContact, services::contact_service::ContactService,
};

/// GET /api/contacts
pub async fn list_contacts_endpoint(contact_service: web::Data<ContactService>) -> HttpResponse {
    match contact_service.list().await {
        Ok(contacts) => HttpResponse::Ok().json(contacts),
        Err(e) => error_response("list_contacts", e),
    }
}

/// GET /api/contacts/{id}
pub async fn get_contact_endpoint(
    contact_service: web::Data<ContactService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match contact_service.get(path.into_inner()).await {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(e) => error_response("get_contact", e),
    }
}

/// POST /api/contacts
pub async fn create_contact_endpoint(
    contact_service: web::Data<ContactService>,
    body: web::Json<CreateOrUpdateContact>,
) -> HttpResponse {
    match contact_service.save(body.into_inner()).await {
        Ok(contact) => HttpResponse::Created().json(contact),
        Err(e) => error_response("create_contact", e),
    }
}

/// PUT /api/contacts/{id}
pub async fn update_contact_endpoint(
    contact_service: web::Data<ContactService>,
    path: web::Path<i64>,
    body: web::Json<CreateOrUpdateContact>,
) -> HttpResponse {
    match contact_service
        .update(path.into_inner(), body.into_inner())
        .await
    {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(e) => error_response("update_contact", e),
    }
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact_endpoint(
    contact_service: web::Data<ContactService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match contact_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("delete_contact", e),
    }
}
