//! handlers/template_handler.rs
use actix_web::{web, HttpResponse};

use super::error_response;
use crate::{
    models::template_model::CreateOrUpdateTemplate, services::template_service::TemplateService,
};

/// GET /api/templates
pub async fn list_templates_endpoint(
    template_service: web::Data<TemplateService>,
) -> HttpResponse {
    match template_service.list().await {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(e) => error_response("list_templates", e),
    }
}

/// GET /api/templates/{id}
pub async fn get_template_endpoint(
    template_service: web::Data<TemplateService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match template_service.get(path.into_inner()).await {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => error_response("get_template", e),
    }
}

/// GET /api/templates/{id}/content
pub async fn latest_content_endpoint(
    template_service: web::Data<TemplateService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match template_service.latest_content(path.into_inner()).await {
        Ok(content) => HttpResponse::Ok().json(content),
        Err(e) => error_response("latest_content", e),
    }
}

/// POST /api/templates
pub async fn create_template_endpoint(
    template_service: web::Data<TemplateService>,
    body: web::Json<CreateOrUpdateTemplate>,
) -> HttpResponse {
    match template_service.save(body.into_inner()).await {
        Ok(template) => HttpResponse::Created().json(template),
        Err(e) => error_response("create_template", e),
    }
}

/// PUT /api/templates/{id}
pub async fn update_template_endpoint(
    template_service: web::Data<TemplateService>,
    path: web::Path<i64>,
    body: web::Json<CreateOrUpdateTemplate>,
) -> HttpResponse {
    match template_service
        .update(path.into_inner(), body.into_inner())
        .await
    {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => error_response("update_template", e),
    }
}

/// DELETE /api/templates/{id}
pub async fn delete_template_endpoint(
    template_service: web::Data<TemplateService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match template_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("delete_template", e),
    }
}
