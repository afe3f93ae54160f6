//! handlers/segment_handler.rs
use actix_web::{web, HttpResponse};

use super::error_response;
use crate::{
    models::segment_model::{AddContactsRequest, CreateOrUpdateSegment},
    services::segment_service::SegmentService,
};

/// GET /api/segments
pub async fn list_segments_endpoint(segment_service: web::Data<SegmentService>) -> HttpResponse {
    match segment_service.list().await {
        Ok(segments) => HttpResponse::Ok().json(segments),
        Err(e) => error_response("list_segments", e),
    }
}

/// GET /api/segments/{id}
pub async fn get_segment_endpoint(
    segment_service: web::Data<SegmentService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match segment_service.get(path.into_inner()).await {
        Ok(segment) => HttpResponse::Ok().json(segment),
        Err(e) => error_response("get_segment", e),
    }
}

/// POST /api/segments
pub async fn create_segment_endpoint(
    segment_service: web::Data<SegmentService>,
    body: web::Json<CreateOrUpdateSegment>,
) -> HttpResponse {
    match segment_service.save(body.into_inner()).await {
        Ok(segment) => HttpResponse::Created().json(segment),
        Err(e) => error_response("create_segment", e),
    }
}

/// PUT /api/segments/{id}
pub async fn update_segment_endpoint(
    segment_service: web::Data<SegmentService>,
    path: web::Path<i64>,
    body: web::Json<CreateOrUpdateSegment>,
) -> HttpResponse {
    match segment_service
        .update(path.into_inner(), body.into_inner())
        .await
    {
        Ok(segment) => HttpResponse::Ok().json(segment),
        Err(e) => error_response("update_segment", e),
    }
}

/// POST /api/segments/{id}/contacts
pub async fn add_contacts_endpoint(
    segment_service: web::Data<SegmentService>,
    path: web::Path<i64>,
    body: web::Json<AddContactsRequest>,
) -> HttpResponse {
    match segment_service
        .add_contacts(path.into_inner(), &body.contacts)
        .await
    {
        Ok(segment) => HttpResponse::Ok().json(segment),
        Err(e) => error_response("add_contacts", e),
    }
}

/// DELETE /api/segments/{id}
pub async fn delete_segment_endpoint(
    segment_service: web::Data<SegmentService>,
    path: web::Path<i64>,
) -> HttpResponse {
    match segment_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("delete_segment", e),
    }
}
