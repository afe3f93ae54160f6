use actix_web::{web, HttpResponse};

use super::error_response;
use crate::{models::user_model::CreateUser, services::user_service::UserService};

/// POST /api/users
pub async fn create_user_endpoint(
    user_service: web::Data<UserService>,
    body: web::Json<CreateUser>,
) -> HttpResponse {
    match user_service.create(body.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(user),
        Err(e) => error_response("create_user", e),
    }
}

/// GET /api/users/{username}
pub async fn get_user_endpoint(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> HttpResponse {
    match user_service.get_by_username(&path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response("get_user", e),
    }
}
