//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers HTTP.

pub mod campaign_handler;
pub mod contact_handler;
pub mod segment_handler;
pub mod template_handler;
pub mod user_handler;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::ServiceError;

/// Convierte un error de servicio en respuesta JSON, logueando las fallas de sistema
fn error_response(context: &str, e: ServiceError) -> HttpResponse {
    match &e {
        ServiceError::Storage(inner) => log::error!("({context}) {inner:?}"),
        other => log::info!("({context}) {other}"),
    }
    e.error_response()
}
