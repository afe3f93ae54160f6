//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod campaign_service;
pub mod contact_service;
pub mod content_resolver;
pub mod delivery_recorder;
pub mod recipient_resolver;
pub mod segment_service;
pub mod template_service;
pub mod user_service;
