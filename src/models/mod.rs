//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod campaign_model;
pub mod contact_model;
pub mod mail_model;
pub mod segment_model;
pub mod sent_email_model;
pub mod template_model;
pub mod user_model;
