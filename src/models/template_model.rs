use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub favorite: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Versión del cuerpo de un template. `about` es el asunto del correo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateContent {
    pub id: i64,
    pub template_id: i64,
    pub about: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrUpdateTemplate {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub favorite: bool,
    pub about: String,
    pub content: String,
}

/// Template junto con su contenido más reciente
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    #[serde(flatten)]
    pub template: Template,
    pub latest_content: Option<TemplateContent>,
}
