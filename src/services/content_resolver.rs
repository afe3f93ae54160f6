//! services/content_resolver.rs

use std::sync::Arc;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::template_model::TemplateContent,
    repositories::TemplateContentRepository,
};

#[derive(Clone)]
pub struct ContentResolver {
    template_contents: Arc<dyn TemplateContentRepository>,
}

impl ContentResolver {
    pub fn new(template_contents: Arc<dyn TemplateContentRepository>) -> Self {
        Self { template_contents }
    }

    /// Versión más reciente del contenido; un template sin versiones no se puede enviar
    pub async fn resolve(&self, template_id: i64) -> ServiceResult<TemplateContent> {
        self.template_contents
            .find_latest(template_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template content", "template_id", template_id))
    }
}
