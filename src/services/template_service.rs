use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::template_model::{CreateOrUpdateTemplate, TemplateContent, TemplateResponse},
    repositories::{
        CampaignRepository, TemplateContentRepository, TemplateRepository, UserRepository,
    },
};

#[derive(Clone)]
pub struct TemplateService {
    templates: Arc<dyn TemplateRepository>,
    template_contents: Arc<dyn TemplateContentRepository>,
    users: Arc<dyn UserRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl TemplateService {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        template_contents: Arc<dyn TemplateContentRepository>,
        users: Arc<dyn UserRepository>,
        campaigns: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            templates,
            template_contents,
            users,
            campaigns,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<TemplateResponse>> {
        let templates = self.templates.find_all().await?;
        let mut result = Vec::with_capacity(templates.len());
        for template in templates {
            let latest_content = self.template_contents.find_latest(template.id).await?;
            result.push(TemplateResponse {
                template,
                latest_content,
            });
        }
        Ok(result)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<TemplateResponse> {
        let template = self
            .templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template", "id", id))?;
        let latest_content = self.template_contents.find_latest(id).await?;
        Ok(TemplateResponse {
            template,
            latest_content,
        })
    }

    /// Crea el template con su primera versión de contenido
    pub async fn save(&self, req: CreateOrUpdateTemplate) -> ServiceResult<TemplateResponse> {
        let user = self
            .users
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", "username", &req.username))?;

        let template = self
            .templates
            .create(&req.name, req.favorite, user.id)
            .await?;
        let content = self
            .template_contents
            .create(template.id, &req.about, &req.content)
            .await?;

        Ok(TemplateResponse {
            template,
            latest_content: Some(content),
        })
    }

    /// Actualiza nombre/favorito y agrega una nueva versión del contenido
    pub async fn update(&self, id: i64, req: CreateOrUpdateTemplate) -> ServiceResult<TemplateResponse> {
        let mut template = self
            .templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template", "id", id))?;

        template.name = req.name;
        template.favorite = req.favorite;
        template.updated_at = Utc::now();
        let template = self.templates.update(&template).await?;
        let content = self
            .template_contents
            .create(id, &req.about, &req.content)
            .await?;

        Ok(TemplateResponse {
            template,
            latest_content: Some(content),
        })
    }

    pub async fn latest_content(&self, id: i64) -> ServiceResult<TemplateContent> {
        self.template_contents
            .find_latest(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template content", "template_id", id))
    }

    /// Un template usado por alguna campaña no se puede borrar
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template", "id", id))?;
        let used = self.campaigns.count_by_template(id).await?;
        if used > 0 {
            return Err(ServiceError::Conflict(format!(
                "Template with id = {id} is referenced by {used} campaign(s)"
            )));
        }
        if !self.templates.delete(id).await? {
            return Err(ServiceError::not_found("Template", "id", id));
        }
        Ok(())
    }
}
