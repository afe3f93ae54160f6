//! handlers/campaign_handler.rs
use actix_web::{web, HttpResponse};

use super::error_response;
use crate::{
    models::campaign_model::{CampaignSendResponse, CreateCampaignRequest},
    services::campaign_service::CampaignService,
};

/// POST /api/campaigns/send
///
/// Responde 200 aunque fallen entregas individuales; el detalle por
/// destinatario está en GET /api/campaigns/{id}/emails
pub async fn send_campaign_endpoint(
    campaign_service: web::Data<CampaignService>,
    body: web::Json<CreateCampaignRequest>,
) -> HttpResponse {
    match campaign_service.send(body.into_inner()).await {
        Ok(outcome) => HttpResponse::Ok().json(CampaignSendResponse {
            success: true,
            campaign: outcome.campaign,
            sent: outcome.sent,
            failed: outcome.failed,
        }),
        Err(e) => error_response("send_campaign", e),
    }
}

/// GET /api/campaigns
pub async fn list_campaigns_endpoint(
    campaign_service: web::Data<CampaignService>,
) -> HttpResponse {
    match campaign_service.list().await {
        Ok(campaigns) => HttpResponse::Ok().json(campaigns),
        Err(e) => error_response("list_campaigns", e),
    }
}

/// GET /api/campaigns/{id}
pub async fn get_campaign_endpoint(
    campaign_service: web::Data<CampaignService>,
    path: web::Path<String>,
) -> HttpResponse {
    match campaign_service.get(&path.into_inner()).await {
        Ok(campaign) => HttpResponse::Ok().json(campaign),
        Err(e) => error_response("get_campaign", e),
    }
}

/// GET /api/campaigns/{id}/emails
pub async fn campaign_emails_endpoint(
    campaign_service: web::Data<CampaignService>,
    path: web::Path<String>,
) -> HttpResponse {
    match campaign_service.sent_emails(&path.into_inner()).await {
        Ok(emails) => HttpResponse::Ok().json(emails),
        Err(e) => error_response("campaign_emails", e),
    }
}
