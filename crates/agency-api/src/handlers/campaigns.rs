//! 活动管理 API 处理器
//!
//! 活动读取接口对所有角色开放，返回时附带所属客户

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, DeletedResponse};
use crate::error::{AgencyError, Result};
use crate::models::{Campaign, CampaignChanges, CampaignWithClient, NewCampaign};
use crate::state::AppState;

/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CampaignWithClient>>>> {
    Ok(Json(ApiResponse::success(
        state.campaigns.list_campaigns().await?,
    )))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CampaignWithClient>>> {
    let campaign = state
        .campaigns
        .get_campaign(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("campaign", id))?;

    Ok(Json(ApiResponse::success(campaign)))
}

/// 创建活动
///
/// 客户不存在时由外键约束拒绝
///
/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<NewCampaign>,
) -> Result<Json<ApiResponse<Campaign>>> {
    req.validate()?;

    let campaign = state.campaigns.create_campaign(&req).await?;
    info!(
        campaign_id = campaign.campaign_id,
        client_id = campaign.client_id,
        "Campaign created"
    );

    Ok(Json(ApiResponse::success(campaign)))
}

/// 更新活动
///
/// 只修改一端日期时先读取已保存的活动，确保区间仍然有效
///
/// PATCH /api/v1/campaigns/{id}
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CampaignChanges>,
) -> Result<Json<ApiResponse<Campaign>>> {
    req.validate()?;

    if req.changes_one_date() {
        let current = state
            .campaigns
            .get_campaign(id)
            .await?
            .ok_or_else(|| AgencyError::not_found("campaign", id))?;
        req.validate_against(&current.campaign)
            .map_err(|e| AgencyError::Validation(e.to_string()))?;
    }

    let campaign = state
        .campaigns
        .update_campaign(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("campaign", id))?;
    info!(campaign_id = id, "Campaign updated");

    Ok(Json(ApiResponse::success(campaign)))
}

/// DELETE /api/v1/campaigns/{id}
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.campaigns.delete_campaign(id).await? {
        return Err(AgencyError::not_found("campaign", id));
    }
    info!(campaign_id = id, "Campaign deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
