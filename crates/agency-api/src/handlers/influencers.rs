//! 达人管理 API 处理器
//!
//! 达人、社交账号与平台字典

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, CreateInfluencerRequest, DeletedResponse};
use crate::error::{AgencyError, Result};
use crate::models::{
    Account, AccountChanges, Influencer, InfluencerChanges, InfluencerWithAccounts, NewAccount,
    Platform,
};
use crate::state::AppState;

/// 达人列表，包含社交账号
///
/// GET /api/v1/influencers
pub async fn list_influencers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InfluencerWithAccounts>>>> {
    Ok(Json(ApiResponse::success(
        state.influencers.list_influencers().await?,
    )))
}

/// GET /api/v1/influencers/{id}
pub async fn get_influencer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<InfluencerWithAccounts>>> {
    let influencer = state
        .influencers
        .get_influencer(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("influencer", id))?;

    Ok(Json(ApiResponse::success(influencer)))
}

/// 创建达人及社交账号
///
/// POST /api/v1/influencers
pub async fn create_influencer(
    State(state): State<AppState>,
    Json(req): Json<CreateInfluencerRequest>,
) -> Result<Json<ApiResponse<InfluencerWithAccounts>>> {
    req.validate()?;

    let created = state
        .influencers
        .create_influencer_with_accounts(&req.influencer, &req.accounts)
        .await?;

    info!(
        influencer_id = created.influencer.influencer_id,
        accounts = created.accounts.len(),
        "Influencer created"
    );

    Ok(Json(ApiResponse::success(created)))
}

/// PATCH /api/v1/influencers/{id}
pub async fn update_influencer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<InfluencerChanges>,
) -> Result<Json<ApiResponse<Influencer>>> {
    req.validate()?;

    let influencer = state
        .influencers
        .update_influencer(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("influencer", id))?;
    info!(influencer_id = id, "Influencer updated");

    Ok(Json(ApiResponse::success(influencer)))
}

/// DELETE /api/v1/influencers/{id}
pub async fn delete_influencer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.influencers.delete_influencer(id).await? {
        return Err(AgencyError::not_found("influencer", id));
    }
    info!(influencer_id = id, "Influencer deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}

/// POST /api/v1/influencers/{id}/accounts
pub async fn add_account(
    State(state): State<AppState>,
    Path(influencer_id): Path<i64>,
    Json(req): Json<NewAccount>,
) -> Result<Json<ApiResponse<Account>>> {
    req.validate()?;

    if state.influencers.get_influencer(influencer_id).await?.is_none() {
        return Err(AgencyError::not_found("influencer", influencer_id));
    }

    let account = state.influencers.create_account(influencer_id, &req).await?;
    info!(
        influencer_id,
        account_id = account.account_id,
        platform = %account.platform_name,
        "Account created"
    );

    Ok(Json(ApiResponse::success(account)))
}

/// PATCH /api/v1/influencers/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AccountChanges>,
) -> Result<Json<ApiResponse<Account>>> {
    req.validate()?;

    let account = state
        .influencers
        .update_account(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("account", id))?;
    info!(account_id = id, "Account updated");

    Ok(Json(ApiResponse::success(account)))
}

/// DELETE /api/v1/influencers/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.influencers.delete_account(id).await? {
        return Err(AgencyError::not_found("account", id));
    }
    info!(account_id = id, "Account deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}

/// 平台字典
///
/// GET /api/v1/platforms
pub async fn list_platforms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Platform>>>> {
    Ok(Json(ApiResponse::success(
        state.influencers.list_platforms().await?,
    )))
}
