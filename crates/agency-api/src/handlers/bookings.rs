//! 预约管理 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, DeletedResponse};
use crate::error::{AgencyError, Result};
use crate::models::{Booking, BookingChanges, NewBooking};
use crate::state::AppState;

/// 活动下的全部预约
///
/// GET /api/v1/campaigns/{id}/bookings
pub async fn list_campaign_bookings(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Booking>>>> {
    if state.campaigns.get_campaign(campaign_id).await?.is_none() {
        return Err(AgencyError::not_found("campaign", campaign_id));
    }

    Ok(Json(ApiResponse::success(
        state.campaigns.list_bookings(campaign_id).await?,
    )))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Booking>>> {
    let booking = state
        .campaigns
        .get_booking(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("booking", id))?;

    Ok(Json(ApiResponse::success(booking)))
}

/// 创建预约
///
/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<NewBooking>,
) -> Result<Json<ApiResponse<Booking>>> {
    req.validate()?;

    let booking = state.campaigns.create_booking(&req).await?.ok_or_else(|| {
        AgencyError::Validation(format!(
            "活动 {} 或达人 {} 不存在",
            req.campaign_id, req.influencer_id
        ))
    })?;

    info!(
        booking_id = booking.booking_id,
        campaign_id = booking.campaign_id,
        influencer_id = booking.influencer_id,
        "Booking created"
    );

    Ok(Json(ApiResponse::success(booking)))
}

/// PATCH /api/v1/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BookingChanges>,
) -> Result<Json<ApiResponse<Booking>>> {
    req.validate()?;

    let booking = state
        .campaigns
        .update_booking(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("booking", id))?;
    info!(booking_id = id, "Booking updated");

    Ok(Json(ApiResponse::success(booking)))
}

/// DELETE /api/v1/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.campaigns.delete_booking(id).await? {
        return Err(AgencyError::not_found("booking", id));
    }
    info!(booking_id = id, "Booking deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
