//! 批量导入 API 处理器
//!
//! 接收 multipart 上传的表格文件，字段名为 `file`

use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::{debug, info};

use crate::dto::ApiResponse;
use crate::error::{AgencyError, Result};
use crate::import::{ImportReport, import_clients, import_influencers};
use crate::models::{ClientWithLocations, InfluencerWithAccounts};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

/// 导入客户表格
///
/// POST /api/v1/clients/import
pub async fn import_client_sheet(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReport<ClientWithLocations>>>> {
    let bytes = read_upload(multipart).await?;
    info!(size = bytes.len(), "Client import upload received");

    let report = import_clients(state.clients.as_ref(), &bytes, &state.import.client)
        .await?
        .into_result()?;

    Ok(Json(ApiResponse::success(report)))
}

/// 导入达人表格
///
/// POST /api/v1/influencers/import
pub async fn import_influencer_sheet(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReport<InfluencerWithAccounts>>>> {
    let bytes = read_upload(multipart).await?;
    info!(size = bytes.len(), "Influencer import upload received");

    let report = import_influencers(
        state.influencers.as_ref(),
        &bytes,
        &state.import.influencer,
    )
    .await?
    .into_result()?;

    Ok(Json(ApiResponse::success(report)))
}

/// 读取上传字段的全部内容，其他字段忽略
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AgencyError::FileProcessing(format!("读取上传内容失败: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AgencyError::FileProcessing(format!("读取上传文件失败: {}", e)))?;
        if bytes.is_empty() {
            return Err(AgencyError::FileProcessing("上传文件为空".to_string()));
        }
        return Ok(bytes.to_vec());
    }

    Err(AgencyError::FileProcessing("缺少上传文件".to_string()))
}
