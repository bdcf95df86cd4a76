use axum::extract::{Host, Json, State};
use base64::engine::general_purpose::STANDARD;
use base64::engine::Engine;
use crate::api::AppState;
use crate::error::AppResult;
use crate::model::convert::{ConversionResponse, ConvertEnvelope};
use crate::util;

/// POST /convert
/// 兼容两种请求体：直接格式 {"image", "config"} 和包装格式 {"input": {...}}
pub async fn convert(
    State(state): State<AppState>,
    Host(host): Host,
    Json(payload): Json<ConvertEnvelope>,
) -> AppResult<Json<ConversionResponse>> {
    let request = payload.into_inner();
    let result = state.convert_service.convert(request).await?;

    // 配置了 base_url 时优先使用，否则从请求的 Host 头推导
    let base_url = match &state.config.server.base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => format!("http://{}", host),
    };
    let url = format!("{}/files/{}", base_url, result.filename);

    let svg_base64 = STANDARD.encode(result.svg.as_bytes());
    let generated_at = util::time::format_date_time().unwrap_or_else(|_| "unknown".to_string());

    Ok(Json(ConversionResponse {
        status: "success",
        url,
        filename: result.filename,
        svg_base64,
        processing_time: result.elapsed.as_secs_f64(),
        config: result.config,
        info: format!("Generated at {}", generated_at),
    }))
}
