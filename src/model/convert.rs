use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::model::vectorizer::{VectorizerConfig, VectorizerOverrides};

/// 请求体信封：兼容直接格式和 RunPod 包装格式
/// 只解一层包装，Wrapped 优先匹配
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConvertEnvelope {
    Wrapped { input: ConversionRequest },
    Flat(ConversionRequest),
}

impl ConvertEnvelope {
    pub fn into_inner(self) -> ConversionRequest {
        match self {
            ConvertEnvelope::Wrapped { input } => input,
            ConvertEnvelope::Flat(request) => request,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConversionRequest {
    /// HTTP/HTTPS URL、本地文件路径或 base64 字符串
    pub image: String,
    pub config: Option<VectorizerOverrides>,
}

/// 转换流水线的产物，由 handler 组装为 ConversionResponse
#[derive(Debug)]
pub struct ConversionResult {
    pub filename: String,
    pub svg: String,
    pub elapsed: Duration,
    pub config: VectorizerConfig,
}

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub status: &'static str,
    pub url: String,
    pub filename: String,
    pub svg_base64: String,
    #[serde(rename = "processingTime")]
    pub processing_time: f64,
    pub config: VectorizerConfig,
    pub info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_body_parses() {
        let envelope: ConvertEnvelope =
            serde_json::from_str(r#"{"image": "aGVsbG8=", "config": {"colorPrecision": 4}}"#)
                .unwrap();
        let request = envelope.into_inner();
        assert_eq!(request.image, "aGVsbG8=");
        assert_eq!(request.config.unwrap().color_precision, Some(4));
    }

    #[test]
    fn wrapped_body_parses_to_same_request() {
        let envelope: ConvertEnvelope =
            serde_json::from_str(r#"{"input": {"image": "aGVsbG8="}}"#).unwrap();
        let request = envelope.into_inner();
        assert_eq!(request.image, "aGVsbG8=");
        assert!(request.config.is_none());
    }

    #[test]
    fn wrapped_takes_precedence_over_flat() {
        // 同时带有 input 和 image 时，包装格式优先
        let envelope: ConvertEnvelope = serde_json::from_str(
            r#"{"input": {"image": "wrapped"}, "image": "flat"}"#,
        )
        .unwrap();
        assert_eq!(envelope.into_inner().image, "wrapped");
    }

    #[test]
    fn neither_shape_fails() {
        let result: Result<ConvertEnvelope, _> = serde_json::from_str(r#"{"picture": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn config_is_optional() {
        let envelope: ConvertEnvelope = serde_json::from_str(r#"{"image": "x"}"#).unwrap();
        assert!(envelope.into_inner().config.is_none());
    }
}
