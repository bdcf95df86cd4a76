use std::path::Path;
use std::time::Duration;
use base64::engine::general_purpose::STANDARD;
use base64::engine::Engine;
use crate::error::{AppError, AppResult};

/// 图像输入解析器：按 URL → 本地路径 → base64 的固定顺序识别输入
pub struct InputResolver {
    client: reqwest::Client,
}

impl InputResolver {
    pub fn new(fetch_timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub async fn resolve(&self, image: &str) -> AppResult<Vec<u8>> {
        if image.starts_with("http://") || image.starts_with("https://") {
            return self.fetch(image).await;
        }

        // 磁盘上存在的路径优先于 base64 解释
        let path = Path::new(image);
        if path.exists() {
            tracing::debug!("从本地文件读取图像: {}", image);
            return tokio::fs::read(path)
                .await
                .map_err(|e| AppError::Read(e.to_string()));
        }

        self.decode_base64(image)
    }

    async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        tracing::debug!("从 URL 下载图像: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn decode_base64(&self, input: &str) -> AppResult<Vec<u8>> {
        // data URL 前缀：丢弃第一个逗号之前的部分
        let payload = if input.starts_with("data:image") {
            input
                .splitn(2, ',')
                .nth(1)
                .ok_or_else(|| AppError::Decode("data URL has no payload".to_string()))?
        } else {
            input
        };

        STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}
