use std::sync::Arc;
use std::time::Instant;
use crate::error::{AppError, AppResult};
use crate::model::convert::{ConversionRequest, ConversionResult};
use crate::model::vectorizer::VectorizerConfig;
use crate::service::convert::engine::{SubprocessEngine, VectorizerEngine};
use crate::service::input::InputResolver;
use crate::service::output::OutputStore;

/// 转换流水线：解析输入 → 合并配置 → 调用引擎 → 产物入库
/// 每个请求独立走完整条流水线，阶段间没有共享可变状态
pub struct ConvertService<E = SubprocessEngine> {
    engine: E,
    resolver: InputResolver,
    store: Arc<OutputStore>,
}

impl<E: VectorizerEngine> ConvertService<E> {
    pub fn new(engine: E, resolver: InputResolver, store: Arc<OutputStore>) -> Self {
        Self {
            engine,
            resolver,
            store,
        }
    }

    pub async fn convert(&self, request: ConversionRequest) -> AppResult<ConversionResult> {
        let image = self.resolver.resolve(&request.image).await?;
        tracing::info!("🚀 开始转换，输入 {} 字节", image.len());

        let config = VectorizerConfig::merged(request.config.as_ref())?;

        let started = Instant::now();

        // 每次转换一个独立的临时目录，离开作用域时连同输入输出一起删除
        let scratch = tempfile::Builder::new()
            .prefix("vectorizer_")
            .tempdir()
            .map_err(AppError::Io)?;
        let input_path = scratch.path().join("input.png");
        let output_path = scratch.path().join("output.svg");

        tokio::fs::write(&input_path, &image).await?;

        self.engine
            .vectorize(&input_path, &output_path, &config)
            .await?;

        // 引擎报告成功但没有产出文件，同样视为转换失败
        let svg = tokio::fs::read_to_string(&output_path).await.map_err(|_| {
            AppError::Conversion("Vectorizer engine reported success but produced no output file".to_string())
        })?;
        if svg.is_empty() {
            return Err(AppError::Conversion(
                "Vectorizer engine produced an empty output file".to_string(),
            ));
        }

        let elapsed = started.elapsed();

        let filename = self.store.generate_filename("vector", "svg")?;
        self.store.write(&filename, &svg).await?;

        tracing::info!("✅ 转换完成: {} ({:.2} 秒)", filename, elapsed.as_secs_f64());

        Ok(ConversionResult {
            filename,
            svg,
            elapsed,
            config,
        })
    }
}
