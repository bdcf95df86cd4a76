use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::model::vectorizer::VectorizerConfig;

/// 矢量化引擎的窄接口，流水线只依赖这一个操作
/// 换成进程内实现时不需要改动 ConvertService
pub trait VectorizerEngine: Send + Sync {
    fn vectorize(
        &self,
        input: &Path,
        output: &Path,
        config: &VectorizerConfig,
    ) -> impl std::future::Future<Output = AppResult<()>> + Send;
}

/// 子进程引擎：调用约定为 <command> [args..] <input> <output> <config-json>
/// 引擎向 output 写入 SVG 文本，退出码 0 表示成功
#[derive(Debug, Clone)]
pub struct SubprocessEngine {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl SubprocessEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl VectorizerEngine for SubprocessEngine {
    async fn vectorize(
        &self,
        input: &Path,
        output: &Path,
        config: &VectorizerConfig,
    ) -> AppResult<()> {
        let config_json = serde_json::to_string(config)
            .map_err(|e| AppError::Internal(format!("Failed to serialize config: {}", e)))?;

        tracing::debug!("调用矢量化引擎: {} {:?}", self.command, self.args);

        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .arg(input)
            .arg(output)
            .arg(&config_json)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // 超时丢弃等待 future 时强制回收子进程
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| AppError::Conversion(format!("Failed to spawn vectorizer engine: {}", e)))?;

        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                AppError::Conversion(format!("Failed to wait for vectorizer engine: {}", e))
            })?,
            Err(_) => {
                tracing::error!("❌ 矢量化引擎超时（{} 秒），已终止", self.timeout.as_secs());
                return Err(AppError::Conversion(format!(
                    "Vectorizer engine timed out after {} seconds",
                    self.timeout.as_secs()
                )));
            }
        };

        if !result.status.success() {
            let exit_code = result.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stdout = String::from_utf8_lossy(&result.stdout);
            let diagnostic = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            tracing::error!("❌ 矢量化引擎失败，退出码: {}", exit_code);
            return Err(AppError::Conversion(format!(
                "Vectorizer engine failed with exit code {}: {}",
                exit_code,
                diagnostic.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(unix)]
#[cfg(test)]
mod tests {
    use super::*;

    // sh 桩引擎：附加参数依次为 $1=input $2=output $3=config-json
    fn stub_engine(script: &str, timeout_secs: u64) -> SubprocessEngine {
        SubprocessEngine::new(&EngineConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "engine".to_string()],
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn successful_engine_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.svg");
        std::fs::write(&input, b"png").unwrap();

        let engine = stub_engine("cat \"$1\" > /dev/null && printf '<svg>ok</svg>' > \"$2\"", 10);
        engine
            .vectorize(&input, &output, &VectorizerConfig::default())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "<svg>ok</svg>");
    }

    #[tokio::test]
    async fn engine_receives_config_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.svg");
        std::fs::write(&input, b"png").unwrap();

        // 把收到的配置参数原样写入输出文件
        let engine = stub_engine("printf '%s' \"$3\" > \"$2\"", 10);
        engine
            .vectorize(&input, &output, &VectorizerConfig::default())
            .await
            .unwrap();

        let echoed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(echoed["colorMode"], "color");
        assert_eq!(echoed["colorPrecision"], 8);
        assert_eq!(echoed["maxIterations"], 2);
    }

    #[tokio::test]
    async fn nonzero_exit_carries_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.svg");
        std::fs::write(&input, b"png").unwrap();

        let engine = stub_engine("echo 'tracing kernel panic' >&2; exit 3", 10);
        let err = engine
            .vectorize(&input, &output, &VectorizerConfig::default())
            .await
            .unwrap_err();

        match err {
            AppError::Conversion(msg) => {
                assert!(msg.contains("exit code 3"), "msg: {}", msg);
                assert!(msg.contains("tracing kernel panic"), "msg: {}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn hung_engine_is_killed_on_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.svg");
        std::fs::write(&input, b"png").unwrap();

        let engine = stub_engine("sleep 30", 1);
        let started = std::time::Instant::now();
        let err = engine
            .vectorize(&input, &output, &VectorizerConfig::default())
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(10));
        match err {
            AppError::Conversion(msg) => assert!(msg.contains("timed out"), "msg: {}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_command_is_conversion_error() {
        let engine = SubprocessEngine::new(&EngineConfig {
            command: "definitely-not-a-real-vectorizer".to_string(),
            args: vec![],
            timeout_secs: 10,
        });
        let dir = tempfile::tempdir().unwrap();
        let err = engine
            .vectorize(
                &dir.path().join("in.png"),
                &dir.path().join("out.svg"),
                &VectorizerConfig::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }
}
