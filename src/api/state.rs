use std::sync::Arc;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::service::convert::{ConvertService, SubprocessEngine};
use crate::service::input::InputResolver;
use crate::service::output::OutputStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub convert_service: Arc<ConvertService>,
    pub store: Arc<OutputStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"AppConfig")
            .field("output_dir", &self.store.dir())
            .finish()
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        // 产物目录由 OutputStore 独占管理，写读两侧共享同一实例
        let store = Arc::new(OutputStore::new(&config.output.dir)?);
        let resolver = InputResolver::new(config.fetch_timeout())?;
        let engine = SubprocessEngine::new(&config.engine);
        let convert_service = Arc::new(ConvertService::new(engine, resolver, store.clone()));

        Ok(Self {
            config: Arc::new(config),
            convert_service,
            store,
        })
    }
}
