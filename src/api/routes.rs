use axum::{Router, routing::get, routing::post};
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::api::AppState;
use crate::api::handlers;

pub fn create_router(state: AppState) -> Router {
    // 配置 CORS，确保正确处理预检请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
        .expose_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/", get(handlers::info::root))
        .route("/health", get(handlers::info::health))
        .route("/config/default", get(handlers::info::default_config))

        // 转换路由（保留旧调用方使用的带版本路径）
        .route("/convert", post(handlers::convert::convert))
        .route("/vectorizer/v1/convert", post(handlers::convert::convert))

        // 产物下载路由
        .route("/files/:filename", get(handlers::files::get_file))

        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
