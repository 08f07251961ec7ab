//! Upload API 模块
//!
//! - POST /api/upload: 上传图片（需登录）
//! - GET /api/image/{file}: 读取已存储的图片（公开）

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/upload",
            // 默认 2MB 的请求体上限低于 5MB 的图片上限，这里放宽到 8MB，
            // 实际大小校验在 handler 内完成
            post(handler::upload).layer(DefaultBodyLimit::max(8 * 1024 * 1024)),
        )
        .route("/api/image/{file_name}", get(handler::serve_image))
}
