//! Vendor API 模块
//!
//! 目录浏览公开可读；评分/评论需要客户权限；店铺管理需要商家权限。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/vendors", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由：公开（认证中间件跳过目录 GET）
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/comments", get(handler::list_comments));

    // 客户路由：评分与评论
    let rating_routes = Router::new()
        .route("/{id}/ratings", post(handler::submit_rating))
        .layer(middleware::from_fn(require_permission("ratings:create")));
    let comment_routes = Router::new()
        .route("/{id}/comments", post(handler::post_comment))
        .layer(middleware::from_fn(require_permission("comments:create")));

    // 商家路由：店铺资料管理
    let manage_routes = Router::new()
        .route("/", post(handler::create_profile))
        .route("/my", get(handler::my_profile).put(handler::update_profile))
        .layer(middleware::from_fn(require_permission("vendor:manage")));

    read_routes
        .merge(rating_routes)
        .merge(comment_routes)
        .merge(manage_routes)
}
