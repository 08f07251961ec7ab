//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口 (注册/登录)
//! - [`upload`] - 图片上传与读取接口
//! - [`vendors`] - 供应商目录、评分、评论接口
//! - [`listings`] - 套餐管理接口
//! - [`reservations`] - 预订与档期接口
//! - [`visits`] - 参观预约接口

pub mod guard;

pub mod auth;
pub mod health;
pub mod upload;

// Marketplace API
pub mod listings;
pub mod reservations;
pub mod vendors;
pub mod visits;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
