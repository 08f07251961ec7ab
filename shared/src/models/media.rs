//! Media Model
//!
//! 上传图片的规范化引用：URL 在上传时生成并存储，读取端不再拼接路径

use serde::{Deserialize, Serialize};

/// Stored media entity
///
/// `url` is the canonical public URL, captured once at upload time.
/// `hash` (sha256 of the stored bytes) deduplicates repeat uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Media {
    pub id: i64,
    pub file_name: String,
    pub hash: String,
    pub size: i64,
    pub format: String,
    pub url: String,
    pub created_at: i64,
}

/// Create media payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaCreate {
    pub file_name: String,
    pub hash: String,
    pub size: i64,
    pub format: String,
    pub url: String,
}
