//! Comment Model

use serde::{Deserialize, Serialize};

/// Comment entity (append-only, no edit/delete)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: i64,
    pub vendor_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: i64,
}

/// Post comment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub body: String,
}

/// Comment joined with author display name (vendor detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CommentWithAuthor {
    pub id: i64,
    pub vendor_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub body: String,
    pub created_at: i64,
}
