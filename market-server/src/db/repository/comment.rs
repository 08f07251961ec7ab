//! Comment Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Comment, CommentWithAuthor};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Comment>> {
    let row = sqlx::query_as::<_, Comment>(
        "SELECT id, vendor_id, author_id, body, created_at FROM comment WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    vendor_id: i64,
    author_id: i64,
    body: &str,
) -> RepoResult<Comment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO comment (id, vendor_id, author_id, body, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(vendor_id)
    .bind(author_id)
    .bind(body)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create comment".into()))
}

/// All comments for a vendor, newest first
pub async fn find_by_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> RepoResult<Vec<CommentWithAuthor>> {
    let rows = sqlx::query_as::<_, CommentWithAuthor>(
        "SELECT c.id, c.vendor_id, c.author_id, a.display_name AS author_name, c.body, c.created_at \
         FROM comment c JOIN account a ON c.author_id = a.id \
         WHERE c.vendor_id = ? ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
