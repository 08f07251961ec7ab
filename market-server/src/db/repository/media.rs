//! Media Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Media, MediaCreate};

const MEDIA_SELECT: &str =
    "SELECT id, file_name, hash, size, format, url, created_at FROM media";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Media>> {
    let sql = format!("{} WHERE id = ?", MEDIA_SELECT);
    let row = sqlx::query_as::<_, Media>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Content-hash lookup (upload dedup)
pub async fn find_by_hash(pool: &SqlitePool, hash: &str) -> RepoResult<Option<Media>> {
    let sql = format!("{} WHERE hash = ? LIMIT 1", MEDIA_SELECT);
    let row = sqlx::query_as::<_, Media>(&sql)
        .bind(hash)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_file_name(pool: &SqlitePool, file_name: &str) -> RepoResult<Option<Media>> {
    let sql = format!("{} WHERE file_name = ? LIMIT 1", MEDIA_SELECT);
    let row = sqlx::query_as::<_, Media>(&sql)
        .bind(file_name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: MediaCreate) -> RepoResult<Media> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO media (id, file_name, hash, size, format, url, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(&data.file_name)
    .bind(&data.hash)
    .bind(data.size)
    .bind(&data.format)
    .bind(&data.url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create media record".into()))
}
