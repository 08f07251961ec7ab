//! Account Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Account, AccountCreate, AccountUpdate};

const ACCOUNT_SELECT: &str = "SELECT id, username, display_name, hash_pass, role, is_active, created_at, updated_at FROM account";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let sql = format!("{} WHERE id = ?", ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Account>> {
    let sql = format!("{} WHERE username = ? LIMIT 1", ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: AccountCreate) -> RepoResult<Account> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO account (id, username, display_name, hash_pass, role, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(&data.display_name)
    .bind(&data.hash_pass)
    .bind(data.role.as_str())
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AccountUpdate) -> RepoResult<Account> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE account SET display_name = COALESCE(?1, display_name), hash_pass = COALESCE(?2, hash_pass), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.display_name)
    .bind(&data.hash_pass)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))
}
