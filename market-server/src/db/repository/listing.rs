//! Listing Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Listing, ListingCreate, ListingQuery, ListingUpdate};

const LISTING_SELECT: &str = "SELECT id, vendor_id, name, description, price, capacity, image_url, is_active, created_at, updated_at FROM listing";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Listing>> {
    let sql = format!("{} WHERE id = ?", LISTING_SELECT);
    let row = sqlx::query_as::<_, Listing>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_vendor(pool: &SqlitePool, vendor_id: i64) -> RepoResult<Vec<Listing>> {
    let sql = format!(
        "{} WHERE vendor_id = ? AND is_active = 1 ORDER BY price",
        LISTING_SELECT
    );
    let rows = sqlx::query_as::<_, Listing>(&sql)
        .bind(vendor_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn search(pool: &SqlitePool, query: &ListingQuery) -> RepoResult<Vec<Listing>> {
    let sql = format!(
        "{} WHERE is_active = 1 \
         AND (?1 IS NULL OR vendor_id = ?1) \
         AND (?2 IS NULL OR price >= ?2) \
         AND (?3 IS NULL OR price <= ?3) \
         AND (?4 IS NULL OR capacity >= ?4) \
         AND (?5 IS NULL OR capacity <= ?5) \
         ORDER BY price",
        LISTING_SELECT
    );
    let rows = sqlx::query_as::<_, Listing>(&sql)
        .bind(query.vendor_id)
        .bind(query.price_min)
        .bind(query.price_max)
        .bind(query.capacity_min)
        .bind(query.capacity_max)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Cheapest active listing price for a vendor (default booking price)
pub async fn min_price_for_vendor(pool: &SqlitePool, vendor_id: i64) -> RepoResult<Option<f64>> {
    let price: Option<f64> =
        sqlx::query_scalar("SELECT MIN(price) FROM listing WHERE vendor_id = ? AND is_active = 1")
            .bind(vendor_id)
            .fetch_one(pool)
            .await?;
    Ok(price)
}

pub async fn create(pool: &SqlitePool, vendor_id: i64, data: ListingCreate) -> RepoResult<Listing> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO listing (id, vendor_id, name, description, price, capacity, image_url, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(vendor_id)
    .bind(&data.name)
    .bind(data.description.unwrap_or_default())
    .bind(data.price)
    .bind(data.capacity)
    .bind(&data.image_url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create listing".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ListingUpdate) -> RepoResult<Listing> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE listing SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), capacity = COALESCE(?4, capacity), image_url = COALESCE(?5, image_url), is_active = COALESCE(?6, is_active), updated_at = ?7 WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.capacity)
    .bind(&data.image_url)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Listing {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Listing {id} not found")))
}

/// Soft delete a listing
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE listing SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
