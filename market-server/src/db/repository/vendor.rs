//! Vendor Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Vendor, VendorCreate, VendorQuery, VendorUpdate};

const VENDOR_SELECT: &str = "SELECT id, owner_id, kind, name, city, description, phone, image_url, rate, rating_count, is_visible, is_accepting, created_at, updated_at FROM vendor";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Vendor>> {
    let sql = format!("{} WHERE id = ?", VENDOR_SELECT);
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Option<Vendor>> {
    let sql = format!("{} WHERE owner_id = ? LIMIT 1", VENDOR_SELECT);
    let row = sqlx::query_as::<_, Vendor>(&sql)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Catalog search over visible vendors.
///
/// Price/capacity bands match vendors that have at least one active listing
/// inside the band.
pub async fn search(pool: &SqlitePool, query: &VendorQuery) -> RepoResult<Vec<Vendor>> {
    let sql = format!(
        "{} WHERE is_visible = 1 \
         AND (?1 IS NULL OR kind = ?1) \
         AND (?2 IS NULL OR city = ?2 COLLATE NOCASE) \
         AND ((?3 IS NULL AND ?4 IS NULL AND ?5 IS NULL AND ?6 IS NULL) OR EXISTS ( \
             SELECT 1 FROM listing l WHERE l.vendor_id = vendor.id AND l.is_active = 1 \
             AND (?3 IS NULL OR l.price >= ?3) \
             AND (?4 IS NULL OR l.price <= ?4) \
             AND (?5 IS NULL OR l.capacity >= ?5) \
             AND (?6 IS NULL OR l.capacity <= ?6))) \
         ORDER BY rate DESC, rating_count DESC, name",
        VENDOR_SELECT
    );
    let rows = sqlx::query_as::<_, Vendor>(&sql)
        .bind(query.kind.map(|k| k.as_str()))
        .bind(query.city.as_deref())
        .bind(query.price_min)
        .bind(query.price_max)
        .bind(query.capacity_min)
        .bind(query.capacity_max)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, owner_id: i64, data: VendorCreate) -> RepoResult<Vendor> {
    // Check the owner does not already have a profile
    if find_by_owner(pool, owner_id).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Account {owner_id} already has a vendor profile"
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO vendor (id, owner_id, kind, name, city, description, phone, image_url, rate, rating_count, is_visible, is_accepting, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, 1, 1, ?9, ?9)",
    )
    .bind(id)
    .bind(owner_id)
    .bind(data.kind.as_str())
    .bind(&data.name)
    .bind(&data.city)
    .bind(data.description.unwrap_or_default())
    .bind(&data.phone)
    .bind(&data.image_url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create vendor".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: VendorUpdate) -> RepoResult<Vendor> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vendor SET name = COALESCE(?1, name), city = COALESCE(?2, city), description = COALESCE(?3, description), phone = COALESCE(?4, phone), image_url = COALESCE(?5, image_url), is_visible = COALESCE(?6, is_visible), is_accepting = COALESCE(?7, is_accepting), updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.description)
    .bind(&data.phone)
    .bind(&data.image_url)
    .bind(data.is_visible)
    .bind(data.is_accepting)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Vendor {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Vendor {id} not found")))
}

/// Fold one star vote into the vendor's running mean.
///
/// Single UPDATE so the mean and the count move together:
/// `rate = (rate * rating_count + stars) / (rating_count + 1)`.
/// With rating_count = 0 this yields rate = stars exactly.
pub async fn apply_rating(pool: &SqlitePool, id: i64, stars: u8) -> RepoResult<Vendor> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vendor SET rate = (rate * rating_count + ?1) / (rating_count + 1), rating_count = rating_count + 1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(stars as f64)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Vendor {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Vendor {id} not found")))
}
