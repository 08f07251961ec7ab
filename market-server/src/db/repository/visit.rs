//! Visit Request Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{VisitRequest, VisitWithCustomer, VisitWithVendor};

const VISIT_SELECT: &str = "SELECT id, customer_id, vendor_id, visit_date, visit_time, accepted, note, created_at FROM visit_request";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<VisitRequest>> {
    let sql = format!("{} WHERE id = ?", VISIT_SELECT);
    let row = sqlx::query_as::<_, VisitRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    vendor_id: i64,
    visit_date: &str,
    visit_time: &str,
    note: Option<&str>,
) -> RepoResult<VisitRequest> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO visit_request (id, customer_id, vendor_id, visit_date, visit_time, accepted, note, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(vendor_id)
    .bind(visit_date)
    .bind(visit_time)
    .bind(note)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create visit request".into()))
}

/// Flip `accepted` to true. Idempotent: updating an already-accepted row is
/// a no-op that still succeeds.
pub async fn accept(pool: &SqlitePool, id: i64) -> RepoResult<VisitRequest> {
    sqlx::query("UPDATE visit_request SET accepted = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Visit request {id} not found")))
}

pub async fn find_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<VisitWithVendor>> {
    let rows = sqlx::query_as::<_, VisitWithVendor>(
        "SELECT vr.id, vr.customer_id, vr.vendor_id, v.name AS vendor_name, v.kind AS vendor_kind, vr.visit_date, vr.visit_time, vr.accepted, vr.created_at \
         FROM visit_request vr JOIN vendor v ON vr.vendor_id = v.id \
         WHERE vr.customer_id = ? ORDER BY vr.visit_date DESC, vr.visit_time DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> RepoResult<Vec<VisitWithCustomer>> {
    let rows = sqlx::query_as::<_, VisitWithCustomer>(
        "SELECT vr.id, vr.customer_id, a.display_name AS customer_name, vr.vendor_id, vr.visit_date, vr.visit_time, vr.accepted, vr.note, vr.created_at \
         FROM visit_request vr JOIN account a ON vr.customer_id = a.id \
         WHERE vr.vendor_id = ? ORDER BY vr.visit_date DESC, vr.visit_time DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
