//! Reservation Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{BookingStatus, Reservation, ReservationWithCustomer, ReservationWithVendor};

const RESERVATION_SELECT: &str = "SELECT id, customer_id, vendor_id, event_date, price, status, contact_phone, note, created_at, updated_at FROM reservation";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{} WHERE id = ?", RESERVATION_SELECT);
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a confirmed reservation.
///
/// The partial unique index on (vendor_id, event_date) rejects a second
/// confirmed row for the same date; the violation surfaces as
/// [`RepoError::Duplicate`].
pub async fn create_confirmed(
    pool: &SqlitePool,
    customer_id: i64,
    vendor_id: i64,
    event_date: &str,
    price: f64,
    contact_phone: &str,
    note: Option<&str>,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO reservation (id, customer_id, vendor_id, event_date, price, status, contact_phone, note, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(vendor_id)
    .bind(event_date)
    .bind(price)
    .bind(BookingStatus::Confirmed.as_str())
    .bind(contact_phone)
    .bind(note)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Does a confirmed reservation exist for (vendor, date)?
pub async fn exists_confirmed_on(
    pool: &SqlitePool,
    vendor_id: i64,
    event_date: &str,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE vendor_id = ? AND event_date = ? AND status = 'confirmed'",
    )
    .bind(vendor_id)
    .bind(event_date)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// All confirmed event dates for a vendor (calendar blocking)
pub async fn confirmed_dates(pool: &SqlitePool, vendor_id: i64) -> RepoResult<Vec<String>> {
    let dates: Vec<String> = sqlx::query_scalar(
        "SELECT event_date FROM reservation WHERE vendor_id = ? AND status = 'confirmed' ORDER BY event_date",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(dates)
}

/// Does the customer have at least one confirmed reservation with the vendor?
/// Gates rating and commenting eligibility.
pub async fn has_confirmed(pool: &SqlitePool, customer_id: i64, vendor_id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE customer_id = ? AND vendor_id = ? AND status = 'confirmed'",
    )
    .bind(customer_id)
    .bind(vendor_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn find_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<ReservationWithVendor>> {
    let rows = sqlx::query_as::<_, ReservationWithVendor>(
        "SELECT r.id, r.customer_id, r.vendor_id, v.name AS vendor_name, v.kind AS vendor_kind, r.event_date, r.price, r.status, r.contact_phone, r.note, r.created_at \
         FROM reservation r JOIN vendor v ON r.vendor_id = v.id \
         WHERE r.customer_id = ? ORDER BY r.event_date DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> RepoResult<Vec<ReservationWithCustomer>> {
    let rows = sqlx::query_as::<_, ReservationWithCustomer>(
        "SELECT r.id, r.customer_id, a.display_name AS customer_name, r.vendor_id, r.event_date, r.price, r.status, r.contact_phone, r.note, r.created_at \
         FROM reservation r JOIN account a ON r.customer_id = a.id \
         WHERE r.vendor_id = ? ORDER BY r.event_date DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Set a reservation's status. Returns the updated row.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: BookingStatus,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE reservation SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}
