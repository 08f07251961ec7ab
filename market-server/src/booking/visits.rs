//! VisitScheduler - pre-booking viewing appointments
//!
//! A visit request starts with `accepted = false` and the owner may flip it
//! to true. The flip is one-way and idempotent; there is no reject or
//! un-accept transition. Overlapping visit slots are not checked; multiple
//! visits can be accepted for the same date/time.

use sqlx::SqlitePool;

use super::engine::{parse_future_date, visible_vendor};
use super::error::BookingError;
use crate::db::repository::{vendor, visit};
use shared::models::{VisitRequest, VisitRequestCreate};

/// Visit request lifecycle for one shared pool
#[derive(Clone)]
pub struct VisitScheduler {
    pool: SqlitePool,
}

impl VisitScheduler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit a visit request. Always starts unaccepted.
    pub async fn submit(
        &self,
        customer_id: i64,
        req: VisitRequestCreate,
    ) -> Result<VisitRequest, BookingError> {
        if req.visit_date.trim().is_empty() {
            return Err(BookingError::RequiredField("visit_date"));
        }
        if req.visit_time.trim().is_empty() {
            return Err(BookingError::RequiredField("visit_time"));
        }
        parse_future_date(&req.visit_date)?;
        visible_vendor(&self.pool, req.vendor_id).await?;

        let created = visit::create(
            &self.pool,
            customer_id,
            req.vendor_id,
            &req.visit_date,
            &req.visit_time,
            req.note.as_deref(),
        )
        .await?;
        tracing::info!(
            visit_id = created.id,
            vendor_id = created.vendor_id,
            customer_id,
            visit_date = %created.visit_date,
            visit_time = %created.visit_time,
            "Visit request submitted"
        );
        Ok(created)
    }

    /// Accept a visit request. Owner-only, one-way, idempotent.
    pub async fn accept(&self, visit_id: i64, actor_id: i64) -> Result<VisitRequest, BookingError> {
        let v = visit::find_by_id(&self.pool, visit_id)
            .await?
            .ok_or(BookingError::VisitNotFound(visit_id))?;

        let owner = vendor::find_by_id(&self.pool, v.vendor_id)
            .await?
            .ok_or(BookingError::VendorNotFound(v.vendor_id))?;
        if owner.owner_id != actor_id {
            return Err(BookingError::Forbidden(
                "Only the vendor owner can accept visit requests".to_string(),
            ));
        }

        let updated = visit::accept(&self.pool, visit_id).await?;
        tracing::info!(visit_id, actor_id, "Visit request accepted");
        Ok(updated)
    }
}
