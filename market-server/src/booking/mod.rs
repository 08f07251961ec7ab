//! Booking Domain Module
//!
//! The correctness-sensitive core of the marketplace:
//!
//! - **engine**: [`BookingEngine`] for date availability and confirmed
//!   reservations; the (vendor, date) pair is enforced unique at the
//!   database so concurrent bookings race at the INSERT and exactly one wins
//! - **visits**: [`VisitScheduler`] for pre-booking viewing appointments
//!   with a one-way accept flip
//! - **rating**: [`RatingAggregator`] maintains the incremental running mean
//!   per vendor, gated by a confirmed reservation
//! - **comments**: [`CommentLedger`] appends comments per vendor, gated the
//!   same way as ratings
//!
//! # Data Flow
//!
//! ```text
//! HTTP handler → engine (validation + eligibility) → repository → SQLite
//! ```
//!
//! Engines own a pool handle and are cheap to clone per request.

pub mod comments;
pub mod engine;
pub mod error;
pub mod rating;
pub mod visits;

// Re-exports
pub use comments::CommentLedger;
pub use engine::BookingEngine;
pub use error::BookingError;
pub use rating::{RatingAggregator, incremental_mean};
pub use visits::VisitScheduler;

#[cfg(test)]
pub(crate) mod test_util {
    use sqlx::SqlitePool;

    use crate::db::DbService;
    use crate::db::repository::{account, vendor};
    use shared::models::{AccountCreate, Role, Vendor, VendorCreate, VendorKind};

    /// In-memory pool with migrations applied
    pub async fn test_pool() -> SqlitePool {
        DbService::open_in_memory()
            .await
            .expect("failed to open in-memory database")
            .pool
    }

    /// Date `days` days from today, formatted `YYYY-MM-DD`
    pub fn future_date(days: i64) -> String {
        (chrono::Local::now() + chrono::Duration::days(days))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string()
    }

    pub async fn seed_customer(pool: &SqlitePool, username: &str) -> i64 {
        let acc = account::create(
            pool,
            AccountCreate {
                username: username.to_string(),
                display_name: username.to_string(),
                hash_pass: "not-a-real-hash".to_string(),
                role: Role::Customer,
            },
        )
        .await
        .expect("failed to seed customer");
        acc.id
    }

    /// Seed an owner account plus their vendor profile, returns the vendor
    pub async fn seed_vendor(pool: &SqlitePool, username: &str, kind: VendorKind) -> Vendor {
        let owner = account::create(
            pool,
            AccountCreate {
                username: username.to_string(),
                display_name: username.to_string(),
                hash_pass: "not-a-real-hash".to_string(),
                role: Role::Owner,
            },
        )
        .await
        .expect("failed to seed owner");

        vendor::create(
            pool,
            owner.id,
            VendorCreate {
                kind,
                name: format!("{username} studio"),
                city: "Amman".to_string(),
                description: None,
                phone: None,
                image_url: None,
            },
        )
        .await
        .expect("failed to seed vendor")
    }
}
