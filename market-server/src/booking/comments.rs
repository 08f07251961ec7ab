//! CommentLedger - append-only comments per vendor
//!
//! Posting requires a confirmed booking with the vendor, the same gate as
//! rating. Comments have no edit or delete path.

use sqlx::SqlitePool;

use super::engine::visible_vendor;
use super::error::BookingError;
use crate::db::repository::{comment, reservation};
use shared::models::{Comment, CommentWithAuthor};

/// Comment append/list for one shared pool
#[derive(Clone)]
pub struct CommentLedger {
    pool: SqlitePool,
}

impl CommentLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a comment with a server-assigned timestamp
    pub async fn post(
        &self,
        author_id: i64,
        vendor_id: i64,
        body: &str,
    ) -> Result<Comment, BookingError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(BookingError::CommentEmpty);
        }

        visible_vendor(&self.pool, vendor_id).await?;

        if !reservation::has_confirmed(&self.pool, author_id, vendor_id).await? {
            return Err(BookingError::NotEligibleToComment {
                customer_id: author_id,
                vendor_id,
            });
        }

        let created = comment::create(&self.pool, vendor_id, author_id, body).await?;
        tracing::info!(
            comment_id = created.id,
            vendor_id,
            author_id,
            "Comment posted"
        );
        Ok(created)
    }

    /// All comments for a vendor, newest first
    pub async fn list(&self, vendor_id: i64) -> Result<Vec<CommentWithAuthor>, BookingError> {
        visible_vendor(&self.pool, vendor_id).await?;
        Ok(comment::find_by_vendor(&self.pool, vendor_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingEngine;
    use crate::booking::test_util::{future_date, seed_customer, seed_vendor, test_pool};
    use shared::models::{BookingRequest, VendorKind};

    async fn confirmed_booking(pool: &SqlitePool, customer: i64, vendor_id: i64) {
        BookingEngine::new(pool.clone())
            .book(
                customer,
                BookingRequest {
                    vendor_id,
                    event_date: future_date(21),
                    contact_phone: "0790000000".to_string(),
                    note: None,
                    price: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_post_requires_confirmed_booking() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "petals", VendorKind::Decoration).await;
        let ledger = CommentLedger::new(pool.clone());

        let err = ledger.post(customer, v.id, "lovely work").await.unwrap_err();
        assert!(matches!(err, BookingError::NotEligibleToComment { .. }));

        confirmed_booking(&pool, customer, v.id).await;
        let c = ledger.post(customer, v.id, "lovely work").await.unwrap();
        assert_eq!(c.body, "lovely work");
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "petals", VendorKind::Decoration).await;
        let ledger = CommentLedger::new(pool.clone());

        let err = ledger.post(customer, v.id, "   ").await.unwrap_err();
        assert!(matches!(err, BookingError::CommentEmpty));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "petals", VendorKind::Decoration).await;
        let ledger = CommentLedger::new(pool.clone());
        confirmed_booking(&pool, customer, v.id).await;

        for body in ["first", "second", "third"] {
            ledger.post(customer, v.id, body).await.unwrap();
            // Distinct created_at timestamps (millisecond precision)
            tokio::time::sleep(std::time::Duration::from_millis(3)).await;
        }

        let all = ledger.list(v.id).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].body, "third");
        assert_eq!(all[2].body, "first");
        assert_eq!(all[0].author_name, "aya");
    }
}
