//! RatingAggregator - incremental running mean per vendor
//!
//! No per-vote history is kept: the mean is folded in place and is lossy by
//! design (an "undo rating" feature is structurally impossible without a
//! separate history table).

use sqlx::SqlitePool;

use super::engine::visible_vendor;
use super::error::BookingError;
use crate::db::repository::{reservation, vendor};
use shared::models::Vendor;

/// Incremental mean update rule.
///
/// `new_rate = (old_rate * old_count + stars) / (old_count + 1)`.
/// With old_count = 0 this yields stars exactly.
pub fn incremental_mean(old_rate: f64, old_count: i64, stars: u8) -> (f64, i64) {
    let new_count = old_count + 1;
    let new_rate = (old_rate * old_count as f64 + stars as f64) / new_count as f64;
    (new_rate, new_count)
}

/// Star-vote aggregation for one shared pool
#[derive(Clone)]
pub struct RatingAggregator {
    pool: SqlitePool,
}

impl RatingAggregator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit a star vote for a vendor.
    ///
    /// The caller must have at least one confirmed reservation with the
    /// vendor. The eligibility check is read-before-write (racy but
    /// low-stakes); the mean update itself is a single UPDATE.
    pub async fn submit(
        &self,
        customer_id: i64,
        vendor_id: i64,
        stars: u8,
    ) -> Result<Vendor, BookingError> {
        if !(1..=5).contains(&stars) {
            return Err(BookingError::InvalidStarValue(stars));
        }

        visible_vendor(&self.pool, vendor_id).await?;

        if !reservation::has_confirmed(&self.pool, customer_id, vendor_id).await? {
            return Err(BookingError::NotEligibleToRate {
                customer_id,
                vendor_id,
            });
        }

        let updated = vendor::apply_rating(&self.pool, vendor_id, stars).await?;
        tracing::info!(
            vendor_id,
            customer_id,
            stars,
            rate = updated.rate,
            rating_count = updated.rating_count,
            "Rating submitted"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingEngine;
    use crate::booking::test_util::{future_date, seed_customer, seed_vendor, test_pool};
    use shared::models::{BookingRequest, VendorKind};

    async fn confirmed_booking(pool: &SqlitePool, customer: i64, vendor_id: i64, days: i64) {
        BookingEngine::new(pool.clone())
            .book(
                customer,
                BookingRequest {
                    vendor_id,
                    event_date: future_date(days),
                    contact_phone: "0790000000".to_string(),
                    note: None,
                    price: None,
                },
            )
            .await
            .unwrap();
    }

    #[test]
    fn test_incremental_mean_formula() {
        // First vote sets the mean exactly
        assert_eq!(incremental_mean(0.0, 0, 4), (4.0, 1));
        // (4.0 * 3 + 5) / 4 = 4.25
        assert_eq!(incremental_mean(4.0, 3, 5), (4.25, 4));
    }

    #[tokio::test]
    async fn test_eligibility_gate() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "dj-nour", VendorKind::Dj).await;
        let aggregator = RatingAggregator::new(pool.clone());

        // No confirmed booking yet
        let err = aggregator.submit(customer, v.id, 5).await.unwrap_err();
        assert!(matches!(err, BookingError::NotEligibleToRate { .. }));

        // One confirmed booking unlocks rating
        confirmed_booking(&pool, customer, v.id, 10).await;
        let updated = aggregator.submit(customer, v.id, 5).await.unwrap();
        assert_eq!(updated.rate, 5.0);
        assert_eq!(updated.rating_count, 1);
    }

    #[tokio::test]
    async fn test_invalid_star_values() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "dj-nour", VendorKind::Dj).await;
        let aggregator = RatingAggregator::new(pool.clone());

        for stars in [0u8, 6, 250] {
            let err = aggregator.submit(customer, v.id, stars).await.unwrap_err();
            assert!(matches!(err, BookingError::InvalidStarValue(s) if s == stars));
        }
    }

    #[tokio::test]
    async fn test_formula_exactness_through_storage() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "dj-nour", VendorKind::Dj).await;
        let aggregator = RatingAggregator::new(pool.clone());
        confirmed_booking(&pool, customer, v.id, 10).await;

        // Three 4-star votes, then one 5-star: (4.0*3+5)/4 = 4.25
        for _ in 0..3 {
            aggregator.submit(customer, v.id, 4).await.unwrap();
        }
        let updated = aggregator.submit(customer, v.id, 5).await.unwrap();
        assert_eq!(updated.rate, 4.25);
        assert_eq!(updated.rating_count, 4);
    }

    #[tokio::test]
    async fn test_rating_monotonicity() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "dj-nour", VendorKind::Dj).await;
        let aggregator = RatingAggregator::new(pool.clone());
        confirmed_booking(&pool, customer, v.id, 10).await;

        let votes = [5u8, 1, 3, 4, 2, 5, 5, 1, 3, 4];
        let mut expected_rate = 0.0;
        let mut expected_count = 0i64;

        for (i, stars) in votes.into_iter().enumerate() {
            let updated = aggregator.submit(customer, v.id, stars).await.unwrap();
            (expected_rate, expected_count) =
                incremental_mean(expected_rate, expected_count, stars);

            // Count increases by exactly 1 per accepted vote
            assert_eq!(updated.rating_count, (i + 1) as i64);
            assert_eq!(updated.rating_count, expected_count);
            // The stored mean tracks the reference formula and stays in range
            assert!((updated.rate - expected_rate).abs() < 1e-9);
            assert!((1.0..=5.0).contains(&updated.rate));
        }
    }
}
