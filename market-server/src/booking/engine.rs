//! BookingEngine - date availability and confirmed reservations
//!
//! The availability check and the insert are NOT two separate steps here:
//! `book` relies on the partial unique index on (vendor_id, event_date)
//! WHERE status = 'confirmed', so two concurrent bookings for the same date
//! race at the INSERT and exactly one succeeds. The loser gets
//! [`BookingError::DateAlreadyBooked`].

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::error::BookingError;
use crate::db::repository::{RepoError, listing, reservation, vendor};
use shared::models::{BookingRequest, BookingStatus, Reservation, Vendor};

/// Parse a `YYYY-MM-DD` date string
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| BookingError::InvalidDate(s.to_string()))
}

/// Parse a date and reject dates before today (local time)
pub(crate) fn parse_future_date(s: &str) -> Result<NaiveDate, BookingError> {
    let date = parse_date(s)?;
    if date < chrono::Local::now().date_naive() {
        return Err(BookingError::DateInPast(s.to_string()));
    }
    Ok(date)
}

/// Load a vendor that exists and is visible in the catalog
pub(crate) async fn visible_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> Result<Vendor, BookingError> {
    let v = vendor::find_by_id(pool, vendor_id)
        .await?
        .ok_or(BookingError::VendorNotFound(vendor_id))?;
    if !v.is_visible {
        // Hidden vendors are indistinguishable from missing ones
        return Err(BookingError::VendorNotFound(vendor_id));
    }
    Ok(v)
}

/// Availability queries and booking writes for one shared pool
#[derive(Clone)]
pub struct BookingEngine {
    pool: SqlitePool,
}

impl BookingEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Is the date free of confirmed reservations for this vendor?
    pub async fn is_date_available(
        &self,
        vendor_id: i64,
        event_date: &str,
    ) -> Result<bool, BookingError> {
        visible_vendor(&self.pool, vendor_id).await?;
        parse_date(event_date)?;
        let taken = reservation::exists_confirmed_on(&self.pool, vendor_id, event_date).await?;
        Ok(!taken)
    }

    /// All confirmed event dates for a vendor (calendar blocking)
    pub async fn booked_dates(&self, vendor_id: i64) -> Result<Vec<String>, BookingError> {
        visible_vendor(&self.pool, vendor_id).await?;
        Ok(reservation::confirmed_dates(&self.pool, vendor_id).await?)
    }

    /// Book a date for a customer.
    ///
    /// Bookings are written `confirmed` directly; there is no pending
    /// approval step. If no price is supplied, the vendor's cheapest active
    /// listing price is used (0 when the vendor has no listings yet).
    pub async fn book(
        &self,
        customer_id: i64,
        req: BookingRequest,
    ) -> Result<Reservation, BookingError> {
        if req.event_date.trim().is_empty() {
            return Err(BookingError::RequiredField("event_date"));
        }
        if req.contact_phone.trim().is_empty() {
            return Err(BookingError::RequiredField("contact_phone"));
        }
        parse_future_date(&req.event_date)?;

        let v = visible_vendor(&self.pool, req.vendor_id).await?;
        if !v.is_accepting {
            return Err(BookingError::VendorNotAccepting(req.vendor_id));
        }

        let price = match req.price {
            Some(p) => p,
            None => listing::min_price_for_vendor(&self.pool, req.vendor_id)
                .await?
                .unwrap_or(0.0),
        };

        let created = reservation::create_confirmed(
            &self.pool,
            customer_id,
            req.vendor_id,
            &req.event_date,
            price,
            &req.contact_phone,
            req.note.as_deref(),
        )
        .await;

        match created {
            Ok(r) => {
                tracing::info!(
                    booking_id = r.id,
                    vendor_id = r.vendor_id,
                    customer_id,
                    event_date = %r.event_date,
                    "Booking confirmed"
                );
                Ok(r)
            }
            Err(RepoError::Duplicate(_)) => Err(BookingError::DateAlreadyBooked {
                vendor_id: req.vendor_id,
                event_date: req.event_date,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Cancel a booking.
    ///
    /// Allowed for the booking customer or the vendor's owner. Cancelled
    /// rows no longer block their date.
    pub async fn cancel(&self, booking_id: i64, actor_id: i64) -> Result<Reservation, BookingError> {
        let r = reservation::find_by_id(&self.pool, booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound(booking_id))?;

        if !r.is_confirmed() {
            return Err(BookingError::BookingAlreadyCancelled(booking_id));
        }

        let v = vendor::find_by_id(&self.pool, r.vendor_id)
            .await?
            .ok_or(BookingError::VendorNotFound(r.vendor_id))?;

        if actor_id != r.customer_id && actor_id != v.owner_id {
            return Err(BookingError::Forbidden(
                "Only the booking customer or the vendor owner can cancel".to_string(),
            ));
        }

        let updated =
            reservation::set_status(&self.pool, booking_id, BookingStatus::Cancelled).await?;
        tracing::info!(booking_id, actor_id, "Booking cancelled");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::test_util::{future_date, seed_customer, seed_vendor, test_pool};
    use shared::models::VendorKind;

    fn booking_req(vendor_id: i64, event_date: &str) -> BookingRequest {
        BookingRequest {
            vendor_id,
            event_date: event_date.to_string(),
            contact_phone: "0791234567".to_string(),
            note: None,
            price: None,
        }
    }

    #[tokio::test]
    async fn test_book_and_availability() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "grand-hall", VendorKind::Hall).await;
        let engine = BookingEngine::new(pool.clone());

        let d1 = future_date(30);
        let d2 = future_date(31);

        assert!(engine.is_date_available(v.id, &d1).await.unwrap());

        let r = engine.book(customer, booking_req(v.id, &d1)).await.unwrap();
        assert!(r.is_confirmed());
        assert_eq!(r.event_date, d1);

        // The booked date is taken, the next one is still free
        assert!(!engine.is_date_available(v.id, &d1).await.unwrap());
        assert!(engine.is_date_available(v.id, &d2).await.unwrap());

        assert_eq!(engine.booked_dates(v.id).await.unwrap(), vec![d1]);
    }

    #[tokio::test]
    async fn test_double_booking_rejected() {
        let pool = test_pool().await;
        let a = seed_customer(&pool, "aya").await;
        let b = seed_customer(&pool, "lina").await;
        let v = seed_vendor(&pool, "grand-hall", VendorKind::Hall).await;
        let engine = BookingEngine::new(pool.clone());

        let date = future_date(14);
        engine.book(a, booking_req(v.id, &date)).await.unwrap();

        let err = engine.book(b, booking_req(v.id, &date)).await.unwrap_err();
        assert!(matches!(err, BookingError::DateAlreadyBooked { .. }));
    }

    #[tokio::test]
    async fn test_book_validation_errors() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "sweet-cakes", VendorKind::Cake).await;
        let engine = BookingEngine::new(pool.clone());

        // Missing date
        let err = engine
            .book(customer, booking_req(v.id, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::RequiredField("event_date")));

        // Missing contact phone
        let mut req = booking_req(v.id, &future_date(5));
        req.contact_phone = "  ".to_string();
        let err = engine.book(customer, req).await.unwrap_err();
        assert!(matches!(err, BookingError::RequiredField("contact_phone")));

        // Malformed date
        let err = engine
            .book(customer, booking_req(v.id, "06/01/2030"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidDate(_)));

        // Past date
        let err = engine
            .book(customer, booking_req(v.id, "2020-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DateInPast(_)));

        // Unknown vendor
        let err = engine
            .book(customer, booking_req(9999, &future_date(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::VendorNotFound(9999)));
    }

    #[tokio::test]
    async fn test_book_rejected_when_vendor_not_accepting() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "grand-hall", VendorKind::Hall).await;
        let engine = BookingEngine::new(pool.clone());

        crate::db::repository::vendor::update(
            &pool,
            v.id,
            shared::models::VendorUpdate {
                is_accepting: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = engine
            .book(customer, booking_req(v.id, &future_date(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::VendorNotAccepting(_)));
    }

    #[tokio::test]
    async fn test_booking_price_defaults_to_cheapest_listing() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let v = seed_vendor(&pool, "grand-hall", VendorKind::Hall).await;
        let engine = BookingEngine::new(pool.clone());

        for (name, price) in [("Silver", 1200.0), ("Gold", 2400.0)] {
            crate::db::repository::listing::create(
                &pool,
                v.id,
                shared::models::ListingCreate {
                    name: name.to_string(),
                    description: None,
                    price,
                    capacity: Some(200),
                    image_url: None,
                },
            )
            .await
            .unwrap();
        }

        let r = engine
            .book(customer, booking_req(v.id, &future_date(10)))
            .await
            .unwrap();
        assert_eq!(r.price, 1200.0);

        // Explicit price wins
        let mut req = booking_req(v.id, &future_date(11));
        req.price = Some(1800.0);
        let r = engine.book(customer, req).await.unwrap();
        assert_eq!(r.price, 1800.0);
    }

    #[tokio::test]
    async fn test_cancel_frees_the_date() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "aya").await;
        let other = seed_customer(&pool, "lina").await;
        let v = seed_vendor(&pool, "grand-hall", VendorKind::Hall).await;
        let engine = BookingEngine::new(pool.clone());

        let date = future_date(20);
        let r = engine.book(customer, booking_req(v.id, &date)).await.unwrap();

        // A stranger cannot cancel
        let err = engine.cancel(r.id, other).await.unwrap_err();
        assert!(matches!(err, BookingError::Forbidden(_)));

        // The customer can; the date becomes bookable again
        let cancelled = engine.cancel(r.id, customer).await.unwrap();
        assert!(!cancelled.is_confirmed());
        assert!(engine.is_date_available(v.id, &date).await.unwrap());

        // Cancelling twice is an error
        let err = engine.cancel(r.id, customer).await.unwrap_err();
        assert!(matches!(err, BookingError::BookingAlreadyCancelled(_)));

        // And the freed date can be booked by someone else
        engine.book(other, booking_req(v.id, &date)).await.unwrap();
    }
}
