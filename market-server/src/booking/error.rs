//! Booking domain errors

use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors produced by the booking domain engines
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0} is required")]
    RequiredField(&'static str),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {0} is in the past")]
    DateInPast(String),

    #[error("Date {event_date} is already booked for vendor {vendor_id}")]
    DateAlreadyBooked { vendor_id: i64, event_date: String },

    #[error("Vendor {0} not found")]
    VendorNotFound(i64),

    #[error("Vendor {0} is not accepting bookings")]
    VendorNotAccepting(i64),

    #[error("Booking {0} not found")]
    BookingNotFound(i64),

    #[error("Booking {0} has already been cancelled")]
    BookingAlreadyCancelled(i64),

    #[error("Visit request {0} not found")]
    VisitNotFound(i64),

    #[error("No confirmed booking between customer {customer_id} and vendor {vendor_id}")]
    NotEligibleToRate { customer_id: i64, vendor_id: i64 },

    #[error("Star rating {0} is outside 1..=5")]
    InvalidStarValue(u8),

    #[error("No confirmed booking between customer {customer_id} and vendor {vendor_id}")]
    NotEligibleToComment { customer_id: i64, vendor_id: i64 },

    #[error("Comment body must not be empty")]
    CommentEmpty,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
