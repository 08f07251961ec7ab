//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation status
///
/// Bookings are written `confirmed` directly; there is no pending approval
/// step. `cancelled` rows no longer block their date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reservation entity
///
/// A confirmed row is the sole signal of a booked date and the sole gate for
/// rating/commenting eligibility. Confirmed rows are unique per
/// (vendor_id, event_date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub vendor_id: i64,
    /// Event date, `YYYY-MM-DD`
    pub event_date: String,
    pub price: f64,
    pub status: String,
    pub contact_phone: String,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed.as_str()
    }
}

/// Booking request payload
///
/// `price` may be supplied for owner-assisted bookings; otherwise the
/// vendor's cheapest active listing price is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub vendor_id: i64,
    /// Event date, `YYYY-MM-DD`
    pub event_date: String,
    pub contact_phone: String,
    pub note: Option<String>,
    pub price: Option<f64>,
}

/// Reservation joined with vendor info (customer-facing "my bookings" view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithVendor {
    pub id: i64,
    pub customer_id: i64,
    pub vendor_id: i64,
    pub vendor_name: String,
    pub vendor_kind: String,
    pub event_date: String,
    pub price: f64,
    pub status: String,
    pub contact_phone: String,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Reservation joined with customer info (owner dashboard view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithCustomer {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub vendor_id: i64,
    pub event_date: String,
    pub price: f64,
    pub status: String,
    pub contact_phone: String,
    pub note: Option<String>,
    pub created_at: i64,
}
