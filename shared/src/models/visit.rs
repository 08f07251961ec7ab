//! Visit Request Model

use serde::{Deserialize, Serialize};

/// Visit request entity (pre-booking viewing appointment)
///
/// `accepted` is a one-way false→true flip; there is no reject state and no
/// un-accept once accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VisitRequest {
    pub id: i64,
    pub customer_id: i64,
    pub vendor_id: i64,
    /// Visit date, `YYYY-MM-DD`
    pub visit_date: String,
    /// Visit time, `HH:MM`
    pub visit_time: String,
    pub accepted: bool,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Submit visit request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRequestCreate {
    pub vendor_id: i64,
    pub visit_date: String,
    pub visit_time: String,
    pub note: Option<String>,
}

/// Visit request joined with customer info (owner dashboard view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VisitWithCustomer {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub vendor_id: i64,
    pub visit_date: String,
    pub visit_time: String,
    pub accepted: bool,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Visit request joined with vendor info (customer "my visits" view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VisitWithVendor {
    pub id: i64,
    pub customer_id: i64,
    pub vendor_id: i64,
    pub vendor_name: String,
    pub vendor_kind: String,
    pub visit_date: String,
    pub visit_time: String,
    pub accepted: bool,
    pub created_at: i64,
}
