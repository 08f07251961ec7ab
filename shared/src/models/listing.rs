//! Listing Model

use serde::{Deserialize, Serialize};

/// Listing entity (a bookable package/SKU owned by a vendor)
///
/// `capacity` is only meaningful for hall vendors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Listing {
    pub id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create listing payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub capacity: Option<i64>,
    pub image_url: Option<String>,
}

/// Update listing payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Catalog filter for listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub vendor_id: Option<i64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub capacity_min: Option<i64>,
    pub capacity_max: Option<i64>,
}
