//! Vendor Model

use serde::{Deserialize, Serialize};

/// Vendor service category (婚庆服务类别)
///
/// Stored as lowercase TEXT in the `vendor` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorKind {
    Hall,
    Cake,
    Dj,
    Decoration,
    Photography,
}

impl VendorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorKind::Hall => "hall",
            VendorKind::Cake => "cake",
            VendorKind::Dj => "dj",
            VendorKind::Decoration => "decoration",
            VendorKind::Photography => "photography",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hall" => Some(VendorKind::Hall),
            "cake" => Some(VendorKind::Cake),
            "dj" => Some(VendorKind::Dj),
            "decoration" => Some(VendorKind::Decoration),
            "photography" => Some(VendorKind::Photography),
            _ => None,
        }
    }
}

impl std::fmt::Display for VendorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vendor entity
///
/// `rate` / `rating_count` form a denormalized running mean maintained by
/// the rating aggregator; `rating_count` only ever increases and no per-vote
/// history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Vendor {
    pub id: i64,
    pub owner_id: i64,
    pub kind: String,
    pub name: String,
    pub city: String,
    pub description: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub rate: f64,
    pub rating_count: i64,
    pub is_visible: bool,
    pub is_accepting: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create vendor profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorCreate {
    pub kind: VendorKind,
    pub name: String,
    pub city: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

/// Update vendor profile payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub is_visible: Option<bool>,
    pub is_accepting: Option<bool>,
}

/// Catalog filter for vendor listings
///
/// Price and capacity bands match against the vendor's active listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorQuery {
    pub kind: Option<VendorKind>,
    pub city: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub capacity_min: Option<i64>,
    pub capacity_max: Option<i64>,
}
