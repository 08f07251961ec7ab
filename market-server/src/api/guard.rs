//! Handler-level ownership guards

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::vendor;
use crate::utils::AppError;
use shared::models::Vendor;

/// The current user's own vendor profile.
///
/// Owner dashboards and vendor mutations resolve the target vendor from the
/// authenticated account, never from a client-supplied id.
pub async fn owned_vendor(pool: &SqlitePool, user: &CurrentUser) -> Result<Vendor, AppError> {
    vendor::find_by_owner(pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor profile"))
}

/// Load a vendor and verify the current user owns it
pub async fn require_vendor_owner(
    pool: &SqlitePool,
    user: &CurrentUser,
    vendor_id: i64,
) -> Result<Vendor, AppError> {
    let v = vendor::find_by_id(pool, vendor_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vendor {vendor_id}")))?;
    if v.owner_id != user.id && !user.is_admin() {
        return Err(AppError::new(crate::utils::ErrorCode::NotResourceOwner));
    }
    Ok(v)
}
