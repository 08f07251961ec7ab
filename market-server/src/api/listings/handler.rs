//! Listing API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};

use crate::api::guard::{owned_vendor, require_vendor_owner};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::listing;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Listing, ListingCreate, ListingQuery, ListingUpdate};

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::new(ErrorCode::ListingInvalidPrice));
    }
    Ok(())
}

/// GET /api/listings - 套餐检索（供应商/价格带/容量带过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListingQuery>,
) -> AppResult<Json<Vec<Listing>>> {
    let listings = listing::search(&state.pool, &query).await?;
    Ok(Json(listings))
}

/// GET /api/listings/:id - 获取单个套餐
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Listing>> {
    let l = listing::find_by_id(&state.pool, id)
        .await?
        .filter(|l| l.is_active)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ListingNotFound, format!("Listing {id} not found"))
        })?;
    Ok(Json(l))
}

/// POST /api/listings - 创建套餐（挂在当前商家的店铺下）
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ListingCreate>,
) -> AppResult<Json<Listing>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_price(payload.price)?;

    let v = owned_vendor(&state.pool, &current_user).await?;
    let created = listing::create(&state.pool, v.id, payload).await?;

    tracing::info!(
        listing_id = created.id,
        vendor_id = v.id,
        "Listing created"
    );
    Ok(Json(created))
}

/// PUT /api/listings/:id - 更新套餐
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<ListingUpdate>,
) -> AppResult<Json<Listing>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    let existing = listing::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ListingNotFound, format!("Listing {id} not found"))
    })?;
    require_vendor_owner(&state.pool, &current_user, existing.vendor_id).await?;

    let updated = listing::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/listings/:id - 下架套餐 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let existing = listing::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ListingNotFound, format!("Listing {id} not found"))
    })?;
    require_vendor_owner(&state.pool, &current_user, existing.vendor_id).await?;

    let result = listing::delete(&state.pool, id).await?;
    if result {
        tracing::info!(listing_id = id, "Listing deactivated");
    }
    Ok(Json(result))
}
