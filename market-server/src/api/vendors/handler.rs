//! Vendor API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::guard::owned_vendor;
use crate::auth::CurrentUser;
use crate::booking::{CommentLedger, RatingAggregator};
use crate::core::ServerState;
use crate::db::repository::{RepoError, listing, vendor};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CommentCreate, CommentWithAuthor, Listing, Vendor, VendorCreate, VendorQuery, VendorUpdate,
};

/// GET /api/vendors - 目录检索（类型/城市/价格带/容量带过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<VendorQuery>,
) -> AppResult<Json<Vec<Vendor>>> {
    let vendors = vendor::search(&state.pool, &query).await?;
    Ok(Json(vendors))
}

/// Vendor detail response (profile + active listings)
#[derive(Serialize)]
pub struct VendorDetail {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub listings: Vec<Listing>,
}

/// GET /api/vendors/:id - 供应商详情（含套餐）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VendorDetail>> {
    let v = vendor::find_by_id(&state.pool, id)
        .await?
        .filter(|v| v.is_visible)
        .ok_or_else(|| AppError::with_message(ErrorCode::VendorNotFound, format!("Vendor {id} not found")))?;

    let listings = listing::find_by_vendor(&state.pool, id).await?;

    Ok(Json(VendorDetail {
        vendor: v,
        listings,
    }))
}

fn validate_profile_text(
    name: Option<&String>,
    city: Option<&String>,
    description: &Option<String>,
    phone: &Option<String>,
) -> Result<(), AppError> {
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(city) = city {
        validate_required_text(city, "city", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// POST /api/vendors - 创建店铺资料（每个账号最多一个）
pub async fn create_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<VendorCreate>,
) -> AppResult<Json<Vendor>> {
    validate_profile_text(
        Some(&payload.name),
        Some(&payload.city),
        &payload.description,
        &payload.phone,
    )?;

    let created = vendor::create(&state.pool, current_user.id, payload).await;
    match created {
        Ok(v) => {
            tracing::info!(vendor_id = v.id, owner_id = current_user.id, "Vendor profile created");
            Ok(Json(v))
        }
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::VendorProfileExists)),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/vendors/my - 当前商家的店铺资料
pub async fn my_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vendor>> {
    let v = owned_vendor(&state.pool, &current_user).await?;
    Ok(Json(v))
}

/// PUT /api/vendors/my - 更新店铺资料
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<VendorUpdate>,
) -> AppResult<Json<Vendor>> {
    validate_profile_text(
        payload.name.as_ref(),
        payload.city.as_ref(),
        &payload.description,
        &payload.phone,
    )?;

    let v = owned_vendor(&state.pool, &current_user).await?;
    let updated = vendor::update(&state.pool, v.id, payload).await?;
    Ok(Json(updated))
}

/// Rating submission payload
#[derive(Deserialize)]
pub struct RatingPayload {
    pub stars: u8,
}

/// Rating response (updated aggregate)
#[derive(Serialize)]
pub struct RatingResponse {
    pub vendor_id: i64,
    pub rate: f64,
    pub rating_count: i64,
}

/// POST /api/vendors/:id/ratings - 提交评分（需有已确认预订）
pub async fn submit_rating(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<RatingPayload>,
) -> AppResult<Json<RatingResponse>> {
    let aggregator = RatingAggregator::new(state.pool.clone());
    let updated = aggregator
        .submit(current_user.id, id, payload.stars)
        .await?;

    Ok(Json(RatingResponse {
        vendor_id: updated.id,
        rate: updated.rate,
        rating_count: updated.rating_count,
    }))
}

/// GET /api/vendors/:id/comments - 评论列表（最新在前）
pub async fn list_comments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CommentWithAuthor>>> {
    let ledger = CommentLedger::new(state.pool.clone());
    let comments = ledger.list(id).await?;
    Ok(Json(comments))
}

/// POST /api/vendors/:id/comments - 发表评论（需有已确认预订）
pub async fn post_comment(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<shared::models::Comment>> {
    let ledger = CommentLedger::new(state.pool.clone());
    let comment = ledger.post(current_user.id, id, &payload.body).await?;
    Ok(Json(comment))
}
