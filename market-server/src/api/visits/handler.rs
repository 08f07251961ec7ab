//! Visit Request API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::api::guard::owned_vendor;
use crate::auth::CurrentUser;
use crate::booking::VisitScheduler;
use crate::core::ServerState;
use crate::db::repository::visit;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::models::{VisitRequest, VisitRequestCreate, VisitWithCustomer, VisitWithVendor};

/// POST /api/visits - 提交参观预约（初始未接受）
pub async fn submit(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<VisitRequestCreate>,
) -> AppResult<Json<VisitRequest>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let scheduler = VisitScheduler::new(state.pool.clone());
    let created = scheduler.submit(current_user.id, payload).await?;
    Ok(Json(created))
}

/// POST /api/visits/:id/accept - 商家接受参观预约（单向、幂等）
pub async fn accept(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<VisitRequest>> {
    let scheduler = VisitScheduler::new(state.pool.clone());
    let accepted = scheduler.accept(id, current_user.id).await?;
    Ok(Json(accepted))
}

/// GET /api/visits/my - 当前客户的参观预约列表
pub async fn my_visits(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<VisitWithVendor>>> {
    let visits = visit::find_by_customer(&state.pool, current_user.id).await?;
    Ok(Json(visits))
}

/// GET /api/visits/vendor - 当前商家店铺的参观预约列表
pub async fn vendor_visits(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<VisitWithCustomer>>> {
    let v = owned_vendor(&state.pool, &current_user).await?;
    let visits = visit::find_by_vendor(&state.pool, v.id).await?;
    Ok(Json(visits))
}
