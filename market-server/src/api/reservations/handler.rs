//! Reservation API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::guard::owned_vendor;
use crate::auth::CurrentUser;
use crate::booking::BookingEngine;
use crate::core::ServerState;
use crate::db::repository::reservation;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use shared::models::{
    BookingRequest, Reservation, ReservationWithCustomer, ReservationWithVendor,
};

/// Availability query parameters
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub vendor_id: i64,
    pub date: String,
}

/// Availability response
#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub vendor_id: i64,
    pub date: String,
    pub available: bool,
}

/// GET /api/reservations/availability?vendor_id=&date= - 单日档期查询
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let engine = BookingEngine::new(state.pool.clone());
    let available = engine
        .is_date_available(query.vendor_id, &query.date)
        .await?;
    Ok(Json(AvailabilityResponse {
        vendor_id: query.vendor_id,
        date: query.date,
        available,
    }))
}

/// Booked-dates query parameters
#[derive(Deserialize)]
pub struct BookedDatesQuery {
    pub vendor_id: i64,
}

/// GET /api/reservations/booked-dates?vendor_id= - 已订日期列表（日历封锁）
pub async fn booked_dates(
    State(state): State<ServerState>,
    Query(query): Query<BookedDatesQuery>,
) -> AppResult<Json<Vec<String>>> {
    let engine = BookingEngine::new(state.pool.clone());
    let dates = engine.booked_dates(query.vendor_id).await?;
    Ok(Json(dates))
}

/// POST /api/reservations - 预订日期（直接写入已确认状态）
pub async fn book(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BookingRequest>,
) -> AppResult<Json<Reservation>> {
    validate_required_text(&payload.contact_phone, "contact_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let engine = BookingEngine::new(state.pool.clone());
    let created = engine.book(current_user.id, payload).await?;
    Ok(Json(created))
}

/// GET /api/reservations/my - 当前客户的预订列表
pub async fn my_bookings(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ReservationWithVendor>>> {
    let bookings = reservation::find_by_customer(&state.pool, current_user.id).await?;
    Ok(Json(bookings))
}

/// GET /api/reservations/vendor - 当前商家店铺的预订列表
pub async fn vendor_bookings(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ReservationWithCustomer>>> {
    let v = owned_vendor(&state.pool, &current_user).await?;
    let bookings = reservation::find_by_vendor(&state.pool, v.id).await?;
    Ok(Json(bookings))
}

/// POST /api/reservations/:id/cancel - 取消预订（客户本人或店铺商家）
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let engine = BookingEngine::new(state.pool.clone());
    let cancelled = engine.cancel(id, current_user.id).await?;
    Ok(Json(cancelled))
}
