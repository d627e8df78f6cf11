//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::application::BookingService;
use crate::domain::BookingStatus;
use crate::interfaces::http::common::params::parse_date;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking committed", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid request, off-grid start or bad duration"),
        (status = 404, description = "Unknown place, service or staff member"),
        (status = 409, description = "Slot taken or staff unavailable"),
        (status = 422, description = "Place closed or no eligible staff")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<BookingDto> {
    let request = request.into_domain()?;
    let booking = state.service.commit_booking(request).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i64>,
) -> ApiResult<BookingDto> {
    let booking = state.service.find_booking(booking_id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{booking_id}/status",
    tag = "Bookings",
    params(("booking_id" = i64, Path, description = "Booking ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated booking", body = ApiResponse<BookingDto>),
        (status = 400, description = "Unknown status or transition not allowed"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking_status(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<BookingDto> {
    let status: BookingStatus = request.status.parse()?;
    let booking = state.service.update_status(booking_id, status).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    params(("booking_id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Cancelled booking", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking already completed"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i64>,
) -> ApiResult<BookingDto> {
    let booking = state.service.cancel(booking_id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/bookings",
    tag = "Bookings",
    params(("place_id" = i32, Path, description = "Place ID"), BookingsOnParams),
    responses(
        (status = 200, description = "Bookings of the day ordered by start", body = ApiResponse<Vec<BookingDto>>),
        (status = 404, description = "Place not found")
    )
)]
pub async fn list_place_bookings(
    State(state): State<BookingAppState>,
    Path(place_id): Path<i32>,
    Query(params): Query<BookingsOnParams>,
) -> ApiResult<Vec<BookingDto>> {
    let date = parse_date(&params.date)?;
    let bookings = state.service.bookings_on(place_id, date).await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}
