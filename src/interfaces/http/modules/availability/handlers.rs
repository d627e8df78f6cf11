//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::application::{AvailabilityQuery, AvailabilityService};
use crate::interfaces::http::common::params::{parse_date, parse_id_list, parse_window};
use crate::interfaces::http::common::{ApiResponse, ApiResult};

use super::dto::*;

#[derive(Clone)]
pub struct AvailabilityAppState {
    pub service: Arc<AvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/availability",
    tag = "Availability",
    params(("place_id" = i32, Path, description = "Place ID"), AvailabilityParams),
    responses(
        (status = 200, description = "Candidate slots of the day", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Malformed query"),
        (status = 404, description = "Unknown place, service or staff member"),
        (status = 422, description = "Staff member cannot perform the services")
    )
)]
pub async fn get_availability(
    State(state): State<AvailabilityAppState>,
    Path(place_id): Path<i32>,
    Query(params): Query<AvailabilityParams>,
) -> ApiResult<AvailabilityDto> {
    let date = parse_date(&params.date)?;
    let service_ids = parse_id_list(&params.service_ids)?;
    let window = parse_window(params.from.as_deref(), params.to.as_deref())?;

    let mut query = AvailabilityQuery::new(place_id, date, service_ids);
    if let Some(staff_id) = params.staff_id {
        query = query.with_staff(staff_id);
    }

    let report = match window {
        Some(window) => state.service.compute_availability_within(&query, window).await?,
        None => state.service.compute_availability(&query).await?,
    };
    Ok(Json(ApiResponse::success(report.into())))
}
