//! Compatibility HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::application::CompatibilityService;
use crate::interfaces::http::common::params::parse_id_list;
use crate::interfaces::http::common::{ApiResponse, ApiResult};

use super::dto::*;

#[derive(Clone)]
pub struct CompatibilityAppState {
    pub service: Arc<CompatibilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/staff/eligible",
    tag = "Compatibility",
    params(("place_id" = i32, Path, description = "Place ID"), EligibleStaffParams),
    responses(
        (status = 200, description = "Staff able to perform every listed service", body = ApiResponse<Vec<StaffDto>>),
        (status = 404, description = "Place not found")
    )
)]
pub async fn eligible_staff(
    State(state): State<CompatibilityAppState>,
    Path(place_id): Path<i32>,
    Query(params): Query<EligibleStaffParams>,
) -> ApiResult<Vec<StaffDto>> {
    let service_ids = match params.service_ids.as_deref() {
        Some(raw) => parse_id_list(raw)?,
        None => Vec::new(),
    };
    let staff = state.service.staff_eligible_for(place_id, &service_ids).await?;
    Ok(Json(ApiResponse::success(
        staff.into_iter().map(StaffDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/staff/{staff_id}/services",
    tag = "Compatibility",
    params(("staff_id" = i32, Path, description = "Staff member ID")),
    responses(
        (status = 200, description = "Active services the staff member performs", body = ApiResponse<Vec<ServiceDto>>),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn staff_services(
    State(state): State<CompatibilityAppState>,
    Path(staff_id): Path<i32>,
) -> ApiResult<Vec<ServiceDto>> {
    let services = state.service.services_performable_by(staff_id).await?;
    Ok(Json(ApiResponse::success(
        services.into_iter().map(ServiceDto::from).collect(),
    )))
}
