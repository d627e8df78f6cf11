//! Mapping of domain failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::ApiResponse;
use crate::shared::errors::{DomainError, ErrorKind};

/// Handler error carrying a [`DomainError`]
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ClosedPeriod | ErrorKind::Ineligibility => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unavailability => StatusCode::CONFLICT,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_expected() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed with internal error");
            "Internal server error".to_string()
        };
        let body = ApiResponse::<()>::error_with_code(self.0.code(), message);
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn status_follows_error_kind() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let cases = [
            (DomainError::not_found("Place", 1), StatusCode::NOT_FOUND),
            (DomainError::ServiceUnknownOrInactive(99), StatusCode::NOT_FOUND),
            (
                DomainError::PlaceClosed { place_id: 1, date },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DomainError::IneligibleStaff(3), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::StaffUnavailable(3), StatusCode::CONFLICT),
            (
                DomainError::SlotConflict {
                    staff_id: 1,
                    date,
                    start: "10:00".parse().unwrap(),
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::InvalidDuration("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = ApiError(DomainError::Storage("secret path".into())).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "internal");
        assert!(!body["error"].as_str().unwrap().contains("secret"));
    }
}
