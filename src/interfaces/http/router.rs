//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AvailabilityService, BookingService, CompatibilityService};
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::availability::{self, AvailabilityAppState};
use super::modules::bookings::{self, BookingAppState};
use super::modules::compatibility::{self, CompatibilityAppState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;

/// Services shared by every API route. Handlers pick their slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub availability: Arc<AvailabilityService>,
    pub bookings: Arc<BookingService>,
    pub compatibility: Arc<CompatibilityService>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bookings: BookingService) -> Self {
        Self {
            availability: Arc::new(AvailabilityService::new(repos.clone())),
            bookings: Arc::new(bookings),
            compatibility: Arc::new(CompatibilityService::new(repos)),
        }
    }
}

impl FromRef<AppState> for AvailabilityAppState {
    fn from_ref(s: &AppState) -> Self {
        AvailabilityAppState {
            service: Arc::clone(&s.availability),
        }
    }
}

impl FromRef<AppState> for BookingAppState {
    fn from_ref(s: &AppState) -> Self {
        BookingAppState {
            service: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<AppState> for CompatibilityAppState {
    fn from_ref(s: &AppState) -> Self {
        CompatibilityAppState {
            service: Arc::clone(&s.compatibility),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        availability::get_availability,
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking_status,
        bookings::cancel_booking,
        bookings::list_place_bookings,
        compatibility::eligible_staff,
        compatibility::staff_services,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            availability::AvailabilityDto,
            availability::SlotDto,
            availability::CampaignDto,
            bookings::StaffChoice,
            bookings::CreateBookingRequest,
            bookings::UpdateStatusRequest,
            bookings::BookingDto,
            compatibility::StaffDto,
            compatibility::ServiceDto,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health"),
        (name = "Availability", description = "Free start times for a place, date and service combination"),
        (name = "Bookings", description = "Booking commit and lifecycle"),
        (name = "Compatibility", description = "Which staff can perform which services"),
    ),
    info(
        title = "Slotbook API",
        version = "1.0.0",
        description = "Appointment availability and booking for service businesses",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full HTTP application. The metrics route is mounted only when
/// a Prometheus recorder was installed.
pub fn create_api_router(
    state: AppState,
    health_state: HealthState,
    metrics: Option<MetricsState>,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/v1/places/{place_id}/availability",
            get(availability::get_availability),
        )
        .route(
            "/api/v1/places/{place_id}/bookings",
            get(bookings::list_place_bookings),
        )
        .route(
            "/api/v1/places/{place_id}/staff/eligible",
            get(compatibility::eligible_staff),
        )
        .route(
            "/api/v1/staff/{staff_id}/services",
            get(compatibility::staff_services),
        )
        .route("/api/v1/bookings", post(bookings::create_booking))
        .route("/api/v1/bookings/{booking_id}", get(bookings::get_booking))
        .route(
            "/api/v1/bookings/{booking_id}/status",
            patch(bookings::update_booking_status),
        )
        .route(
            "/api/v1/bookings/{booking_id}/cancel",
            post(bookings::cancel_booking),
        )
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(api_routes);

    if let Some(metrics) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(metrics),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
