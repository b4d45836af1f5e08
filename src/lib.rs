use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod storage;

// Routing segregation (Public vs. token-guarded admin surface).
pub mod routes;
use auth::AdminSession;
use routes::{admin, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the binary entry point.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{MediaState, MockMediaStore, S3MediaStore};

/// ApiDoc
///
/// Auto-generates the OpenAPI document for the console API, aggregating every
/// handler decorated with `#[utoipa::path]` and the schemas they reference.
/// Served as JSON at `/api-docs/openapi.json` and browsable at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::signin, handlers::get_admin, handlers::update_about,
        handlers::list_dashboard, handlers::list_user, handlers::block_user,
        handlers::unblock_user, handlers::list_course, handlers::insert_course,
        handlers::edit_course, handlers::delete_course, handlers::list_banner,
        handlers::insert_banner, handlers::edit_banner, handlers::banner_status,
        handlers::delete_banner, handlers::list_service, handlers::insert_service,
        handlers::edit_service, handlers::service_status, handlers::delete_service,
        handlers::list_project, handlers::insert_project, handlers::edit_project,
        handlers::project_status, handlers::delete_project, handlers::get_presigned_url
    ),
    components(
        schemas(
            models::Admin, models::AdminSummary, models::User, models::Course,
            models::Banner, models::Service, models::Project,
            models::SigninRequest, models::UpdateAboutRequest,
            models::SaveCourseRequest, models::EditCourseRequest,
            models::SaveBannerRequest, models::EditBannerRequest,
            models::SaveServiceRequest, models::EditServiceRequest,
            models::SaveProjectRequest, models::EditProjectRequest,
            models::StatusRequest, models::PresignedUrlRequest,
            models::PresignedUrlResponse, models::DashboardOrder,
            models::DashboardData, models::SigninResponse,
            models::AdminInfoResponse, models::StatusMessage,
        )
    ),
    tags(
        (name = "edupanel", description = "Learning platform admin console API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across every incoming request.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: account, catalog and order access via the PgPool.
    pub repo: RepositoryState,
    /// Media layer: presigned upload URLs for console artwork.
    pub media: MediaState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors and handlers pull individual components out of the shared
// AppState instead of depending on the whole bundle.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for MediaState {
    fn from_ref(app_state: &AppState) -> MediaState {
        app_state.media.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// require_admin
///
/// Middleware enforcing the session guard on the admin router. The
/// `AdminSession` extractor validates the bearer token (signature, expiry,
/// role); a failure rejects the request with the 401 envelope before any
/// handler runs.
async fn require_admin(_session: AdminSession, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies global and scoped middleware, and
/// registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Admin routes: every endpoint behind the session guard.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                // Generate a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Wrap the request/response lifecycle in a tracing span that
                // carries the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Return the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: includes the `x-request-id` header in the
/// structured logging metadata alongside the HTTP method and URI, so every
/// log line of one request correlates on a single id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
