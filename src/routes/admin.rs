use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Admin Router Module
///
/// Every route of the console proper. The whole router is mounted behind the
/// session-guard middleware in `create_router`; handlers additionally take
/// the `AdminSession` extractor so direct handler tests exercise the same
/// identity plumbing.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Admin profile ---
        // GET /get-admin
        // Resolves the token's subject back to the stored record; the one
        // guarded endpoint that notices a deleted account (404).
        .route("/get-admin", get(handlers::get_admin))
        // PUT /update-about/{id}
        // Settings-page text update, the only mutation of the admin record.
        .route("/update-about/{id}", put(handlers::update_about))
        // --- Dashboard ---
        // GET /list-dashboard
        // Order list plus counters and revenue aggregation.
        .route("/list-dashboard", get(handlers::list_dashboard))
        // --- User management ---
        .route("/list-user", get(handlers::list_user))
        .route("/block-user/{id}", post(handlers::block_user))
        .route("/unblock-user/{id}", post(handlers::unblock_user))
        // --- Course management ---
        // Duplicate titles are rejected by the insert handler with 409.
        .route("/list-course", get(handlers::list_course))
        .route("/insert-course", post(handlers::insert_course))
        .route("/edit-course/{id}", post(handlers::edit_course))
        .route("/delete-course/{id}", delete(handlers::delete_course))
        // --- Banner management ---
        // The status endpoints publish/hide records on the user-facing site.
        .route("/list-banner", get(handlers::list_banner))
        .route("/insert-banner", post(handlers::insert_banner))
        .route("/edit-banner/{id}", post(handlers::edit_banner))
        .route("/banner-status/{id}", post(handlers::banner_status))
        .route("/delete-banner/{id}", delete(handlers::delete_banner))
        // --- Service management ---
        .route("/list-service", get(handlers::list_service))
        .route("/insert-service", post(handlers::insert_service))
        .route("/edit-service/{id}", post(handlers::edit_service))
        .route("/service-status/{id}", post(handlers::service_status))
        .route("/delete-service/{id}", delete(handlers::delete_service))
        // --- Project management ---
        .route("/list-project", get(handlers::list_project))
        .route("/insert-project", post(handlers::insert_project))
        .route("/edit-project/{id}", post(handlers::edit_project))
        .route("/project-status/{id}", post(handlers::project_status))
        .route("/delete-project/{id}", delete(handlers::delete_project))
        // --- Media uploads ---
        // POST /upload/presigned
        // Short-lived direct-to-bucket PUT URL for console artwork.
        .route("/upload/presigned", post(handlers::get_presigned_url))
}
