use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// The only endpoints reachable without a session token: the load-balancer
/// health probe and the sign-in gateway that mints tokens in the first place.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Returns "ok" immediately; used by monitoring and container probes.
        .route("/health", get(|| async { "ok" }))
        // POST /signin
        // Credential verification + token issuance. Bad credentials answer 400
        // with a message distinguishing unknown email from wrong password.
        .route("/signin", post(handlers::signin))
}
