/// Router Module Index
///
/// Splits the routing surface by access level. The split is enforced at the
/// router layer: the admin module is mounted behind the session-guard
/// middleware in `create_router`, so no privileged handler is reachable
/// without a validated bearer token.

/// Unauthenticated endpoints: health probe and sign-in.
pub mod public;

/// Every console endpoint behind the bearer-token guard.
pub mod admin;
