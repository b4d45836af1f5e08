use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Price of a prime membership, used by the dashboard profit aggregation.
pub const PRIME_MEMBERSHIP_PRICE: i64 = 399;

// --- Core Application Schemas (Mapped to Database) ---

/// Admin
///
/// The single privileged identity of the console, stored in the `admins` table.
/// Created out-of-band by seed/migration; mutated only through the
/// update-about operation and never deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Admin {
    pub id: Uuid,
    // Unique sign-in identifier.
    pub email: String,

    /// Bcrypt hash of the admin password. Never serialized into any response
    /// body; the `default` keeps deserialization of sanitized payloads working.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    #[schema(ignore)]
    pub password_hash: String,

    // Free-form about/settings text shown on the console settings page.
    pub about: Option<String>,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// AdminSummary
///
/// The minimal identity slice echoed in the `result` field of the
/// `/get-admin` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminSummary {
    pub email: String,
}

/// User
///
/// A learner account from the `users` table, managed (listed, blocked,
/// unblocked) by the admin console.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    // Avatar URL, set by the user-facing application.
    pub image: Option<String>,
    // Moderation flag: "blocked" or "unblocked".
    pub status: String,
    // Whether the user holds a prime membership.
    pub prime: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Course
///
/// A purchasable course from the `courses` table. Titles are unique; the
/// insert handler rejects duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    // Artwork key/URL produced by the media upload pipeline.
    pub image: Option<String>,
    // Price in whole currency units.
    pub price: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Banner
///
/// A homepage banner from the `banners` table. `status` controls whether the
/// user-facing site renders it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub status: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Service
///
/// An offered service from the `services` table, same visibility model as
/// banners.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub status: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Project
///
/// A showcase project from the `projects` table, with an optional external
/// link alongside the shared title/description/image/status shape.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub status: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// SigninRequest
///
/// Credentials submitted to POST /signin.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// UpdateAboutRequest
///
/// Partial update payload for the admin settings page (PUT /update-about/{id}).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateAboutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// SaveCourseRequest
///
/// Input payload for creating a course (POST /insert-course).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SaveCourseRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub price: i64,
}

/// EditCourseRequest
///
/// Partial update payload for POST /edit-course/{id}. All fields are
/// `Option<T>` so only the provided columns are touched.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EditCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

/// SaveBannerRequest
///
/// Input payload for creating a banner. New banners start hidden
/// (`status = false`) until explicitly enabled.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SaveBannerRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// EditBannerRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EditBannerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// SaveServiceRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SaveServiceRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// EditServiceRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EditServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// SaveProjectRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SaveProjectRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// EditProjectRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EditProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// StatusRequest
///
/// Toggle payload for the banner/service/project status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StatusRequest {
    pub status: bool,
}

/// PresignedUrlRequest
///
/// Input payload for requesting a short-lived upload URL (POST /upload/presigned).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    /// The original filename, used to derive the file extension.
    #[schema(example = "banner.jpg")]
    pub filename: String,
    /// The MIME type the generated URL is constrained to.
    #[schema(example = "image/jpeg")]
    pub file_type: String,
}

/// PresignedUrlResponse
///
/// Output schema containing the temporary URL for the direct-to-bucket upload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    /// The time-limited URL for the PUT request.
    pub upload_url: String,
    /// The object key where the file lands (stored on the record afterwards).
    pub resource_key: String,
}

// --- Dashboard Schemas (Output) ---

/// DashboardOrder
///
/// An order row enriched with the purchaser's name and avatar for the
/// dashboard's recent-orders table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct DashboardOrder {
    pub id: Uuid,
    pub user_name: String,
    pub user_image: Option<String>,
    pub price: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// DashboardData
///
/// Aggregated counters and revenue figures for GET /list-dashboard.
/// Course profit sums order prices; prime profit is the prime member count
/// times the membership price.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardData {
    pub orders: Vec<DashboardOrder>,
    pub order_count: i64,
    pub course_count: i64,
    pub prime_members_count: i64,
    pub normal_users_count: i64,
    pub total_members_count: i64,
    pub course_profit: i64,
    pub prime_profit: i64,
    pub total_profit: i64,
}

// --- Response Envelopes ---

/// ApiResponse
///
/// The `{success, message, data}` envelope every record-bearing success body
/// uses. `data` is omitted from the JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// StatusMessage
///
/// The data-less `{success, message}` body used by mutations that return no
/// record and by every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// SigninResponse
///
/// Success body of POST /signin, carrying the freshly minted bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct SigninResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// AdminInfoResponse
///
/// Success body of GET /get-admin. `result` carries the identity slice the
/// console header renders; `data` is the full sanitized record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct AdminInfoResponse {
    pub success: bool,
    pub auth: bool,
    pub result: AdminSummary,
    pub data: Admin,
    pub message: String,
}
