use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use chrono::Utc;
use edupanel::{
    ApiError,
    auth::{self, AdminSession, Claims},
    config::{AppConfig, Env},
    models::{
        Admin, Banner, Course, DashboardOrder, EditBannerRequest, EditCourseRequest,
        EditProjectRequest, EditServiceRequest, Project, SaveBannerRequest, SaveCourseRequest,
        SaveProjectRequest, SaveServiceRequest, Service, UpdateAboutRequest, User,
    },
    repository::{Repository, RepositoryState},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Mock Repository for the Credential Verifier ---

#[derive(Default)]
struct MockAuthRepo {
    admin: Option<Admin>,
}

#[async_trait]
impl Repository for MockAuthRepo {
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        Ok(self.admin.clone().filter(|a| a.email == email))
    }

    // Placeholders for methods the verifier never touches.
    async fn get_admin(&self, _id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
        Ok(self.admin.clone())
    }
    async fn update_admin_about(
        &self,
        _id: Uuid,
        _req: UpdateAboutRequest,
    ) -> Result<Option<Admin>, sqlx::Error> {
        Ok(None)
    }
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        Ok(vec![])
    }
    async fn set_user_status(
        &self,
        _id: Uuid,
        _status: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        Ok(None)
    }
    async fn list_courses(&self) -> Result<Vec<Course>, sqlx::Error> {
        Ok(vec![])
    }
    async fn find_course_by_title(&self, _title: &str) -> Result<Option<Course>, sqlx::Error> {
        Ok(None)
    }
    async fn insert_course(&self, _req: SaveCourseRequest) -> Result<Course, sqlx::Error> {
        Ok(Course::default())
    }
    async fn update_course(
        &self,
        _id: Uuid,
        _req: EditCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error> {
        Ok(None)
    }
    async fn delete_course(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
    async fn list_banners(&self) -> Result<Vec<Banner>, sqlx::Error> {
        Ok(vec![])
    }
    async fn insert_banner(&self, _req: SaveBannerRequest) -> Result<Banner, sqlx::Error> {
        Ok(Banner::default())
    }
    async fn update_banner(
        &self,
        _id: Uuid,
        _req: EditBannerRequest,
    ) -> Result<Option<Banner>, sqlx::Error> {
        Ok(None)
    }
    async fn set_banner_status(
        &self,
        _id: Uuid,
        _status: bool,
    ) -> Result<Option<Banner>, sqlx::Error> {
        Ok(None)
    }
    async fn delete_banner(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
    async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error> {
        Ok(vec![])
    }
    async fn insert_service(&self, _req: SaveServiceRequest) -> Result<Service, sqlx::Error> {
        Ok(Service::default())
    }
    async fn update_service(
        &self,
        _id: Uuid,
        _req: EditServiceRequest,
    ) -> Result<Option<Service>, sqlx::Error> {
        Ok(None)
    }
    async fn set_service_status(
        &self,
        _id: Uuid,
        _status: bool,
    ) -> Result<Option<Service>, sqlx::Error> {
        Ok(None)
    }
    async fn delete_service(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        Ok(vec![])
    }
    async fn insert_project(&self, _req: SaveProjectRequest) -> Result<Project, sqlx::Error> {
        Ok(Project::default())
    }
    async fn update_project(
        &self,
        _id: Uuid,
        _req: EditProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        Ok(None)
    }
    async fn set_project_status(
        &self,
        _id: Uuid,
        _status: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        Ok(None)
    }
    async fn delete_project(&self, _id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
    async fn list_orders(&self) -> Result<Vec<DashboardOrder>, sqlx::Error> {
        Ok(vec![])
    }
    async fn count_orders(&self) -> Result<i64, sqlx::Error> {
        Ok(0)
    }
    async fn count_courses(&self) -> Result<i64, sqlx::Error> {
        Ok(0)
    }
    async fn count_users(&self, _prime: Option<bool>) -> Result<i64, sqlx::Error> {
        Ok(0)
    }
}

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_ADMIN_ID: Uuid = Uuid::from_u128(1);

// Low bcrypt cost keeps the verifier tests fast.
const TEST_BCRYPT_COST: u32 = 4;

fn stored_admin(email: &str, password: &str) -> Admin {
    Admin {
        id: TEST_ADMIN_ID,
        email: email.to_string(),
        password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).unwrap(),
        about: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_token(admin_id: Uuid, role: &str, exp_offset: i64, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: admin_id,
        role: role.to_string(),
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn guard_config(env: Env) -> AppConfig {
    AppConfig {
        env,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

/// Helper to get the mutable Parts struct from a generated Request.
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn bearer_parts(token: &str) -> Parts {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    parts
}

// --- Credential Verifier Tests ---

#[tokio::test]
async fn test_verify_success_returns_admin_id() {
    let repo: RepositoryState = Arc::new(MockAuthRepo {
        admin: Some(stored_admin("admin@x.com", "correct")),
    });

    let result = auth::verify_credentials(&repo, "admin@x.com", "correct").await;

    assert_eq!(result.unwrap(), TEST_ADMIN_ID);
}

#[tokio::test]
async fn test_verify_wrong_password() {
    let repo: RepositoryState = Arc::new(MockAuthRepo {
        admin: Some(stored_admin("admin@x.com", "correct")),
    });

    let result = auth::verify_credentials(&repo, "admin@x.com", "wrong").await;

    assert!(matches!(result, Err(ApiError::InvalidPassword)));
}

#[tokio::test]
async fn test_verify_unknown_email() {
    let repo: RepositoryState = Arc::new(MockAuthRepo {
        admin: Some(stored_admin("admin@x.com", "correct")),
    });

    let result = auth::verify_credentials(&repo, "nobody@x.com", "correct").await;

    assert!(matches!(result, Err(ApiError::InvalidEmail)));
}

#[tokio::test]
async fn test_verify_rejects_empty_inputs() {
    let repo: RepositoryState = Arc::new(MockAuthRepo::default());

    let by_email = auth::verify_credentials(&repo, "", "whatever").await;
    assert!(matches!(by_email, Err(ApiError::InvalidEmail)));

    let by_password = auth::verify_credentials(&repo, "admin@x.com", "").await;
    assert!(matches!(by_password, Err(ApiError::InvalidPassword)));
}

// --- Session Guard Tests ---

#[tokio::test]
async fn test_guard_accepts_valid_token() {
    let token = create_token(TEST_ADMIN_ID, "admin", 3600, TEST_JWT_SECRET);
    let config = guard_config(Env::Production);

    let mut parts = bearer_parts(&token);
    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    let session = session.unwrap();
    assert_eq!(session.id, TEST_ADMIN_ID);
    assert_eq!(session.role, "admin");
}

#[tokio::test]
async fn test_issue_then_guard_round_trip() {
    let token = auth::issue_token(TEST_ADMIN_ID, TEST_JWT_SECRET).unwrap();
    let config = guard_config(Env::Production);

    let mut parts = bearer_parts(&token);
    let session = AdminSession::from_request_parts(&mut parts, &config)
        .await
        .unwrap();

    assert_eq!(session.id, TEST_ADMIN_ID);
}

#[tokio::test]
async fn test_guard_is_idempotent() {
    let token = auth::issue_token(TEST_ADMIN_ID, TEST_JWT_SECRET).unwrap();
    let config = guard_config(Env::Production);

    // Re-presenting the same token must resolve the same identity each time.
    for _ in 0..2 {
        let mut parts = bearer_parts(&token);
        let session = AdminSession::from_request_parts(&mut parts, &config)
            .await
            .unwrap();
        assert_eq!(session.id, TEST_ADMIN_ID);
    }
}

#[tokio::test]
async fn test_guard_rejects_missing_header() {
    let config = guard_config(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn test_guard_rejects_expired_token() {
    // Expired an hour ago, well past the default validation leeway.
    let token = create_token(TEST_ADMIN_ID, "admin", -3600, TEST_JWT_SECRET);
    let config = guard_config(Env::Production);

    let mut parts = bearer_parts(&token);
    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn test_guard_rejects_foreign_signature() {
    let token = create_token(TEST_ADMIN_ID, "admin", 3600, "some-other-secret");
    let config = guard_config(Env::Production);

    let mut parts = bearer_parts(&token);
    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn test_guard_rejects_non_admin_role() {
    // Correctly signed and unexpired, but not an admin token.
    let token = create_token(TEST_ADMIN_ID, "student", 3600, TEST_JWT_SECRET);
    let config = guard_config(Env::Production);

    let mut parts = bearer_parts(&token);
    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn test_guard_rejects_malformed_bearer() {
    let config = guard_config(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_static("Token not-a-jwt"),
    );

    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn test_local_bypass_success() {
    let bypass_id = Uuid::new_v4();
    let config = guard_config(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static("x-admin-id"),
        header::HeaderValue::from_str(&bypass_id.to_string()).unwrap(),
    );

    let session = AdminSession::from_request_parts(&mut parts, &config)
        .await
        .unwrap();

    assert_eq!(session.id, bypass_id);
    assert_eq!(session.role, "admin");
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let config = guard_config(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    // Provide ONLY the local bypass header.
    parts.headers.insert(
        header::HeaderName::from_static("x-admin-id"),
        header::HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
    );

    let session = AdminSession::from_request_parts(&mut parts, &config).await;

    assert!(matches!(session, Err(ApiError::Unauthenticated)));
}
