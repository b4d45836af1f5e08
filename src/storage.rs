use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::presigning::PresigningConfig;
use std::sync::Arc;
use std::time::Duration;

/// How long a generated upload URL stays valid.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(600);

/// MediaStore
///
/// Contract for the object-storage layer backing console media uploads
/// (banner, course, service and project artwork). The console never proxies
/// file bytes through this service; it only hands out short-lived presigned
/// PUT URLs and stores the resulting object keys on the records.
///
/// The trait boundary lets tests swap the S3 client for the in-memory mock.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Ensures the configured bucket exists. Used in `Env::Local` to
    /// provision the MinIO bucket at startup; a no-op against a real bucket.
    async fn ensure_bucket_exists(&self);

    /// Generates a temporary signed URL allowing the console to PUT one
    /// object directly into the bucket, constrained to `content_type` and
    /// expiring after [`UPLOAD_URL_TTL`].
    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, String>;
}

/// MediaState
///
/// The concrete type used to share the media store across the application state.
pub type MediaState = Arc<dyn MediaStore>;

/// S3MediaStore
///
/// Real implementation over the AWS SDK. Path-style addressing is forced so
/// the same client works against MinIO locally and S3-compatible gateways in
/// production.
#[derive(Clone)]
pub struct S3MediaStore {
    client: s3::Client,
    bucket: String,
}

impl S3MediaStore {
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            // MinIO and most S3-compatible gateways require path-style URLs.
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(config),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn ensure_bucket_exists(&self) {
        // CreateBucket is idempotent; safe to call at every startup.
        let _ = self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await;
    }

    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, String> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            // The upload must carry exactly this Content-Type header.
            .content_type(content_type)
            .presigned(
                PresigningConfig::expires_in(UPLOAD_URL_TTL).map_err(|e| e.to_string())?,
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(presigned.uri().to_string())
    }
}

/// Strips empty and directory-navigation segments from a user-influenced key.
fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// MockMediaStore
///
/// In-memory stand-in for unit and integration tests: returns deterministic
/// URLs and can be switched into a failing mode to exercise the error path.
#[derive(Clone)]
pub struct MockMediaStore {
    /// When true, every operation reports a simulated failure.
    pub should_fail: bool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn ensure_bucket_exists(&self) {
        // Nothing to provision in the mock.
    }

    async fn presigned_upload_url(
        &self,
        key: &str,
        _content_type: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Mock media store failure requested".to_string());
        }

        let sanitized = sanitize_key(key);

        Ok(format!(
            "http://localhost:9000/mock-bucket/{}?signature=fake",
            sanitized
        ))
    }
}
