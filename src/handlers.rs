use crate::{
    AppState,
    auth::{self, AdminSession},
    error::ApiError,
    models::{
        self, Admin, AdminInfoResponse, AdminSummary, ApiResponse, Banner, Course, DashboardData,
        EditBannerRequest, EditCourseRequest, EditProjectRequest, EditServiceRequest,
        PresignedUrlRequest, PresignedUrlResponse, Project, SaveBannerRequest, SaveCourseRequest,
        SaveProjectRequest, SaveServiceRequest, Service, SigninRequest, SigninResponse,
        StatusMessage, StatusRequest, UpdateAboutRequest, User,
    },
};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

// --- Authentication ---

/// signin
///
/// [Public Route] Verifies the admin credentials and mints a session token.
/// Unknown email and wrong password are deliberately distinguishable in the
/// response (observable contract of the console's sign-in form).
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Bad credentials", body = StatusMessage)
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    let admin_id = auth::verify_credentials(&state.repo, &payload.email, &payload.password).await?;
    let token = auth::issue_token(admin_id, &state.config.jwt_secret)?;

    tracing::info!("admin signed in: {}", payload.email);

    Ok(Json(SigninResponse {
        success: true,
        message: "Signin Success".to_string(),
        token,
    }))
}

/// get_admin
///
/// [Guarded Route] Re-fetches the admin record behind the session token.
/// The guard trusts the token's claims; this is the one place that notices a
/// record deleted after issuance, answering 404.
#[utoipa::path(
    get,
    path = "/get-admin",
    responses(
        (status = 200, description = "Admin info", body = AdminInfoResponse),
        (status = 404, description = "Record gone", body = StatusMessage)
    )
)]
pub async fn get_admin(
    AdminSession { id, .. }: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<AdminInfoResponse>, ApiError> {
    let admin = state
        .repo
        .get_admin(id)
        .await?
        .ok_or(ApiError::NotFound("Admin Not Found"))?;

    Ok(Json(AdminInfoResponse {
        success: true,
        auth: true,
        result: AdminSummary {
            email: admin.email.clone(),
        },
        data: admin,
        message: "Login Success".to_string(),
    }))
}

/// update_about
///
/// [Guarded Route] Updates the admin's about/settings text. The only
/// mutation the admin record ever sees.
#[utoipa::path(
    put,
    path = "/update-about/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    request_body = UpdateAboutRequest,
    responses((status = 200, description = "Updated", body = ApiResponse<Admin>))
)]
pub async fn update_about(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAboutRequest>,
) -> Result<Json<ApiResponse<Admin>>, ApiError> {
    let admin = state
        .repo
        .update_admin_about(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Admin Not Found"))?;

    Ok(Json(ApiResponse::ok("Update Success", admin)))
}

// --- Dashboard ---

/// list_dashboard
///
/// [Guarded Route] Assembles the dashboard payload: the enriched order list,
/// the fixed set of counters, and the revenue figures derived from them.
/// Course profit sums order prices; prime profit multiplies the prime member
/// count by the membership price.
#[utoipa::path(
    get,
    path = "/list-dashboard",
    responses((status = 200, description = "Dashboard", body = ApiResponse<DashboardData>))
)]
pub async fn list_dashboard(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let repo = &state.repo;

    let orders = repo.list_orders().await?;
    let order_count = repo.count_orders().await?;
    let course_count = repo.count_courses().await?;
    let prime_members_count = repo.count_users(Some(true)).await?;
    let normal_users_count = repo.count_users(Some(false)).await?;
    let total_members_count = repo.count_users(None).await?;

    let course_profit: i64 = orders.iter().map(|o| o.price).sum();
    let prime_profit = prime_members_count * models::PRIME_MEMBERSHIP_PRICE;
    let total_profit = course_profit + prime_profit;

    let data = DashboardData {
        orders,
        order_count,
        course_count,
        prime_members_count,
        normal_users_count,
        total_members_count,
        course_profit,
        prime_profit,
        total_profit,
    };

    Ok(Json(ApiResponse::ok("Dashboard Fetched", data)))
}

// --- User Management ---

/// list_user
///
/// [Guarded Route] Lists every learner account. Sorting and filtering happen
/// client-side over this array.
#[utoipa::path(
    get,
    path = "/list-user",
    responses((status = 200, description = "Users", body = ApiResponse<Vec<User>>))
)]
pub async fn list_user(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.repo.list_users().await?;
    Ok(Json(ApiResponse::ok("Users Fetched", users)))
}

/// block_user
///
/// [Guarded Route] Flags a user as blocked. 404 for an unknown id.
#[utoipa::path(
    post,
    path = "/block-user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Blocked", body = ApiResponse<User>),
        (status = 404, description = "Unknown user", body = StatusMessage)
    )
)]
pub async fn block_user(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .repo
        .set_user_status(id, "blocked")
        .await?
        .ok_or(ApiError::NotFound("User Not Found"))?;

    Ok(Json(ApiResponse::ok("User Blocked", user)))
}

/// unblock_user
///
/// [Guarded Route] Clears the blocked flag. 404 for an unknown id.
#[utoipa::path(
    post,
    path = "/unblock-user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Unblocked", body = ApiResponse<User>),
        (status = 404, description = "Unknown user", body = StatusMessage)
    )
)]
pub async fn unblock_user(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .repo
        .set_user_status(id, "unblocked")
        .await?
        .ok_or(ApiError::NotFound("User Not Found"))?;

    Ok(Json(ApiResponse::ok("User Unblocked", user)))
}

// --- Course Management ---

/// list_course
#[utoipa::path(
    get,
    path = "/list-course",
    responses((status = 200, description = "Courses", body = ApiResponse<Vec<Course>>))
)]
pub async fn list_course(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    let courses = state.repo.list_courses().await?;
    Ok(Json(ApiResponse::ok("Courses Fetched Successfully", courses)))
}

/// insert_course
///
/// [Guarded Route] Creates a course. Titles are unique across the catalog;
/// a duplicate is rejected with 409 before any insert is attempted.
#[utoipa::path(
    post,
    path = "/insert-course",
    request_body = SaveCourseRequest,
    responses(
        (status = 200, description = "Created", body = StatusMessage),
        (status = 409, description = "Duplicate title", body = StatusMessage)
    )
)]
pub async fn insert_course(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<SaveCourseRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    if state.repo.find_course_by_title(&payload.title).await?.is_some() {
        return Err(ApiError::Conflict("Course Already Exists"));
    }

    state.repo.insert_course(payload).await?;

    Ok(Json(StatusMessage::ok("Course Created Successfully")))
}

/// edit_course
///
/// [Guarded Route] Partial update of a course; untouched fields keep their
/// stored values.
#[utoipa::path(
    post,
    path = "/edit-course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = EditCourseRequest,
    responses(
        (status = 200, description = "Updated", body = StatusMessage),
        (status = 404, description = "Unknown course", body = StatusMessage)
    )
)]
pub async fn edit_course(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditCourseRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    state
        .repo
        .update_course(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Course Not Found"))?;

    Ok(Json(StatusMessage::ok("Course Updated Successfully")))
}

/// delete_course
#[utoipa::path(
    delete,
    path = "/delete-course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusMessage),
        (status = 404, description = "Unknown course", body = StatusMessage)
    )
)]
pub async fn delete_course(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    if state.repo.delete_course(id).await? {
        Ok(Json(StatusMessage::ok("Course Deleted Successfully")))
    } else {
        Err(ApiError::NotFound("Course Not Found"))
    }
}

// --- Banner Management ---

/// list_banner
#[utoipa::path(
    get,
    path = "/list-banner",
    responses((status = 200, description = "Banners", body = ApiResponse<Vec<Banner>>))
)]
pub async fn list_banner(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Banner>>>, ApiError> {
    let banners = state.repo.list_banners().await?;
    Ok(Json(ApiResponse::ok("Banners Fetched", banners)))
}

/// insert_banner
///
/// [Guarded Route] Creates a banner. New banners start hidden until the
/// status toggle publishes them.
#[utoipa::path(
    post,
    path = "/insert-banner",
    request_body = SaveBannerRequest,
    responses((status = 200, description = "Created", body = ApiResponse<Banner>))
)]
pub async fn insert_banner(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<SaveBannerRequest>,
) -> Result<Json<ApiResponse<Banner>>, ApiError> {
    let banner = state.repo.insert_banner(payload).await?;
    Ok(Json(ApiResponse::ok("Banner Created Successfully", banner)))
}

/// edit_banner
#[utoipa::path(
    post,
    path = "/edit-banner/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    request_body = EditBannerRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<Banner>),
        (status = 404, description = "Unknown banner", body = StatusMessage)
    )
)]
pub async fn edit_banner(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditBannerRequest>,
) -> Result<Json<ApiResponse<Banner>>, ApiError> {
    let banner = state
        .repo
        .update_banner(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Banner Not Found"))?;

    Ok(Json(ApiResponse::ok("Banner Updated Successfully", banner)))
}

/// banner_status
///
/// [Guarded Route] Publishes or hides a banner on the user-facing site.
#[utoipa::path(
    post,
    path = "/banner-status/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Toggled", body = ApiResponse<Banner>),
        (status = 404, description = "Unknown banner", body = StatusMessage)
    )
)]
pub async fn banner_status(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<ApiResponse<Banner>>, ApiError> {
    let banner = state
        .repo
        .set_banner_status(id, payload.status)
        .await?
        .ok_or(ApiError::NotFound("Banner Not Found"))?;

    Ok(Json(ApiResponse::ok("Banner Status Updated", banner)))
}

/// delete_banner
#[utoipa::path(
    delete,
    path = "/delete-banner/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusMessage),
        (status = 404, description = "Unknown banner", body = StatusMessage)
    )
)]
pub async fn delete_banner(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    if state.repo.delete_banner(id).await? {
        Ok(Json(StatusMessage::ok("Banner Deleted Successfully")))
    } else {
        Err(ApiError::NotFound("Banner Not Found"))
    }
}

// --- Service Management ---

/// list_service
#[utoipa::path(
    get,
    path = "/list-service",
    responses((status = 200, description = "Services", body = ApiResponse<Vec<Service>>))
)]
pub async fn list_service(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let services = state.repo.list_services().await?;
    Ok(Json(ApiResponse::ok("Services Fetched", services)))
}

/// insert_service
#[utoipa::path(
    post,
    path = "/insert-service",
    request_body = SaveServiceRequest,
    responses((status = 200, description = "Created", body = ApiResponse<Service>))
)]
pub async fn insert_service(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<SaveServiceRequest>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let service = state.repo.insert_service(payload).await?;
    Ok(Json(ApiResponse::ok("Service Created Successfully", service)))
}

/// edit_service
#[utoipa::path(
    post,
    path = "/edit-service/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = EditServiceRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<Service>),
        (status = 404, description = "Unknown service", body = StatusMessage)
    )
)]
pub async fn edit_service(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditServiceRequest>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let service = state
        .repo
        .update_service(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Service Not Found"))?;

    Ok(Json(ApiResponse::ok("Service Updated Successfully", service)))
}

/// service_status
#[utoipa::path(
    post,
    path = "/service-status/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Toggled", body = ApiResponse<Service>),
        (status = 404, description = "Unknown service", body = StatusMessage)
    )
)]
pub async fn service_status(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    let service = state
        .repo
        .set_service_status(id, payload.status)
        .await?
        .ok_or(ApiError::NotFound("Service Not Found"))?;

    Ok(Json(ApiResponse::ok("Service Status Updated", service)))
}

/// delete_service
#[utoipa::path(
    delete,
    path = "/delete-service/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusMessage),
        (status = 404, description = "Unknown service", body = StatusMessage)
    )
)]
pub async fn delete_service(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    if state.repo.delete_service(id).await? {
        Ok(Json(StatusMessage::ok("Service Deleted Successfully")))
    } else {
        Err(ApiError::NotFound("Service Not Found"))
    }
}

// --- Project Management ---

/// list_project
#[utoipa::path(
    get,
    path = "/list-project",
    responses((status = 200, description = "Projects", body = ApiResponse<Vec<Project>>))
)]
pub async fn list_project(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = state.repo.list_projects().await?;
    Ok(Json(ApiResponse::ok("Projects Fetched", projects)))
}

/// insert_project
#[utoipa::path(
    post,
    path = "/insert-project",
    request_body = SaveProjectRequest,
    responses((status = 200, description = "Created", body = ApiResponse<Project>))
)]
pub async fn insert_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<SaveProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.repo.insert_project(payload).await?;
    Ok(Json(ApiResponse::ok("Project Created Successfully", project)))
}

/// edit_project
#[utoipa::path(
    post,
    path = "/edit-project/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = EditProjectRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<Project>),
        (status = 404, description = "Unknown project", body = StatusMessage)
    )
)]
pub async fn edit_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .repo
        .update_project(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Project Not Found"))?;

    Ok(Json(ApiResponse::ok("Project Updated Successfully", project)))
}

/// project_status
#[utoipa::path(
    post,
    path = "/project-status/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Toggled", body = ApiResponse<Project>),
        (status = 404, description = "Unknown project", body = StatusMessage)
    )
)]
pub async fn project_status(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .repo
        .set_project_status(id, payload.status)
        .await?
        .ok_or(ApiError::NotFound("Project Not Found"))?;

    Ok(Json(ApiResponse::ok("Project Status Updated", project)))
}

/// delete_project
#[utoipa::path(
    delete,
    path = "/delete-project/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted", body = StatusMessage),
        (status = 404, description = "Unknown project", body = StatusMessage)
    )
)]
pub async fn delete_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    if state.repo.delete_project(id).await? {
        Ok(Json(StatusMessage::ok("Project Deleted Successfully")))
    } else {
        Err(ApiError::NotFound("Project Not Found"))
    }
}

// --- Media Uploads ---

/// get_presigned_url
///
/// [Guarded Route] Generates a temporary URL for uploading console artwork
/// directly to the bucket. The object key is a fresh UUID under `media/`,
/// keeping client-supplied filenames out of the bucket namespace.
#[utoipa::path(
    post,
    path = "/upload/presigned",
    request_body = PresignedUrlRequest,
    responses((status = 200, description = "URL", body = ApiResponse<PresignedUrlResponse>))
)]
pub async fn get_presigned_url(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Result<Json<ApiResponse<PresignedUrlResponse>>, ApiError> {
    let extension = std::path::Path::new(&payload.filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("bin");
    let object_key = format!("media/{}.{}", Uuid::new_v4(), extension);

    match state
        .media
        .presigned_upload_url(&object_key, &payload.file_type)
        .await
    {
        Ok(url) => Ok(Json(ApiResponse::ok(
            "Upload URL Generated",
            PresignedUrlResponse {
                upload_url: url,
                resource_key: object_key,
            },
        ))),
        Err(e) => {
            tracing::error!("media store error: {}", e);
            Err(ApiError::Internal)
        }
    }
}
