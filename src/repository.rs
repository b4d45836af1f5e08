use crate::models::{
    Admin, Banner, Course, DashboardOrder, EditBannerRequest, EditCourseRequest,
    EditProjectRequest, EditServiceRequest, Project, SaveBannerRequest, SaveCourseRequest,
    SaveProjectRequest, SaveServiceRequest, Service, UpdateAboutRequest, User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// The abstract contract for all persistence operations. Handlers depend on
/// this trait object, never on Postgres directly, so tests substitute mocks.
///
/// Every method returns `Result<_, sqlx::Error>`: store failures propagate to
/// the handler boundary where they are logged and collapsed into a generic
/// 500, never swallowed inside the data layer.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Admin account ---
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error>;
    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>, sqlx::Error>;
    async fn update_admin_about(
        &self,
        id: Uuid,
        req: UpdateAboutRequest,
    ) -> Result<Option<Admin>, sqlx::Error>;

    // --- User management ---
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error>;
    // Sets the moderation flag ("blocked" / "unblocked"); None if no such user.
    async fn set_user_status(&self, id: Uuid, status: &str)
    -> Result<Option<User>, sqlx::Error>;

    // --- Courses ---
    async fn list_courses(&self) -> Result<Vec<Course>, sqlx::Error>;
    async fn find_course_by_title(&self, title: &str) -> Result<Option<Course>, sqlx::Error>;
    async fn insert_course(&self, req: SaveCourseRequest) -> Result<Course, sqlx::Error>;
    async fn update_course(
        &self,
        id: Uuid,
        req: EditCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error>;
    // True if a row was deleted.
    async fn delete_course(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Banners ---
    async fn list_banners(&self) -> Result<Vec<Banner>, sqlx::Error>;
    async fn insert_banner(&self, req: SaveBannerRequest) -> Result<Banner, sqlx::Error>;
    async fn update_banner(
        &self,
        id: Uuid,
        req: EditBannerRequest,
    ) -> Result<Option<Banner>, sqlx::Error>;
    async fn set_banner_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Banner>, sqlx::Error>;
    async fn delete_banner(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Services ---
    async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error>;
    async fn insert_service(&self, req: SaveServiceRequest) -> Result<Service, sqlx::Error>;
    async fn update_service(
        &self,
        id: Uuid,
        req: EditServiceRequest,
    ) -> Result<Option<Service>, sqlx::Error>;
    async fn set_service_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Service>, sqlx::Error>;
    async fn delete_service(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Projects ---
    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error>;
    async fn insert_project(&self, req: SaveProjectRequest) -> Result<Project, sqlx::Error>;
    async fn update_project(
        &self,
        id: Uuid,
        req: EditProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error>;
    async fn set_project_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Project>, sqlx::Error>;
    async fn delete_project(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Dashboard ---
    // Orders enriched with the purchaser's name and avatar, newest first.
    async fn list_orders(&self) -> Result<Vec<DashboardOrder>, sqlx::Error>;
    async fn count_orders(&self) -> Result<i64, sqlx::Error>;
    async fn count_courses(&self) -> Result<i64, sqlx::Error>;
    // `prime = None` counts everyone; Some(flag) counts that membership tier.
    async fn count_users(&self, prime: Option<bool>) -> Result<i64, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the
/// PostgreSQL pool. Queries are runtime-checked (`query_as` with binds), so
/// the crate builds without a live database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ADMIN_COLUMNS: &str = "id, email, password_hash, about, created_at, updated_at";
const COURSE_COLUMNS: &str = "id, title, description, image, price, created_at, updated_at";
const BANNER_COLUMNS: &str = "id, title, description, image, status, created_at, updated_at";
const SERVICE_COLUMNS: &str = "id, title, description, image, status, created_at, updated_at";
const PROJECT_COLUMNS: &str =
    "id, title, description, image, link, status, created_at, updated_at";

#[async_trait]
impl Repository for PostgresRepository {
    // --- ADMIN ACCOUNT ---

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Partial update via COALESCE: only columns present in the request are
    /// touched.
    async fn update_admin_about(
        &self,
        id: Uuid,
        req: UpdateAboutRequest,
    ) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "UPDATE admins SET about = COALESCE($2, about), updated_at = NOW() \
             WHERE id = $1 RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(id)
        .bind(req.about)
        .fetch_optional(&self.pool)
        .await
    }

    // --- USER MANAGEMENT ---

    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, image, status, prime, created_at \
             FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn set_user_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET status = $2 WHERE id = $1 \
             RETURNING id, name, email, image, status, prime, created_at",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    // --- COURSES ---

    async fn list_courses(&self) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn find_course_by_title(&self, title: &str) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE title = $1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_course(&self, req: SaveCourseRequest) -> Result<Course, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (id, title, description, image, price, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) RETURNING {COURSE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .bind(req.price)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_course(
        &self,
        id: Uuid,
        req: EditCourseRequest,
    ) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             image = COALESCE($4, image), \
             price = COALESCE($5, price), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .bind(req.price)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- BANNERS ---

    async fn list_banners(&self) -> Result<Vec<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "SELECT {BANNER_COLUMNS} FROM banners ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// New banners start hidden until the status toggle enables them.
    async fn insert_banner(&self, req: SaveBannerRequest) -> Result<Banner, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "INSERT INTO banners (id, title, description, image, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, false, NOW(), NOW()) RETURNING {BANNER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_banner(
        &self,
        id: Uuid,
        req: EditBannerRequest,
    ) -> Result<Option<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "UPDATE banners SET title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             image = COALESCE($4, image), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {BANNER_COLUMNS}"
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_banner_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Banner>, sqlx::Error> {
        sqlx::query_as::<_, Banner>(&format!(
            "UPDATE banners SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {BANNER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_banner(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- SERVICES ---

    async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_service(&self, req: SaveServiceRequest) -> Result<Service, sqlx::Error> {
        sqlx::query_as::<_, Service>(&format!(
            "INSERT INTO services (id, title, description, image, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, false, NOW(), NOW()) RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_service(
        &self,
        id: Uuid,
        req: EditServiceRequest,
    ) -> Result<Option<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(&format!(
            "UPDATE services SET title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             image = COALESCE($4, image), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_service_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(&format!(
            "UPDATE services SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- PROJECTS ---

    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_project(&self, req: SaveProjectRequest) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (id, title, description, image, link, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, false, NOW(), NOW()) RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .bind(req.link)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project(
        &self,
        id: Uuid,
        req: EditProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             image = COALESCE($4, image), \
             link = COALESCE($5, link), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.image)
        .bind(req.link)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_project_status(
        &self,
        id: Uuid,
        status: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- DASHBOARD ---

    async fn list_orders(&self) -> Result<Vec<DashboardOrder>, sqlx::Error> {
        sqlx::query_as::<_, DashboardOrder>(
            "SELECT o.id, u.name AS user_name, u.image AS user_image, o.price, o.created_at \
             FROM orders o JOIN users u ON o.user_id = u.id \
             ORDER BY o.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn count_orders(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_courses(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_users(&self, prime: Option<bool>) -> Result<i64, sqlx::Error> {
        match prime {
            Some(flag) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE prime = $1")
                    .bind(flag)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await
            }
        }
    }
}
