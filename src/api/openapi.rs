//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{accounts, auth, complaints, equipment, equipment_logs, files, health, schedules, stats, tasks};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Elban API",
        version = "0.3.0",
        description = "Airport electronics unit: equipment, maintenance, tasks, schedules, archive, complaints and account approval",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::session,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Equipment logs
        equipment_logs::list_logs,
        equipment_logs::create_log,
        equipment_logs::update_log,
        equipment_logs::delete_log,
        // Tasks
        tasks::list_tasks,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
        // Schedules
        schedules::list_schedules,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        // Files
        files::list_files,
        files::create_file,
        files::upload_file,
        files::update_file,
        files::delete_file,
        // Accounts
        accounts::list_accounts,
        accounts::update_status,
        accounts::update_role,
        accounts::delete_account,
        // Complaints
        complaints::list_complaints,
        complaints::create_complaint,
        complaints::update_complaint,
        complaints::update_complaint_status,
        complaints::delete_complaint,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::services::session::SessionInfo,
            crate::models::account::RegisterAccount,
            // Entities
            crate::models::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::EquipmentLog,
            crate::models::equipment_log::CreateEquipmentLog,
            crate::models::equipment_log::UpdateEquipmentLog,
            crate::models::Task,
            crate::models::task::CreateTask,
            crate::models::task::UpdateTask,
            crate::models::Schedule,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            crate::models::FileRecord,
            crate::models::file_record::CreateFileRecord,
            crate::models::file_record::UpdateFileRecord,
            files::UploadForm,
            crate::models::Account,
            crate::models::account::UpdateAccountStatus,
            crate::models::account::UpdateAccountRole,
            crate::models::Complaint,
            crate::models::complaint::CreateComplaint,
            crate::models::complaint::UpdateComplaint,
            complaints::ComplaintStatusRequest,
            // Enums
            crate::models::OperabilityStatus,
            crate::models::TaskPriority,
            crate::models::TaskStatus,
            crate::models::ComplaintStatus,
            crate::models::FileCategory,
            crate::models::AccountRole,
            crate::models::ApprovalStatus,
            // Stats
            crate::services::stats::Statistics,
            crate::summary::EquipmentSummary,
            crate::summary::StatusCount,
            // Filtering
            crate::filter::FilterQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration, sign-in and session"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "equipment-logs", description = "Maintenance logs"),
        (name = "tasks", description = "Task assignments"),
        (name = "schedules", description = "Activity schedule"),
        (name = "files", description = "Document archive"),
        (name = "accounts", description = "Account approval"),
        (name = "complaints", description = "Complaints"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
