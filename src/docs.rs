use utoipa::OpenApi;

use crate::models;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::auth::register,
        routes::auth::login,
        routes::auth::me,
        routes::auth::logout,
        routes::users::list_users,
        routes::users::get_user,
        routes::users::update_user,
        routes::tasks::list_tasks,
        routes::tasks::create_task,
        routes::tasks::get_task,
        routes::tasks::update_task,
        routes::tasks::delete_task,
        routes::tasks::assign_task,
        routes::tasks::approve_task,
        routes::reports::list_reports,
        routes::reports::create_report,
        routes::reports::get_report,
        routes::reports::update_report,
        routes::reports::delete_report,
        routes::reports::decide_report,
        routes::events::list_events,
        routes::events::create_event,
        routes::events::get_event,
        routes::events::update_event,
        routes::events::delete_event,
        routes::chat::list_messages,
        routes::chat::post_message,
        routes::analytics::summary,
    ),
    components(schemas(
        crate::authz::Role,
        models::user::User,
        models::user::RegisterRequest,
        models::user::LoginRequest,
        models::user::AuthResponse,
        models::user::UserUpdateRequest,
        models::task::Task,
        models::task::TaskStatus,
        models::task::TaskCreateRequest,
        models::task::TaskUpdateRequest,
        models::task::TaskAssignRequest,
        models::report::Report,
        models::report::ReportStatus,
        models::report::ReportCreateRequest,
        models::report::ReportUpdateRequest,
        models::report::ReportDecision,
        models::report::ReportDecisionRequest,
        models::event::CalendarEvent,
        models::event::EventCreateRequest,
        models::event::EventUpdateRequest,
        models::message::ChatMessage,
        models::message::ChatPostRequest,
        routes::analytics::AnalyticsSummary,
        routes::health::HealthResponse,
    )),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Personnel directory and management"),
        (name = "Tasks", description = "Task assignment and tracking"),
        (name = "Reports", description = "Report approval workflow"),
        (name = "Events", description = "Calendar and scheduling"),
        (name = "Chat", description = "Unit chat"),
        (name = "Analytics", description = "Aggregate counters"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
