use std::sync::Arc;

use axum::http::Method;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::{AuthzMode, PolicyEvaluator, TablePolicy};
use crate::errors::AppError;
use crate::jwt::JwtConfig;
use crate::routes::{analytics, auth, chat, events, health, reports, tasks, users};
use crate::stores::{ChatStore, EventStore, ReportStore, TaskStore, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserDirectory>,
    pub tasks: Arc<TaskStore>,
    pub reports: Arc<ReportStore>,
    pub events: Arc<EventStore>,
    pub chat: Arc<ChatStore>,
    pub jwt: Arc<JwtConfig>,
    pub policy: Arc<dyn PolicyEvaluator>,
    pub authz: AuthzMode,
}

impl AppState {
    pub fn new(jwt: JwtConfig, authz: AuthzMode) -> Self {
        Self {
            users: Arc::new(UserDirectory::new()),
            tasks: Arc::new(TaskStore::new()),
            reports: Arc::new(ReportStore::new()),
            events: Arc::new(EventStore::new()),
            chat: Arc::new(ChatStore::new()),
            jwt: Arc::new(jwt),
            policy: Arc::new(TablePolicy::new()),
            authz,
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn PolicyEvaluator>) -> Self {
        self.policy = policy;
        self
    }

    /// Apply the enforcement mode to a guard verdict for a mutating call.
    pub fn enforce(&self, allowed: bool, what: &str) -> Result<(), AppError> {
        match self.authz {
            AuthzMode::Off => Ok(()),
            AuthzMode::Advisory => {
                if !allowed {
                    tracing::warn!(action = what, "authz denial (advisory mode)");
                }
                Ok(())
            }
            AuthzMode::Strict => {
                if allowed {
                    Ok(())
                } else {
                    Err(AppError::forbidden(format!("not allowed to {what}")))
                }
            }
        }
    }

    /// Visibility filter for list endpoints; only strict mode hides entries.
    pub fn permits(&self, allowed: bool) -> bool {
        match self.authz {
            AuthzMode::Off | AuthzMode::Advisory => true,
            AuthzMode::Strict => allowed,
        }
    }
}

pub async fn create_app() -> Result<Router, AppError> {
    let jwt = JwtConfig::from_env()?;
    let state = AppState::new(jwt, AuthzMode::from_env());
    Ok(create_app_with_state(state))
}

pub fn create_app_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout));

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/:id", get(users::get_user))
        .route("/:id", put(users::update_user));

    let task_routes = Router::new()
        .route("/", get(tasks::list_tasks))
        .route("/", post(tasks::create_task))
        .route("/:id", get(tasks::get_task))
        .route("/:id", put(tasks::update_task))
        .route("/:id", delete(tasks::delete_task))
        .route("/:id/assign", post(tasks::assign_task))
        .route("/:id/approve", post(tasks::approve_task));

    let report_routes = Router::new()
        .route("/", get(reports::list_reports))
        .route("/", post(reports::create_report))
        .route("/:id", get(reports::get_report))
        .route("/:id", put(reports::update_report))
        .route("/:id", delete(reports::delete_report))
        .route("/:id/decision", post(reports::decide_report));

    let event_routes = Router::new()
        .route("/", get(events::list_events))
        .route("/", post(events::create_event))
        .route("/:id", get(events::get_event))
        .route("/:id", put(events::update_event))
        .route("/:id", delete(events::delete_event));

    let chat_routes = Router::new()
        .route("/", get(chat::list_messages))
        .route("/", post(chat::post_message));

    Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/reports", report_routes)
        .nest("/events", event_routes)
        .nest("/chat", chat_routes)
        .route("/analytics/summary", get(analytics::summary))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
