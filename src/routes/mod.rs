use axum::http::HeaderValue;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::models::{
    Board, BoardUser, BoardUserRole, Comment, Company, Department, Permission, Role,
    RolePermission, Task, User, UserDepartment,
};
use crate::services::EntityStore;
use crate::state::AppState;

pub mod crud;
pub mod health;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router<()> {
    let cors = build_cors(state.config.cors_allowed_origin.as_deref());

    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(api_routes::<Company>())
        .merge(api_routes::<Department>())
        .merge(api_routes::<Board>())
        .merge(api_routes::<User>())
        .merge(api_routes::<Task>())
        .merge(api_routes::<Comment>())
        .merge(api_routes::<Role>())
        .merge(api_routes::<Permission>())
        .merge(api_routes::<BoardUser>())
        .merge(api_routes::<BoardUserRole>())
        .merge(api_routes::<RolePermission>())
        .merge(api_routes::<UserDepartment>())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

fn api_routes<E: EntityStore>() -> Router<AppState> {
    Router::new().nest(&crud::resource_path::<E>(), crud::resource_routes::<E>())
}

fn build_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allow_origin = match allowed_origins {
        Some(origins) => {
            let headers: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .filter_map(|value| match value.parse::<HeaderValue>() {
                    Ok(header) => Some(header),
                    Err(_) => {
                        warn!(origin = value, "ignoring invalid CORS allowed origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(headers)
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
        .allow_credentials(true)
}
