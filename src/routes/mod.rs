use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::handlers::{department, staff};
use crate::middleware::error_path_layer;
use crate::state::AppState;

pub mod health;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Staff routes
        .route("/staff", get(staff::list_staff).post(staff::create_staff))
        .route("/staff/search", get(staff::search_staff))
        .route("/staff/highest-paid", get(staff::highest_paid))
        .route("/staff/departments", get(department::list_departments))
        .route("/staff/salary/:min", get(staff::staff_by_minimum_salary))
        .route("/staff/salary-range", get(staff::staff_by_salary_range))
        .route("/staff/department/:id", get(staff::staff_by_department))
        .route("/staff/department/:id/count", get(staff::count_by_department))
        .route("/staff/department-name/:name", get(staff::staff_by_department_name))
        .route(
            "/staff/:id",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        )
        // Department routes
        .route(
            "/department",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/department/:id",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(error_path_layer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Known path, unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} is not supported on {}", method, uri.path()))
}
