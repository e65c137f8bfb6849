use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware,
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{handlers, middleware as mw, openapi::ApiDoc, AppState};

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    match origin {
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => cors.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "CORS_ORIGIN is not a valid header value, allowing any origin");
                cors.allow_origin(Any)
            }
        },
        None => cors.allow_origin(Any),
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    // request_id is filled in by the request id middleware
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    // Training routes
    let training_routes = Router::new().route(
        "/",
        get(handlers::training_handler::get_training_tasks)
            .post(handlers::training_handler::save_training_tasks),
    );

    // Food routes
    let food_routes = Router::new()
        .route(
            "/",
            get(handlers::food_handler::get_food_entries)
                .post(handlers::food_handler::create_food_entry)
                .delete(handlers::food_handler::delete_all_food_entries),
        )
        .route(
            "/{id}",
            put(handlers::food_handler::update_food_entry)
                .delete(handlers::food_handler::delete_food_entry),
        );

    // Potty routes
    let potty_routes = Router::new()
        .route(
            "/",
            get(handlers::potty_handler::get_potty_entries)
                .post(handlers::potty_handler::create_potty_entry)
                .delete(handlers::potty_handler::delete_all_potty_entries),
        )
        .route(
            "/{id}",
            put(handlers::potty_handler::update_potty_entry)
                .delete(handlers::potty_handler::delete_potty_entry),
        );

    // Sleep routes
    let sleep_routes = Router::new()
        .route(
            "/",
            get(handlers::sleep_handler::get_sleep_entries)
                .post(handlers::sleep_handler::create_sleep_entry),
        )
        .route(
            "/{id}",
            put(handlers::sleep_handler::update_sleep_entry)
                .delete(handlers::sleep_handler::delete_sleep_entry),
        );

    // Nap routes - fixed actions, no ids
    let nap_routes = Router::new()
        .route("/", get(handlers::nap_handler::get_active_nap))
        .route("/start", post(handlers::nap_handler::start_nap))
        .route("/stop", post(handlers::nap_handler::stop_nap))
        .route("/cancel", post(handlers::nap_handler::cancel_nap));

    // Everything the client talks to lives under /api
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/sync", get(handlers::sync_handler::get_sync))
        .route(
            "/puppy-info",
            get(handlers::puppy_handler::get_puppy_info).post(handlers::puppy_handler::save_puppy_info),
        )
        .route(
            "/todo-entries",
            get(handlers::todo_handler::get_todo_entries).post(handlers::todo_handler::save_todo_entry),
        )
        .nest("/training-tasks", training_routes)
        .nest("/food-entries", food_routes)
        .nest("/potty-entries", potty_routes)
        .nest("/sleep-entries", sleep_routes)
        .nest("/active-nap", nap_routes);

    Router::new()
        .nest("/api", api)
        // Prometheus scrape endpoint
        .route("/metrics", get(handlers::metrics_handler))
        // API documentation
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        // Layers run outermost-last: CORS sees the request first
        .layer(middleware::from_fn(mw::metrics_middleware))
        .layer(middleware::from_fn(mw::request_id_middleware))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Puppy Tracker API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui'
            });
        };
    </script>
</body>
</html>
    "#)
}
