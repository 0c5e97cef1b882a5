use axum::{middleware as axum_middleware, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use effectif_api::state::AppState;
use effectif_api::{config, database, handlers, middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Effectif API in {:?} mode", config.environment);

    let state = AppState::new().unwrap_or_else(|e| panic!("database setup failed: {}", e));

    // Schema is owned by the migrations directory and applied at startup.
    // A failure here leaves the server up but degraded, visible on /health.
    if let Err(e) = sqlx::migrate!("./migrations").run(&state.pool).await {
        tracing::warn!("migrations not applied: {}", e);
    }

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("EFFECTIF_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Effectif API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resource groups
        .merge(auth_routes())
        .merge(employee_routes())
        .merge(task_routes())
        .merge(leave_routes())
        .merge(attendance_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/create", post(auth::create))
        .route("/token", post(auth::token))
        // Bearer token required; the middleware injects the subject
        .route(
            "/employees/me",
            get(auth::me).layer(axum_middleware::from_fn(middleware::jwt_auth_middleware)),
        )
}

fn employee_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::employees;

    Router::new()
        .route("/add_user", post(employees::add_user))
        .route("/employees", get(employees::list))
        .route(
            "/employee/:id",
            get(employees::get).put(employees::update),
        )
        .route("/employees/:id/absences", get(employees::absences))
        .route("/employees/absences", get(employees::absences_overview))
}

fn task_routes() -> Router<AppState> {
    use axum::routing::{post, put};
    use handlers::tasks;

    Router::new()
        .route("/tache/create", post(tasks::create))
        .route("/employee/:id/tasks", get(tasks::list_for_employee))
        .route("/task/complete/:id", put(tasks::complete))
}

fn leave_routes() -> Router<AppState> {
    use axum::routing::{post, put};
    use handlers::leaves;

    Router::new()
        .route("/conge/request/:employee_id", post(leaves::request))
        .route("/conge/validate/:id", put(leaves::validate))
        .route("/conges/demandes", get(leaves::pending))
}

fn attendance_routes() -> Router<AppState> {
    use axum::routing::{post, put};
    use handlers::attendance;

    Router::new()
        .route("/check_in/:employee_id", post(attendance::check_in))
        .route("/check_out/:employee_id", post(attendance::check_out))
        .route("/check_in_out/:date", get(attendance::for_date))
        .route("/check_in_out/employee/:id", get(attendance::for_employee))
        .route("/absence/:employee_id", put(attendance::mark_absence))
        .route("/employees/:id/delays", get(attendance::delays))
        .route("/employees/delays", get(attendance::delays_overview))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Effectif API",
            "version": version,
            "description": "Employee management backend built with Rust (Axum)",
            "endpoints": {
                "auth": "/auth/login, /auth/create, /token, /employees/me",
                "employees": "/add_user, /employees, /employee/:id",
                "tasks": "/tache/create, /employee/:id/tasks, /task/complete/:id",
                "leave": "/conge/request/:id, /conge/validate/:id, /conges/demandes",
                "attendance": "/check_in/:id, /check_out/:id, /check_in_out/:date, /absence/:id",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
