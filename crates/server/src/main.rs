// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use custreg_api::{
    ApiError, AuthError, AuthenticationService, CustomerPayload, CustomerResponse,
    DeleteCustomerResponse, ListCustomersRequest, ListCustomersResponse, StatsResponse,
    export_customers_csv,
};
use custreg_domain::MissingTimestampPolicy;
use custreg_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

mod session;

use session::SessionUser;

/// Customer Registry Server - HTTP server for the customer register
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// What the monthly registration statistic reports when the customers
    /// table predates the registration timestamp column
    #[arg(long, value_enum, default_value = "zero")]
    month_stat_fallback: MonthStatFallback,
}

/// CLI selector for the monthly statistic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MonthStatFallback {
    /// Report zero registrations for the month.
    Zero,
    /// Report the total customer count for the month.
    Total,
}

impl From<MonthStatFallback> for MissingTimestampPolicy {
    fn from(fallback: MonthStatFallback) -> Self {
        match fallback {
            MonthStatFallback::Zero => Self::ReportZero,
            MonthStatFallback::Total => Self::ReportTotal,
        }
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for customers, users, and sessions.
    persistence: Arc<Mutex<Persistence>>,
    /// Policy for the monthly statistic on timestamp-less schemas.
    month_stat_policy: MissingTimestampPolicy,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginRequest {
    /// The claimed username.
    username: String,
    /// The plaintext password.
    password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginResponse {
    /// The opaque session token for subsequent requests.
    token: String,
    /// The authenticated username.
    username: String,
}

/// API response for logging out.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LogoutResponse {
    /// Success indicator.
    success: bool,
}

/// Query parameters for listing customers.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Optional name-substring filter.
    search: Option<String>,
    /// Optional sort token.
    sort: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidSession { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            AuthError::Storage { .. } => {
                error!(error = %err, "Authentication storage error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Handler for POST /login endpoint.
///
/// Verifies the supplied credentials and issues a session token.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let persistence = app_state.persistence.lock().await;
    let (token, user) = AuthenticationService::login(&persistence, &req.username, &req.password)?;
    drop(persistence);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}

/// Handler for POST /logout endpoint.
///
/// Clears the caller's session. Logging out twice is harmless.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Result<Json<LogoutResponse>, HttpError> {
    info!(username = %user.username, "Handling logout request");

    let persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&persistence, &token)?;
    drop(persistence);

    Ok(Json(LogoutResponse { success: true }))
}

/// Handler for GET /customers endpoint.
///
/// Lists customers, optionally filtered by name substring and sorted.
async fn handle_list_customers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListCustomersResponse>, HttpError> {
    info!(
        username = %user.username,
        search = ?query.search,
        sort = ?query.sort,
        "Handling list_customers request"
    );

    let request: ListCustomersRequest = ListCustomersRequest {
        search: query.search,
        sort: query.sort,
    };

    let persistence = app_state.persistence.lock().await;
    let response: ListCustomersResponse = custreg_api::list_customers(&persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /customers endpoint.
///
/// Creates a new customer.
async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(
        username = %user.username,
        name = %payload.name,
        "Handling create_customer request"
    );

    let persistence = app_state.persistence.lock().await;
    let response: CustomerResponse = custreg_api::create_customer(&persistence, &payload)?;
    drop(persistence);

    info!(id = response.id, "Successfully created customer");

    Ok(Json(response))
}

/// Handler for GET `/customers/{id}` endpoint.
///
/// Returns a single customer by id.
async fn handle_get_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(username = %user.username, id = id, "Handling get_customer request");

    let persistence = app_state.persistence.lock().await;
    let response: CustomerResponse = custreg_api::get_customer(&persistence, id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/customers/{id}` endpoint.
///
/// Replaces a customer's name, email, and phone.
async fn handle_update_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(username = %user.username, id = id, "Handling update_customer request");

    let persistence = app_state.persistence.lock().await;
    let response: CustomerResponse = custreg_api::update_customer(&persistence, id, &payload)?;
    drop(persistence);

    info!(id = id, "Successfully updated customer");

    Ok(Json(response))
}

/// Handler for DELETE `/customers/{id}` endpoint.
///
/// Deletes a customer. Deleting an id that does not exist still succeeds.
async fn handle_delete_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteCustomerResponse>, HttpError> {
    info!(username = %user.username, id = id, "Handling delete_customer request");

    let persistence = app_state.persistence.lock().await;
    let response: DeleteCustomerResponse = custreg_api::delete_customer(&persistence, id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /stats endpoint.
///
/// Returns aggregate statistics over the customer register.
async fn handle_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<StatsResponse>, HttpError> {
    info!(username = %user.username, "Handling stats request");

    let persistence = app_state.persistence.lock().await;
    let response: StatsResponse =
        custreg_api::customer_stats(&persistence, app_state.month_stat_policy)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /export/csv endpoint.
///
/// Streams the full customer register as a timestamped CSV attachment.
async fn handle_export_csv(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Response, HttpError> {
    info!(username = %user.username, "Handling export_csv request");

    let persistence = app_state.persistence.lock().await;
    let bytes: Vec<u8> = export_customers_csv(&persistence).map_err(ApiError::from)?;
    drop(persistence);

    let filename: String = export_filename();

    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Builds the timestamped export filename, e.g. `customers_20260829_141500.csv`.
fn export_filename() -> String {
    let format = time::macros::format_description!("[year][month][day]_[hour][minute][second]");
    time::OffsetDateTime::now_utc().format(&format).map_or_else(
        |_| String::from("customers.csv"),
        |stamp| format!("customers_{stamp}.csv"),
    )
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route(
            "/customers",
            get(handle_list_customers).post(handle_create_customer),
        )
        .route(
            "/customers/{id}",
            get(handle_get_customer)
                .put(handle_update_customer)
                .delete(handle_delete_customer),
        )
        .route("/stats", get(handle_stats))
        .route("/export/csv", get(handle_export_csv))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Customer Registry Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Seed the admin account and, for an empty register, the sample customers
    persistence.ensure_admin()?;
    let seeded: usize = persistence.ensure_sample_customers()?;
    if seeded > 0 {
        info!(count = seeded, "Seeded sample customers");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        month_stat_policy: args.month_stat_fallback.into(),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use custreg_persistence::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
    use tower::ServiceExt;

    /// Helper to create test app state with seeded in-memory persistence.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence.ensure_admin().expect("Failed to seed admin");
        persistence
            .ensure_sample_customers()
            .expect("Failed to seed sample customers");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            month_stat_policy: MissingTimestampPolicy::ReportZero,
        }
    }

    /// Helper to log in with the seeded admin account and return the token.
    async fn login(app: &Router) -> String {
        let req_body: LoginRequest = LoginRequest {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login_response: LoginResponse = serde_json::from_slice(&body_bytes).unwrap();

        login_response.token
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_is_unauthorized() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let req_body: LoginRequest = LoginRequest {
            username: String::from("admin"),
            password: String::from("not-the-password"),
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert!(error_response.error);
    }

    #[tokio::test]
    async fn test_customers_require_a_session() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_customers_returns_seeded_rows() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let list: ListCustomersResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(list.customers.len(), 5);
    }

    #[tokio::test]
    async fn test_list_customers_with_search_and_sort() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers?search=an&sort=name_asc")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let list: ListCustomersResponse = serde_json::from_slice(&body_bytes).unwrap();

        let names: Vec<&str> = list.customers.iter().map(|c| c.name.as_str()).collect();
        let mut sorted: Vec<&str> = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(
            names
                .iter()
                .all(|name| name.to_lowercase().contains("an"))
        );
    }

    #[tokio::test]
    async fn test_customer_crud_lifecycle() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        // Create
        let payload: CustomerPayload = CustomerPayload {
            name: String::from("Helena Dias"),
            email: Some(String::from("helena@example.com")),
            phone: None,
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/customers")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: CustomerResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(created.name, "Helena Dias");

        // Update
        let update: CustomerPayload = CustomerPayload {
            name: String::from("Helena D. Martins"),
            email: None,
            phone: Some(String::from("31 96666-0000")),
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/customers/{}", created.id))
                    .header("Authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&update).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let updated: CustomerResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(updated.name, "Helena D. Martins");
        assert_eq!(updated.email, None);

        // Delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/customers/{}", created.id))
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let deleted: DeleteCustomerResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(deleted.deleted_name.as_deref(), Some("Helena D. Martins"));

        // Gone
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/customers/{}", created.id))
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_customer_with_empty_name_is_bad_request() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let payload: CustomerPayload = CustomerPayload {
            name: String::from("   "),
            email: None,
            phone: None,
        };
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/customers")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let payload: CustomerPayload = CustomerPayload {
            name: String::from("Ghost"),
            email: None,
            phone: None,
        };
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/customers/99999")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats_reflect_the_register() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/stats")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: StatsResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(stats.total, 5);
        assert!(stats.with_email <= stats.total);
        assert!(stats.with_phone <= stats.total);
    }

    #[tokio::test]
    async fn test_export_csv_is_a_timestamped_attachment() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/export/csv")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"customers_"));
        assert!(disposition.ends_with(".csv\""));

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text: String = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(text.starts_with("id,name,email,phone,registered_at"));
        assert_eq!(text.lines().count(), 6);
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_token() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let token: String = login(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }
}
