use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use platform_api::{
    AddEmployeeRequest, AddEmployeeResponse, ApiResult, CompanyEmployeesRequest,
    DeleteEmployeeRequest, DeleteEmployeeResponse, EmployeeService, EmployeesResponse,
    UpdateEmployeeRequest, UpdateEmployeeResponse, rpc, shutdown_signal,
};
use platform_db::DbPool;
use products_hr::{HrEmployeeService, SeaOrmEmployeeRepository};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub employees: Arc<dyn EmployeeService>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire the SeaORM-backed HR service onto `pool`.
    pub fn new(pool: DbPool, request_timeout: Duration) -> Self {
        let repo = SeaOrmEmployeeRepository::new(pool.clone());
        Self {
            pool,
            employees: Arc::new(HrEmployeeService::new(repo)),
            request_timeout,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee service listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

/// RPC routes. A request that outlives `request_timeout` is dropped, which
/// drops its transaction uncommitted.
pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    let timeout = state.request_timeout;
    Router::new()
        .route("/health", get(health_handler))
        .route(rpc::ADD_EMPLOYEE, post(add_employee))
        .route(rpc::DELETE_EMPLOYEE, post(delete_employee))
        .route(rpc::SHOW_COMPANY_EMPLOYEES, post(show_company_employees))
        .route(rpc::UPDATE_EMPLOYEE, post(update_employee))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    timeout,
                )),
        )
        .with_state(state)
}

async fn add_employee(
    State(state): State<AppState>,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<AddEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.add_employee(request).await.map(Json)
}

async fn delete_employee(
    State(state): State<AppState>,
    payload: Result<Json<DeleteEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<DeleteEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.delete_employee(request).await.map(Json)
}

async fn show_company_employees(
    State(state): State<AppState>,
    payload: Result<Json<CompanyEmployeesRequest>, JsonRejection>,
) -> ApiResult<Json<EmployeesResponse>> {
    let Json(request) = payload?;
    state.employees.show_company_employees(request).await.map(Json)
}

async fn update_employee(
    State(state): State<AppState>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.update_employee(request).await.map(Json)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = platform_db::ping(&state.pool).await;
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}
