use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
};
use platform_api::{
    AddEmployeeRequest, AddEmployeeResponse, ApiError, ApiResult, CompanyEmployeesRequest,
    DeleteEmployeeRequest, DeleteEmployeeResponse, DepartmentMessage, EmployeeService,
    EmployeesResponse, UpdateEmployeeRequest, UpdateEmployeeResponse, shutdown_signal,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

#[derive(Clone)]
pub struct GatewayState {
    pub employees: Arc<dyn EmployeeService>,
    pub request_timeout: Duration,
}

impl GatewayState {
    pub fn new(employees: Arc<dyn EmployeeService>, request_timeout: Duration) -> Self {
        Self {
            employees,
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

pub async fn serve(config: ServeConfig, state: GatewayState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "api gateway listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

pub fn build_router(state: GatewayState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    let timeout = state.request_timeout;
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/employees",
            get(list_employees)
                .post(add_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
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
    State(state): State<GatewayState>,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<AddEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.add_employee(request).await.map(Json)
}

async fn delete_employee(
    State(state): State<GatewayState>,
    payload: Result<Json<DeleteEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<DeleteEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.delete_employee(request).await.map(Json)
}

async fn update_employee(
    State(state): State<GatewayState>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateEmployeeResponse>> {
    let Json(request) = payload?;
    state.employees.update_employee(request).await.map(Json)
}

/// Query-string form of `CompanyEmployeesRequest`, used when GET carries no body.
#[derive(Debug, Default, Deserialize)]
pub struct ListEmployeesQuery {
    pub company_id: Option<i32>,
    pub department_name: Option<String>,
    pub department_phone: Option<String>,
}

impl ListEmployeesQuery {
    fn into_request(self) -> ApiResult<CompanyEmployeesRequest> {
        let company_id = self
            .company_id
            .ok_or_else(|| ApiError::InvalidInput("company_id is required".into()))?;
        let department = match (self.department_name, self.department_phone) {
            (None, None) => None,
            (name, phone) => Some(DepartmentMessage {
                name: name.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
            }),
        };
        Ok(CompanyEmployeesRequest {
            company_id,
            department,
        })
    }
}

async fn list_employees(
    State(state): State<GatewayState>,
    query: Result<Query<ListEmployeesQuery>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<EmployeesResponse>> {
    let Query(query) = query?;
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        query.into_request()?
    } else {
        serde_json::from_slice::<CompanyEmployeesRequest>(&body)
            .map_err(|err| ApiError::InvalidInput(err.to_string()))?
    };
    state.employees.show_company_employees(request).await.map(Json)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}
