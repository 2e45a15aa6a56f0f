use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use platform_api::{
    AddEmployeeRequest, AddEmployeeResponse, ApiError, ApiResult, CompanyEmployeesRequest,
    DeleteEmployeeRequest, DeleteEmployeeResponse, EmployeeService, EmployeesResponse, ErrorBody,
    UpdateEmployeeRequest, UpdateEmployeeResponse, rpc,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

/// `EmployeeService` reached over HTTP.
#[derive(Clone, Debug)]
pub struct RemoteEmployeeService {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteEmployeeService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build employee service client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[instrument(name = "gateway.rpc", skip(self, request), fields(base_url = %self.base_url))]
    async fn call<Req, Resp>(&self, path: &'static str, request: &Req) -> ApiResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(request)
            .send()
            .await
            .map_err(|err| ApiError::Unavailable(err.to_string()))?;

        let status = response.status();
        debug!(%status, "employee service answered");
        if status.is_success() {
            return response
                .json::<Resp>()
                .await
                .map_err(|err| ApiError::internal(anyhow!(err).context("decode response")));
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(ApiError::from_body(body)),
            Err(_) => Err(ApiError::internal(anyhow!(
                "employee service answered {status} without an error body"
            ))),
        }
    }
}

#[async_trait]
impl EmployeeService for RemoteEmployeeService {
    async fn add_employee(&self, request: AddEmployeeRequest) -> ApiResult<AddEmployeeResponse> {
        self.call(rpc::ADD_EMPLOYEE, &request).await
    }

    async fn delete_employee(
        &self,
        request: DeleteEmployeeRequest,
    ) -> ApiResult<DeleteEmployeeResponse> {
        self.call(rpc::DELETE_EMPLOYEE, &request).await
    }

    async fn show_company_employees(
        &self,
        request: CompanyEmployeesRequest,
    ) -> ApiResult<EmployeesResponse> {
        self.call(rpc::SHOW_COMPANY_EMPLOYEES, &request).await
    }

    async fn update_employee(
        &self,
        request: UpdateEmployeeRequest,
    ) -> ApiResult<UpdateEmployeeResponse> {
        self.call(rpc::UPDATE_EMPLOYEE, &request).await
    }
}
