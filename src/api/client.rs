use crate::api::models::{
    AccessToken, GitBranchUpdate, LookmlModel, LookmlModelExplore, LoginRequest, Query,
    SessionUpdate, WriteQuery,
};
use crate::core::services::traits::LookerApi;
use crate::error::ApiError;
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use crate::utils::url::compose_url;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("fonz/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct LookerClient {
    client: Client,
    pub api_root: String,
    access_token: Option<String>,
    query_timeout_secs: u64,
}

impl LookerClient {
    // Create a client for an API root such as https://host:19999/api/3.1/
    pub fn new(api_root: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", DEFAULT_TIMEOUT_SECS))?;

        Ok(LookerClient {
            client,
            api_root,
            access_token: None,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        })
    }

    pub fn with_query_timeout(mut self, secs: u64) -> Self {
        self.query_timeout_secs = secs;
        self
    }

    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn build_request(&self, method: Method, parts: &[&str]) -> RequestBuilder {
        let url = compose_url(&self.api_root, parts);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("token {}", token));
        }

        request
    }

    async fn send(
        &self,
        request: RequestBuilder,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, timeout_secs))
    }

    /// `timeout_secs` is the limit the request was sent with
    pub async fn handle_response<T>(
        response: Response,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = Self::check_status(response, endpoint, timeout_secs).await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, endpoint, timeout_secs))?;

        serde_json::from_str(&body).map_err(|e| convert_json_error(e, endpoint, status))
    }

    async fn check_status(
        response: Response,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                server_message: error_text,
            }),
            408 | 504 => Err(ApiError::Timeout {
                timeout_secs,
                endpoint: endpoint.to_string(),
            }),
            _ => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: error_text,
            }),
        }
    }
}

#[async_trait]
impl LookerApi for LookerClient {
    async fn login(&mut self, client_id: &str, client_secret: &str) -> Result<(), ApiError> {
        let endpoint = "login";
        let form = LoginRequest {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };

        // Login happens before a token exists, so no auth header here
        let request = self
            .client
            .post(compose_url(&self.api_root, &[endpoint]))
            .form(&form);
        let response = self.send(request, endpoint, DEFAULT_TIMEOUT_SECS).await?;
        let token: AccessToken =
            Self::handle_response(response, endpoint, DEFAULT_TIMEOUT_SECS).await?;

        self.set_access_token(token.access_token);
        Ok(())
    }

    async fn update_session(&self, update: &SessionUpdate) -> Result<(), ApiError> {
        let endpoint = "session";
        let request = self.build_request(Method::PATCH, &[endpoint]).json(update);
        let response = self.send(request, endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Self::check_status(response, endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Ok(())
    }

    async fn update_git_branch(&self, project: &str, branch: &str) -> Result<(), ApiError> {
        let parts = ["projects", project, "git_branch"];
        let endpoint = parts.join("/");
        let body = GitBranchUpdate {
            name: branch.to_string(),
        };
        let request = self.build_request(Method::PUT, &parts).json(&body);
        let response = self.send(request, &endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Self::check_status(response, &endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Ok(())
    }

    async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>, ApiError> {
        let endpoint = "lookml_models";
        let request = self.build_request(Method::GET, &[endpoint]);
        let response = self.send(request, endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Self::handle_response(response, endpoint, DEFAULT_TIMEOUT_SECS).await
    }

    async fn lookml_model_explore(
        &self,
        model: &str,
        explore: &str,
    ) -> Result<LookmlModelExplore, ApiError> {
        let parts = ["lookml_models", model, "explores", explore];
        let endpoint = parts.join("/");
        let request = self.build_request(Method::GET, &parts);
        let response = self.send(request, &endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Self::handle_response(response, &endpoint, DEFAULT_TIMEOUT_SECS).await
    }

    async fn create_query(&self, query: &WriteQuery) -> Result<Query, ApiError> {
        let endpoint = "queries";
        let request = self.build_request(Method::POST, &[endpoint]).json(query);
        let response = self.send(request, endpoint, DEFAULT_TIMEOUT_SECS).await?;
        Self::handle_response(response, endpoint, DEFAULT_TIMEOUT_SECS).await
    }

    async fn run_query(&self, query_id: &str) -> Result<Value, ApiError> {
        let parts = ["queries", query_id, "run", "json"];
        let endpoint = parts.join("/");

        // Generated SQL can be slow, so query runs get their own timeout
        let request = self
            .build_request(Method::GET, &parts)
            .timeout(Duration::from_secs(self.query_timeout_secs));
        let response = self.send(request, &endpoint, self.query_timeout_secs).await?;
        Self::handle_response(response, &endpoint, self.query_timeout_secs).await
    }
}
