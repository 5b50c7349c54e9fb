//! Management API client bound to one endpoint, and the factory minting it.
//!
//! # Design
//! `ManagementClient` holds a base route, the endpoint derived from it and a
//! shared handle to the host's transport. It carries no mutable state. Each
//! remote operation is split into a `build_*` method producing an
//! `HttpRequest` and a `parse_*` method consuming an `HttpResponse`; the
//! async method in between only hands the request to the transport. This
//! keeps request shapes and status handling testable without any I/O.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::identity::AuthorizationContext;
use crate::types::{ProcessModel, ProcessModelList, UpdateProcessModelPayload};

/// Creates `ManagementClient`s for arbitrary base routes over one transport.
#[derive(Clone)]
pub struct ClientFactory {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl ClientFactory {
    pub fn new(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// A new client for `base_route`. Does not touch the network.
    pub fn create_client(&self, base_route: &str) -> ManagementClient {
        let segment = self.config.api_segment.trim_matches('/');
        ManagementClient {
            base_route: base_route.to_string(),
            endpoint: format!("{base_route}/{segment}"),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for the management API of a single endpoint.
#[derive(Clone)]
pub struct ManagementClient {
    base_route: String,
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ManagementClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementClient")
            .field("base_route", &self.base_route)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ManagementClient {
    /// Route this client was created for. Diagram URIs are rooted here.
    pub fn base_route(&self) -> &str {
        &self.base_route
    }

    /// Base URL every request path starts with.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn list_process_models(
        &self,
        context: &AuthorizationContext,
    ) -> Result<ProcessModelList> {
        let request = self.build_list_process_models(context);
        debug!(endpoint = %self.endpoint, "listing process models");
        let response = self.transport.execute(request).await?;
        self.parse_list_process_models(response)
    }

    pub async fn get_process_model_by_id(
        &self,
        context: &AuthorizationContext,
        id: &str,
    ) -> Result<ProcessModel> {
        let request = self.build_get_process_model(context, id);
        debug!(endpoint = %self.endpoint, process_model_id = id, "fetching process model");
        let response = self.transport.execute(request).await?;
        self.parse_get_process_model(response)
    }

    pub async fn update_process_model_by_id(
        &self,
        context: &AuthorizationContext,
        id: &str,
        payload: &UpdateProcessModelPayload,
    ) -> Result<()> {
        let request = self.build_update_process_model(context, id, payload)?;
        debug!(endpoint = %self.endpoint, process_model_id = id, "updating process model");
        let response = self.transport.execute(request).await?;
        self.parse_update_process_model(response)
    }

    pub fn build_list_process_models(&self, context: &AuthorizationContext) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/process_models", self.endpoint),
            headers: auth_headers(context),
            body: None,
        }
    }

    pub fn build_get_process_model(&self, context: &AuthorizationContext, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/process_models/{}", self.endpoint, urlencoding::encode(id)),
            headers: auth_headers(context),
            body: None,
        }
    }

    pub fn build_update_process_model(
        &self,
        context: &AuthorizationContext,
        id: &str,
        payload: &UpdateProcessModelPayload,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = auth_headers(context);
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!(
                "{}/process_models/{}/update",
                self.endpoint,
                urlencoding::encode(id)
            ),
            headers,
            body: Some(body),
        })
    }

    pub fn parse_list_process_models(&self, response: HttpResponse) -> Result<ProcessModelList> {
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_process_model(&self, response: HttpResponse) -> Result<ProcessModel> {
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_process_model(&self, response: HttpResponse) -> Result<()> {
        check_status(&response, &[200, 204])
    }
}

fn auth_headers(context: &AuthorizationContext) -> Vec<(String, String)> {
    context
        .authorization_header()
        .map(|value| vec![("authorization".to_string(), value)])
        .unwrap_or_default()
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<()> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        401 | 403 => Err(ApiError::Unauthorized {
            status: response.status,
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
