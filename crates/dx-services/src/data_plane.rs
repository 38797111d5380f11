//! Data-plane transport
//!
//! The dashboard talks to the data plane through one endpoint,
//! `POST {base_url}/invoke/{path}`, with a JSON body per API function.
//! `DataPlane::invoke` is the only method an implementation has to
//! provide; the typed methods shape the bodies and decode the responses.

use async_trait::async_trait;
use dx_core::wire::{
    ApiRow, DdlRequest, DeleteRowsRequest, InsertRowRequest, ListTableResponse,
    PaginateTableRequest, UpdateRowRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use crate::config::DataPlaneConfig;
use crate::error::{ServiceError, ServiceResult};

/// API function paths under `/invoke/`
pub mod endpoints {
    pub const LIST_TABLE: &str = "_plugins/schema/api.listTable";
    pub const DDL: &str = "_plugins/schema/api.ddl";
    pub const PAGINATE_TABLE: &str = "_plugins/table/api.paginateTable";
    pub const INSERT_ROW: &str = "_plugins/table/api.insertRow";
    pub const UPDATE_ROW: &str = "_plugins/table/api.updateRow";
    pub const DELETE_ROWS: &str = "_plugins/table/api.deleteRows";
}

/// Header routing a request to the attached environment
pub const DEV_HOST_HEADER: &str = "Darx-Dev-Host";

fn decode<T: DeserializeOwned>(value: Value) -> ServiceResult<T> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Client side of the data-plane API
#[async_trait]
pub trait DataPlane: Send + Sync {
    /// Invoke an API function and return its JSON response
    async fn invoke(&self, path: &str, body: Value) -> ServiceResult<Value>;

    async fn list_tables(&self) -> ServiceResult<ListTableResponse> {
        let response = self
            .invoke(endpoints::LIST_TABLE, json!({ "req": {} }))
            .await?;
        decode(response)
    }

    async fn ddl(&self, request: &DdlRequest) -> ServiceResult<()> {
        let request = serde_json::to_value(request)?;
        self.invoke(endpoints::DDL, json!({ "req": request })).await?;
        Ok(())
    }

    async fn paginate_table(&self, request: &PaginateTableRequest) -> ServiceResult<Vec<ApiRow>> {
        let response = self
            .invoke(endpoints::PAGINATE_TABLE, serde_json::to_value(request)?)
            .await?;
        decode(response)
    }

    async fn insert_row(&self, request: &InsertRowRequest) -> ServiceResult<()> {
        self.invoke(endpoints::INSERT_ROW, serde_json::to_value(request)?)
            .await?;
        Ok(())
    }

    async fn update_row(&self, request: &UpdateRowRequest) -> ServiceResult<()> {
        self.invoke(endpoints::UPDATE_ROW, serde_json::to_value(request)?)
            .await?;
        Ok(())
    }

    async fn delete_rows(&self, request: &DeleteRowsRequest) -> ServiceResult<()> {
        self.invoke(endpoints::DELETE_ROWS, serde_json::to_value(request)?)
            .await?;
        Ok(())
    }
}

/// `DataPlane` over HTTP
pub struct HttpDataPlane {
    client: Client,
    invoke_url: Url,
    dev_host: String,
}

impl HttpDataPlane {
    pub fn new(config: &DataPlaneConfig) -> ServiceResult<Self> {
        config.validate()?;

        let mut invoke_url = config.base_url()?;
        // Keep any path prefix on the base URL
        if !invoke_url.path().ends_with('/') {
            let path = format!("{}/", invoke_url.path());
            invoke_url.set_path(&path);
        }
        let invoke_url = invoke_url
            .join("invoke/")
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ServiceError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            invoke_url,
            dev_host: config.dev_host(),
        })
    }

    /// Full URL of an API function
    pub fn function_url(&self, path: &str) -> ServiceResult<Url> {
        self.invoke_url.join(path).map_err(|e| {
            ServiceError::Configuration(format!("invalid function path {:?}: {}", path, e))
        })
    }
}

#[async_trait]
impl DataPlane for HttpDataPlane {
    #[tracing::instrument(skip(self, body), fields(dev_host = %self.dev_host))]
    async fn invoke(&self, path: &str, body: Value) -> ServiceResult<Value> {
        let url = self.function_url(path)?;

        let response = self
            .client
            .post(url)
            .header(DEV_HOST_HEADER, &self.dev_host)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "data plane request failed");
                ServiceError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "data plane returned an error");
            return Err(ServiceError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}
