// REST binding for the ChirpStack API gateway
//
// Talks JSON to `http://<host>:8090/api/...` with a standard
// `Authorization: Bearer <token>` header (the gateway forwards it to gRPC
// metadata). Non-2xx statuses and reqwest failures come back through the
// uniform ApiError mapping.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::DeviceTransport;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{Device, DeviceListPage, LinkMetrics, MetricsQuery};

pub struct RestTransport {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct GetDeviceEnvelope {
    device: Device,
}

#[derive(Serialize)]
struct CreateDeviceEnvelope<'a> {
    device: &'a Device,
}

impl RestTransport {
    /// Build the transport against the gateway derived from the configured
    /// server address. No network I/O happens here.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::from_base_url(
            config.rest_base_url(),
            &config.api_token,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Build the transport against an explicit base URL. Used by tests and
    /// by deployments where the gateway is not co-hosted with the gRPC
    /// endpoint.
    pub fn from_base_url(
        base_url: impl Into<String>,
        api_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_token}"))
            .context("API token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn parse<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_http(status.as_u16(), &body));
        }
        response.json::<T>().await.map_err(ApiError::from)
    }

    async fn expect_ok(&self, response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_http(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceTransport for RestTransport {
    async fn get_device(&self, dev_eui: &str) -> ApiResult<Device> {
        let url = format!("{}/api/devices/{dev_eui}", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ApiError::from)?;
        let envelope: GetDeviceEnvelope = self.parse(response).await?;
        Ok(envelope.device)
    }

    async fn list_devices(
        &self,
        application_id: &str,
        limit: u32,
        offset: u32,
    ) -> ApiResult<DeviceListPage> {
        let url = format!("{}/api/devices", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("applicationId", application_id.to_string()),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;
        self.parse(response).await
    }

    async fn create_device(&self, device: &Device) -> ApiResult<()> {
        let url = format!("{}/api/devices", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateDeviceEnvelope { device })
            .send()
            .await
            .map_err(ApiError::from)?;
        self.expect_ok(response).await
    }

    async fn delete_device(&self, dev_eui: &str) -> ApiResult<()> {
        let url = format!("{}/api/devices/{dev_eui}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from)?;
        self.expect_ok(response).await
    }

    async fn get_device_metrics(
        &self,
        dev_eui: &str,
        query: &MetricsQuery,
    ) -> ApiResult<LinkMetrics> {
        let url = format!("{}/api/devices/{dev_eui}/link-metrics", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start) = query.start {
            params.push(("start", start.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(end) = query.end {
            params.push(("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(ref aggregation) = query.aggregation {
            params.push(("aggregation", aggregation.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(ApiError::from)?;
        self.parse(response).await
    }
}
