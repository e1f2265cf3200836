// Transport strategy for the device-management facade
//
// One trait, two bindings: the native gRPC API and the REST gateway. The
// facade picks an implementation from the configuration; both normalize
// every failure into the ApiError envelope before it crosses this seam.

mod grpc;
pub mod proto;
mod rest;

pub use grpc::GrpcTransport;
pub use rest::RestTransport;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{ClientConfig, TransportKind};
use crate::error::ApiResult;
use crate::types::{Device, DeviceListPage, LinkMetrics, MetricsQuery};

/// Device-management operations, independent of wire protocol.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    async fn get_device(&self, dev_eui: &str) -> ApiResult<Device>;

    async fn list_devices(
        &self,
        application_id: &str,
        limit: u32,
        offset: u32,
    ) -> ApiResult<DeviceListPage>;

    async fn create_device(&self, device: &Device) -> ApiResult<()>;

    async fn delete_device(&self, dev_eui: &str) -> ApiResult<()>;

    async fn get_device_metrics(
        &self,
        dev_eui: &str,
        query: &MetricsQuery,
    ) -> ApiResult<LinkMetrics>;
}

/// Build the transport selected by the configuration.
pub fn from_config(config: &ClientConfig) -> Result<Box<dyn DeviceTransport>> {
    Ok(match config.transport {
        TransportKind::Grpc => Box::new(GrpcTransport::new(config)?),
        TransportKind::Rest => Box::new(RestTransport::new(config)?),
    })
}
