// Device-management facade for the ChirpStack network server
//
// Holds the immutable connection parameters and one transport binding
// (gRPC or REST, per configuration). Every operation returns the uniform
// ApiResult envelope; transport errors never escape in their native types.

use anyhow::Result;

use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::transport::{self, DeviceTransport};
use crate::types::{Device, DeviceListPage, LinkMetrics, MetricsQuery, NewDevice};

pub struct DeviceApiClient {
    transport: Box<dyn DeviceTransport>,
}

impl DeviceApiClient {
    /// Build a client for the configured server and transport. Performs no
    /// network I/O; connections are established on first call.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: transport::from_config(config)?,
        })
    }

    /// Build a client over an explicit transport. Test seam, and the hook
    /// for alternative bindings.
    pub fn with_transport(transport: Box<dyn DeviceTransport>) -> Self {
        Self { transport }
    }

    /// Fetch one device by its EUI.
    pub async fn get_device(&self, dev_eui: &str) -> ApiResult<Device> {
        warn_on_odd_eui(dev_eui);
        tracing::debug!(dev_eui, "Getting device");
        self.transport.get_device(dev_eui).await
    }

    /// Paged device listing for one application. `offset` is a zero-based
    /// skip count.
    pub async fn list_devices(
        &self,
        application_id: &str,
        limit: u32,
        offset: u32,
    ) -> ApiResult<DeviceListPage> {
        tracing::debug!(application_id, limit, offset, "Listing devices");
        self.transport
            .list_devices(application_id, limit, offset)
            .await
    }

    /// Register a new device, enabled and with frame-counter checking
    /// active. Not idempotent: a duplicate EUI surfaces as a Conflict
    /// error from the server.
    pub async fn create_device(&self, new_device: NewDevice) -> ApiResult<()> {
        warn_on_odd_eui(&new_device.dev_eui);
        tracing::debug!(dev_eui = %new_device.dev_eui, name = %new_device.name, "Creating device");
        let device = Device::from(new_device);
        self.transport.create_device(&device).await
    }

    /// Remove a device by EUI. NotFound error if it does not exist.
    pub async fn delete_device(&self, dev_eui: &str) -> ApiResult<()> {
        warn_on_odd_eui(dev_eui);
        tracing::debug!(dev_eui, "Deleting device");
        self.transport.delete_device(dev_eui).await
    }

    /// Link metrics for one device over an optional time range, with an
    /// optional bucketing hint.
    pub async fn get_device_metrics(
        &self,
        dev_eui: &str,
        query: &MetricsQuery,
    ) -> ApiResult<LinkMetrics> {
        warn_on_odd_eui(dev_eui);
        tracing::debug!(dev_eui, ?query.start, ?query.end, "Getting device metrics");
        self.transport.get_device_metrics(dev_eui, query).await
    }
}

/// Advisory check only: the server is authoritative on EUI validity, so a
/// malformed EUI is logged and the call still goes out.
fn warn_on_odd_eui(dev_eui: &str) {
    if !looks_like_dev_eui(dev_eui) {
        tracing::warn!(dev_eui, "Device EUI does not look like 16 hex characters");
    }
}

fn looks_like_dev_eui(dev_eui: &str) -> bool {
    dev_eui.len() == 16 && dev_eui.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eui_format_check() {
        assert!(looks_like_dev_eui("a8610a35392c6606"));
        assert!(looks_like_dev_eui("A8610A35392C6606"));
        assert!(!looks_like_dev_eui(""));
        assert!(!looks_like_dev_eui("a8610a35392c66"));
        assert!(!looks_like_dev_eui("a8610a35392c660g"));
        assert!(!looks_like_dev_eui("a8610a35392c66061"));
    }

    #[tokio::test]
    async fn client_creation_without_io() {
        let config = ClientConfig {
            server_address: "localhost:8080".into(),
            api_token: "t".into(),
            application_id: "app1".into(),
            device_eui: "a8610a35392c6606".into(),
            transport: crate::config::TransportKind::Grpc,
            request_timeout_secs: 5,
        };
        assert!(DeviceApiClient::new(&config).is_ok());

        let config = ClientConfig {
            transport: crate::config::TransportKind::Rest,
            ..config
        };
        assert!(DeviceApiClient::new(&config).is_ok());
    }
}
