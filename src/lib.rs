// chirpstack-client - device management for the ChirpStack network server
// Library exports

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::DeviceApiClient;
pub use config::{load_config, ClientConfig, TransportKind};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use types::{
    Device, DeviceListItem, DeviceListPage, LinkMetrics, Metric, MetricDataset, MetricsQuery,
    NewDevice, DEFAULT_PAGE_SIZE,
};
