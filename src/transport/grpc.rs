// gRPC binding for the ChirpStack DeviceService
//
// Dials `http://<server_address>` lazily (no I/O at construction) and
// issues unary calls with `authorization: Bearer <token>` metadata. Every
// tonic::Status comes back through the uniform ApiError mapping.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::{Channel, Endpoint};

use super::proto;
use super::DeviceTransport;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{Device, DeviceListItem, DeviceListPage, LinkMetrics, Metric, MetricsQuery};

const GET_PATH: &str = "/api.DeviceService/Get";
const LIST_PATH: &str = "/api.DeviceService/List";
const CREATE_PATH: &str = "/api.DeviceService/Create";
const DELETE_PATH: &str = "/api.DeviceService/Delete";
const LINK_METRICS_PATH: &str = "/api.DeviceService/GetLinkMetrics";

pub struct GrpcTransport {
    inner: Grpc<Channel>,
    auth: AsciiMetadataValue,
}

impl GrpcTransport {
    /// Build the transport. The channel connects on first use, so this
    /// performs no network I/O.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let endpoint = Endpoint::from_shared(format!("http://{}", config.server_address))
            .with_context(|| format!("Invalid server address {}", config.server_address))?
            .timeout(timeout)
            .connect_timeout(timeout);
        let auth = AsciiMetadataValue::try_from(format!("Bearer {}", config.api_token))
            .context("API token is not a valid header value")?;

        Ok(Self {
            inner: Grpc::new(endpoint.connect_lazy()),
            auth,
        })
    }

    async fn unary<Req, Resp>(&self, path: &'static str, message: Req) -> ApiResult<Resp>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
    {
        // Channel handles are cheap clones over one shared connection.
        let mut grpc = self.inner.clone();
        grpc.ready().await.map_err(|e| {
            ApiError::transport(format!("Failed to reach server: {e}"), format!("{e:?}"))
        })?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let mut request = tonic::Request::new(message);
        request.metadata_mut().insert("authorization", self.auth.clone());

        let response = grpc
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map_err(|status| ApiError::from_grpc(&status))?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl DeviceTransport for GrpcTransport {
    async fn get_device(&self, dev_eui: &str) -> ApiResult<Device> {
        let request = proto::GetDeviceRequest {
            dev_eui: dev_eui.to_string(),
        };
        let response: proto::GetDeviceResponse = self.unary(GET_PATH, request).await?;
        response.device.map(device_from_proto).ok_or_else(|| ApiError {
            kind: crate::error::ErrorKind::Server,
            message: "Response is missing the device object".to_string(),
            code: 0,
            debug: String::new(),
        })
    }

    async fn list_devices(
        &self,
        application_id: &str,
        limit: u32,
        offset: u32,
    ) -> ApiResult<DeviceListPage> {
        let request = proto::ListDevicesRequest {
            limit,
            offset,
            application_id: application_id.to_string(),
        };
        let response: proto::ListDevicesResponse = self.unary(LIST_PATH, request).await?;
        Ok(DeviceListPage {
            total_count: response.total_count,
            result: response.result.into_iter().map(list_item_from_proto).collect(),
        })
    }

    async fn create_device(&self, device: &Device) -> ApiResult<()> {
        let request = proto::CreateDeviceRequest {
            device: Some(device_to_proto(device)),
        };
        let _: proto::Empty = self.unary(CREATE_PATH, request).await?;
        Ok(())
    }

    async fn delete_device(&self, dev_eui: &str) -> ApiResult<()> {
        let request = proto::DeleteDeviceRequest {
            dev_eui: dev_eui.to_string(),
        };
        let _: proto::Empty = self.unary(DELETE_PATH, request).await?;
        Ok(())
    }

    async fn get_device_metrics(
        &self,
        dev_eui: &str,
        query: &MetricsQuery,
    ) -> ApiResult<LinkMetrics> {
        let request = proto::GetDeviceLinkMetricsRequest {
            dev_eui: dev_eui.to_string(),
            start: query.start.map(to_proto_timestamp),
            end: query.end.map(to_proto_timestamp),
            aggregation: query
                .aggregation
                .as_deref()
                .map(aggregation_value)
                .unwrap_or_default(),
        };
        let response: proto::GetDeviceLinkMetricsResponse =
            self.unary(LINK_METRICS_PATH, request).await?;
        Ok(LinkMetrics {
            rx_packets: response.rx_packets.map(metric_from_proto),
            gw_rssi: response.gw_rssi.map(metric_from_proto),
            gw_snr: response.gw_snr.map(metric_from_proto),
            rx_packets_per_freq: response.rx_packets_per_freq.map(metric_from_proto),
            rx_packets_per_dr: response.rx_packets_per_dr.map(metric_from_proto),
            errors: response.errors.map(metric_from_proto),
        })
    }
}

/// Map a bucketing hint onto `common.Aggregation`. Unknown hints fall back
/// to the server's default bucketing.
fn aggregation_value(hint: &str) -> i32 {
    match hint.to_ascii_uppercase().as_str() {
        "HOUR" => proto::Aggregation::Hour as i32,
        "DAY" => proto::Aggregation::Day as i32,
        "MONTH" => proto::Aggregation::Month as i32,
        other => {
            tracing::warn!(hint = other, "Unknown aggregation hint, using server default");
            proto::Aggregation::Hour as i32
        }
    }
}

fn to_proto_timestamp(dt: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

fn timestamp_to_rfc3339(ts: &prost_types::Timestamp) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts.seconds, ts.nanos.max(0) as u32)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
}

fn device_from_proto(device: proto::Device) -> Device {
    Device {
        dev_eui: device.dev_eui,
        name: device.name,
        description: device.description,
        application_id: device.application_id,
        device_profile_id: device.device_profile_id,
        is_disabled: device.is_disabled,
        skip_fcnt_check: device.skip_fcnt_check,
    }
}

fn device_to_proto(device: &Device) -> proto::Device {
    proto::Device {
        dev_eui: device.dev_eui.clone(),
        name: device.name.clone(),
        description: device.description.clone(),
        application_id: device.application_id.clone(),
        device_profile_id: device.device_profile_id.clone(),
        skip_fcnt_check: device.skip_fcnt_check,
        is_disabled: device.is_disabled,
    }
}

fn list_item_from_proto(item: proto::DeviceListItem) -> DeviceListItem {
    DeviceListItem {
        dev_eui: item.dev_eui,
        name: item.name,
        description: item.description,
        device_profile_id: item.device_profile_id,
        device_profile_name: item.device_profile_name,
        created_at: item.created_at.as_ref().and_then(timestamp_to_rfc3339),
        updated_at: item.updated_at.as_ref().and_then(timestamp_to_rfc3339),
        last_seen_at: item.last_seen_at.as_ref().and_then(timestamp_to_rfc3339),
    }
}

fn metric_from_proto(metric: proto::Metric) -> Metric {
    Metric {
        name: metric.name,
        timestamps: metric
            .timestamps
            .iter()
            .filter_map(timestamp_to_rfc3339)
            .collect(),
        datasets: metric
            .datasets
            .into_iter()
            .map(|d| crate::types::MetricDataset {
                label: d.label,
                data: d.data,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportKind;

    fn config() -> ClientConfig {
        ClientConfig {
            server_address: "localhost:8080".into(),
            api_token: "t".into(),
            application_id: "app1".into(),
            device_eui: "a8610a35392c6606".into(),
            transport: TransportKind::Grpc,
            request_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn construction_performs_no_io() {
        // No server is listening on this address; construction must still
        // succeed because the channel is lazy.
        assert!(GrpcTransport::new(&config()).is_ok());
    }

    #[test]
    fn rejects_token_with_invalid_header_bytes() {
        let mut config = config();
        config.api_token = "bad\ntoken".into();
        assert!(GrpcTransport::new(&config).is_err());
    }

    #[test]
    fn aggregation_hints() {
        assert_eq!(aggregation_value("day"), proto::Aggregation::Day as i32);
        assert_eq!(aggregation_value("HOUR"), proto::Aggregation::Hour as i32);
        assert_eq!(aggregation_value("Month"), proto::Aggregation::Month as i32);
        assert_eq!(aggregation_value("fortnight"), proto::Aggregation::Hour as i32);
    }

    #[test]
    fn timestamp_conversion_round_trips() {
        let dt = DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = to_proto_timestamp(dt);
        assert_eq!(ts.seconds, dt.timestamp());
        assert_eq!(
            timestamp_to_rfc3339(&ts).as_deref(),
            Some("2023-01-01T00:00:00Z")
        );
    }

    #[tokio::test]
    async fn unreachable_server_surfaces_transport_error() {
        let mut config = config();
        // Nothing listens on port 1.
        config.server_address = "127.0.0.1:1".into();
        config.request_timeout_secs = 2;
        let transport = GrpcTransport::new(&config).unwrap();
        let err = transport.get_device("a8610a35392c6606").await.unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Transport);
    }
}
