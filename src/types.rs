// Device and metrics data model
//
// Field names mirror the ChirpStack JSON schema (camelCase on the wire);
// the gRPC transport maps its protobuf messages into these same types so
// callers see one shape regardless of transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size used by `list_devices` when the caller does not care.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A LoRaWAN end device as known to the network server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub dev_eui: String,
    pub name: String,
    pub description: String,
    pub application_id: String,
    pub device_profile_id: String,
    pub is_disabled: bool,
    pub skip_fcnt_check: bool,
}

/// Parameters for registering a new device.
///
/// Devices are created enabled and with frame-counter checking active;
/// `Device::from` fills in those defaults.
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub application_id: String,
    pub device_profile_id: String,
    pub name: String,
    pub dev_eui: String,
    pub description: String,
}

impl From<NewDevice> for Device {
    fn from(new: NewDevice) -> Self {
        Device {
            dev_eui: new.dev_eui,
            name: new.name,
            description: new.description,
            application_id: new.application_id,
            device_profile_id: new.device_profile_id,
            is_disabled: false,
            skip_fcnt_check: false,
        }
    }
}

/// One row of a device listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceListItem {
    pub dev_eui: String,
    pub name: String,
    pub description: String,
    pub device_profile_id: String,
    pub device_profile_name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_seen_at: Option<String>,
}

/// One page of a device listing: the rows plus the total count across all
/// pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceListPage {
    pub total_count: u32,
    pub result: Vec<DeviceListItem>,
}

/// Time range and bucketing for a metrics query. All fields optional; the
/// server applies its default range when unset.
#[derive(Debug, Clone, Default)]
pub struct MetricsQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Bucketing hint (e.g. "HOUR", "DAY", "MONTH"), forwarded to the
    /// server without validation.
    pub aggregation: Option<String>,
}

/// One named metric series: shared timestamps plus one or more datasets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    pub name: String,
    pub timestamps: Vec<String>,
    pub datasets: Vec<MetricDataset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricDataset {
    pub label: String,
    pub data: Vec<f32>,
}

/// Link-level telemetry for one device over the queried range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkMetrics {
    pub rx_packets: Option<Metric>,
    pub gw_rssi: Option<Metric>,
    pub gw_snr: Option<Metric>,
    pub rx_packets_per_freq: Option<Metric>,
    pub rx_packets_per_dr: Option<Metric>,
    pub errors: Option<Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_serializes_camel_case() {
        let device = Device {
            dev_eui: "a8610a35392c6606".into(),
            name: "sensor-1".into(),
            description: "test".into(),
            application_id: "app1".into(),
            device_profile_id: "prof1".into(),
            is_disabled: false,
            skip_fcnt_check: false,
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["devEui"], "a8610a35392c6606");
        assert_eq!(json["applicationId"], "app1");
        assert_eq!(json["deviceProfileId"], "prof1");
        assert_eq!(json["isDisabled"], false);
        assert_eq!(json["skipFcntCheck"], false);
    }

    #[test]
    fn new_device_defaults_to_enabled() {
        let device = Device::from(NewDevice {
            application_id: "app1".into(),
            device_profile_id: "prof1".into(),
            name: "sensor-1".into(),
            dev_eui: "a8610a35392c6606".into(),
            description: String::new(),
        });
        assert!(!device.is_disabled);
        assert!(!device.skip_fcnt_check);
    }

    #[test]
    fn list_page_deserializes_wire_shape() {
        let json = r#"{
            "totalCount": 2,
            "result": [
                {"devEui": "aaaaaaaaaaaaaaaa", "name": "a", "deviceProfileName": "profile-a"},
                {"devEui": "bbbbbbbbbbbbbbbb", "name": "b", "lastSeenAt": "2024-05-01T00:00:00Z"}
            ]
        }"#;
        let page: DeviceListPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.result.len(), 2);
        assert_eq!(page.result[0].device_profile_name, "profile-a");
        assert_eq!(page.result[1].last_seen_at.as_deref(), Some("2024-05-01T00:00:00Z"));
    }

    #[test]
    fn link_metrics_tolerates_missing_series() {
        let metrics: LinkMetrics = serde_json::from_str(r#"{"rxPackets": {"name": "rx"}}"#).unwrap();
        assert_eq!(metrics.rx_packets.unwrap().name, "rx");
        assert!(metrics.gw_rssi.is_none());
    }
}
