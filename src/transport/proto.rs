// Wire messages for the ChirpStack `api.DeviceService` gRPC contract
//
// Defined in-tree with prost derives instead of a protoc build step. Only
// the fields this client reads or writes are declared; proto3 skips unknown
// fields on decode and omits defaulted fields on encode, so the subset
// stays wire-compatible with the full upstream schema. Field tags must
// match `api/device.proto` and `common/common.proto` exactly.

/// `google.protobuf.Empty`, returned by Create and Delete.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Device {
    #[prost(string, tag = "1")]
    pub dev_eui: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub application_id: String,
    #[prost(string, tag = "5")]
    pub device_profile_id: String,
    #[prost(bool, tag = "6")]
    pub skip_fcnt_check: bool,
    #[prost(bool, tag = "7")]
    pub is_disabled: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDeviceRequest {
    #[prost(string, tag = "1")]
    pub dev_eui: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDeviceResponse {
    #[prost(message, optional, tag = "1")]
    pub device: Option<Device>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateDeviceRequest {
    #[prost(message, optional, tag = "1")]
    pub device: Option<Device>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteDeviceRequest {
    #[prost(string, tag = "1")]
    pub dev_eui: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListDevicesRequest {
    #[prost(uint32, tag = "1")]
    pub limit: u32,
    #[prost(uint32, tag = "2")]
    pub offset: u32,
    #[prost(string, tag = "4")]
    pub application_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceListItem {
    #[prost(string, tag = "1")]
    pub dev_eui: String,
    #[prost(message, optional, tag = "2")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "3")]
    pub updated_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub last_seen_at: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "6")]
    pub description: String,
    #[prost(string, tag = "7")]
    pub device_profile_id: String,
    #[prost(string, tag = "8")]
    pub device_profile_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListDevicesResponse {
    #[prost(uint32, tag = "1")]
    pub total_count: u32,
    #[prost(message, repeated, tag = "2")]
    pub result: Vec<DeviceListItem>,
}

/// `common.Aggregation` bucketing for metrics queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Aggregation {
    Hour = 0,
    Day = 1,
    Month = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDeviceLinkMetricsRequest {
    #[prost(string, tag = "1")]
    pub dev_eui: String,
    #[prost(message, optional, tag = "2")]
    pub start: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "3")]
    pub end: Option<::prost_types::Timestamp>,
    #[prost(enumeration = "Aggregation", tag = "4")]
    pub aggregation: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetricDataset {
    #[prost(string, tag = "1")]
    pub label: String,
    #[prost(float, repeated, tag = "2")]
    pub data: Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metric {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub timestamps: Vec<::prost_types::Timestamp>,
    #[prost(message, repeated, tag = "3")]
    pub datasets: Vec<MetricDataset>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDeviceLinkMetricsResponse {
    #[prost(message, optional, tag = "1")]
    pub rx_packets: Option<Metric>,
    #[prost(message, optional, tag = "2")]
    pub gw_rssi: Option<Metric>,
    #[prost(message, optional, tag = "3")]
    pub gw_snr: Option<Metric>,
    #[prost(message, optional, tag = "4")]
    pub rx_packets_per_freq: Option<Metric>,
    #[prost(message, optional, tag = "5")]
    pub rx_packets_per_dr: Option<Metric>,
    #[prost(message, optional, tag = "6")]
    pub errors: Option<Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;

    #[test]
    fn device_round_trips() {
        let device = Device {
            dev_eui: "a8610a35392c6606".into(),
            name: "sensor-1".into(),
            description: String::new(),
            application_id: "app1".into(),
            device_profile_id: "prof1".into(),
            skip_fcnt_check: false,
            is_disabled: false,
        };
        let bytes = device.encode_to_vec();
        let decoded = Device::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, device);
    }

    #[test]
    fn list_request_uses_upstream_tags() {
        // application_id sits at tag 4; tag 3 (search) is not declared here
        // and must stay absent from the encoding.
        let request = ListDevicesRequest {
            limit: 10,
            offset: 0,
            application_id: "app1".into(),
        };
        let bytes = request.encode_to_vec();
        // field 4, wire type 2 => key byte 0x22
        assert!(bytes.contains(&0x22));
        assert!(!bytes.contains(&0x1a)); // field 3 key
    }
}
