// Client configuration
//
// Loaded once at startup and immutable for the client's lifetime.

use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    30
}

/// Which binding of the ChirpStack API the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Native gRPC API on `server_address`.
    #[default]
    Grpc,
    /// REST gateway on port 8090 of the same host.
    Rest,
}

/// Port the ChirpStack REST gateway listens on.
pub const REST_PORT: u16 = 8090;

/// Connection parameters for the network server.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// gRPC endpoint, `host:port`.
    pub server_address: String,
    /// API token issued by the network server.
    pub api_token: String,
    /// Application whose devices the demo binary operates on.
    #[serde(default)]
    pub application_id: String,
    /// Device the demo binary fetches.
    #[serde(default)]
    pub device_eui: String,
    #[serde(default)]
    pub transport: TransportKind,
    /// Per-request timeout applied to both transports.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Base URL of the REST gateway: the host portion of `server_address`
    /// on the fixed management port.
    pub fn rest_base_url(&self) -> String {
        let host = self
            .server_address
            .split(':')
            .next()
            .unwrap_or(self.server_address.as_str());
        format!("http://{host}:{REST_PORT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> ClientConfig {
        serde_json::from_str(r#"{"server_address": "localhost:8080", "api_token": "t"}"#)
            .unwrap()
    }

    #[test]
    fn defaults_applied() {
        let config = minimal();
        assert_eq!(config.transport, TransportKind::Grpc);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.application_id.is_empty());
        assert!(config.device_eui.is_empty());
    }

    #[test]
    fn rest_base_url_uses_host_and_fixed_port() {
        assert_eq!(minimal().rest_base_url(), "http://localhost:8090");
    }

    #[test]
    fn transport_selector_parses() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"server_address": "cs:8080", "api_token": "t", "transport": "rest"}"#,
        )
        .unwrap();
        assert_eq!(config.transport, TransportKind::Rest);
    }
}
