// Uniform result envelope for all device-management operations
//
// Every facade call resolves to ApiResult<T>: Ok(payload) on success, or an
// ApiError carrying the taxonomy tag, a human-readable message, the raw
// transport status code, and an opaque debug string. Transport-specific
// errors never cross the facade boundary in their native types.

use thiserror::Error;

/// Machine-checkable classification of a failed operation, independent of
/// which transport produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, timeout, DNS failure: the request never got a
    /// well-formed answer from the server.
    Transport,
    /// The API token was rejected (invalid or expired).
    Auth,
    /// The referenced device or application does not exist.
    NotFound,
    /// Duplicate identifier on create.
    Conflict,
    /// Any other non-OK remote status.
    Server,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport error",
            ErrorKind::Auth => "authentication error",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Server => "server error",
        };
        f.write_str(name)
    }
}

/// Error half of the result envelope.
#[derive(Debug, Clone, Error)]
#[error("{kind} (code {code}): {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Human-readable description, transport-reported where available.
    pub message: String,
    /// Raw status from the transport: HTTP status code or gRPC status code.
    pub code: i32,
    /// Opaque diagnostic detail (raw body, status debug repr).
    pub debug: String,
}

impl ApiError {
    pub fn transport(message: impl Into<String>, debug: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            code: 0,
            debug: debug.into(),
        }
    }

    /// Classify a non-2xx response from the REST gateway.
    ///
    /// The gateway translates gRPC statuses to conventional HTTP codes
    /// (NOT_FOUND -> 404, ALREADY_EXISTS -> 409, UNAUTHENTICATED -> 401),
    /// and wraps the message in a JSON body: {"code":..,"message":..}.
    pub fn from_http(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::Auth,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            _ => ErrorKind::Server,
        };
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self {
            kind,
            message,
            code: i32::from(status),
            debug: body.to_string(),
        }
    }

    /// Classify a gRPC status returned by the ChirpStack API.
    pub fn from_grpc(status: &tonic::Status) -> Self {
        use tonic::Code;

        let kind = match status.code() {
            Code::Unauthenticated | Code::PermissionDenied => ErrorKind::Auth,
            Code::NotFound => ErrorKind::NotFound,
            Code::AlreadyExists => ErrorKind::Conflict,
            Code::Unavailable | Code::DeadlineExceeded => ErrorKind::Transport,
            // Channel-level failures reach us as Unknown with a transport
            // message rather than a real remote status.
            Code::Unknown if status.message().contains("transport error")
                || status.message().contains("connect") =>
            {
                ErrorKind::Transport
            }
            _ => ErrorKind::Server,
        };
        Self {
            kind,
            message: status.message().to_string(),
            code: status.code() as i32,
            debug: format!("{status:?}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ApiError::transport(err.to_string(), format!("{err:?}"))
        } else {
            ApiError {
                kind: ErrorKind::Server,
                message: err.to_string(),
                code: err.status().map(|s| i32::from(s.as_u16())).unwrap_or(0),
                debug: format!("{err:?}"),
            }
        }
    }
}

/// Result type for all device-management operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(ApiError::from_http(401, "").kind, ErrorKind::Auth);
        assert_eq!(ApiError::from_http(403, "").kind, ErrorKind::Auth);
        assert_eq!(ApiError::from_http(404, "").kind, ErrorKind::NotFound);
        assert_eq!(ApiError::from_http(409, "").kind, ErrorKind::Conflict);
        assert_eq!(ApiError::from_http(500, "").kind, ErrorKind::Server);
        assert_eq!(ApiError::from_http(400, "").kind, ErrorKind::Server);
    }

    #[test]
    fn http_error_extracts_gateway_message() {
        let body = r#"{"code":5,"message":"object does not exist","details":[]}"#;
        let err = ApiError::from_http(404, body);
        assert_eq!(err.message, "object does not exist");
        assert_eq!(err.code, 404);
        assert_eq!(err.debug, body);
    }

    #[test]
    fn http_error_falls_back_to_status_line() {
        let err = ApiError::from_http(502, "<html>bad gateway</html>");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.kind, ErrorKind::Server);
    }

    #[test]
    fn grpc_status_mapping() {
        let cases = [
            (tonic::Code::Unauthenticated, ErrorKind::Auth),
            (tonic::Code::PermissionDenied, ErrorKind::Auth),
            (tonic::Code::NotFound, ErrorKind::NotFound),
            (tonic::Code::AlreadyExists, ErrorKind::Conflict),
            (tonic::Code::Unavailable, ErrorKind::Transport),
            (tonic::Code::DeadlineExceeded, ErrorKind::Transport),
            (tonic::Code::Internal, ErrorKind::Server),
            (tonic::Code::InvalidArgument, ErrorKind::Server),
        ];
        for (code, kind) in cases {
            let status = tonic::Status::new(code, "boom");
            let err = ApiError::from_grpc(&status);
            assert_eq!(err.kind, kind, "code {code:?}");
            assert_eq!(err.message, "boom");
        }
    }

    #[test]
    fn display_includes_kind_and_code() {
        let err = ApiError::from_http(404, "");
        assert_eq!(err.to_string(), "not found (code 404): HTTP 404");
    }
}
