//! Pure functions for mapping error kinds to HTTP status codes and bodies.

use serde::Serialize;

use super::ErrorKind;

/// Maps an [`ErrorKind`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidInput` -> 400 (Bad Request)
/// - `Unauthorized` -> 401 (Unauthorized)
/// - `UpstreamUnavailable` -> 503 (Service Unavailable)
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use venues_core::error::{status_code, ErrorKind};
///
/// assert_eq!(status_code(ErrorKind::NotFound), 404);
/// ```
pub fn status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::NotFound => 404,
        ErrorKind::InvalidInput => 400,
        ErrorKind::Unauthorized => 401,
        ErrorKind::UpstreamUnavailable => 503,
        ErrorKind::Internal => 500,
    }
}

/// JSON body written back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// A status code and body ready to be written verbatim by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: ErrorBody,
}

impl ErrorResponse {
    /// Serializes the body to JSON bytes.
    pub fn body_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.body).unwrap_or_else(|_| {
            format!(r#"{{"error":"{}"}}"#, self.body.error.as_str()).into_bytes()
        })
    }
}

/// Builds the response for a kind and a caller-safe message.
///
/// `Internal` always gets the generic message, whatever was passed in.
pub fn render(kind: ErrorKind, message: &str) -> ErrorResponse {
    let message = match kind {
        ErrorKind::Internal => kind.default_message(),
        _ if message.trim().is_empty() => kind.default_message(),
        _ => message,
    };

    ErrorResponse {
        status: status_code(kind),
        body: ErrorBody {
            error: kind,
            message: message.to_string(),
            request_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(status_code(ErrorKind::NotFound), 404);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        assert_eq!(status_code(ErrorKind::InvalidInput), 400);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(status_code(ErrorKind::Unauthorized), 401);
    }

    #[test]
    fn test_upstream_unavailable_maps_to_503() {
        assert_eq!(status_code(ErrorKind::UpstreamUnavailable), 503);
    }

    #[test]
    fn test_internal_maps_to_500() {
        assert_eq!(status_code(ErrorKind::Internal), 500);
    }

    #[test]
    fn test_render_keeps_safe_message() {
        let response = render(ErrorKind::NotFound, "venue not found");
        assert_eq!(response.status, 404);
        assert_eq!(response.body.message, "venue not found");
    }

    #[test]
    fn test_render_internal_hides_message() {
        let response = render(ErrorKind::Internal, "pq: relation \"users\" does not exist");
        assert_eq!(response.status, 500);
        assert_eq!(response.body.message, "internal server error");
    }

    #[test]
    fn test_render_blank_message_uses_default() {
        let response = render(ErrorKind::InvalidInput, "  ");
        assert_eq!(response.body.message, "invalid input");
    }

    #[test]
    fn test_body_bytes_json_shape() {
        let mut response = render(ErrorKind::Unauthorized, "login required");
        response.body.request_id = Some("abc".to_string());
        let json: serde_json::Value = serde_json::from_slice(&response.body_bytes()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "unauthorized",
                "message": "login required",
                "request_id": "abc"
            })
        );
    }
}
