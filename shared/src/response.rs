//! API Response types
//!
//! Standardized API response envelope used by every storefront endpoint

use serde::{Deserialize, Serialize};

/// Message used when a failed response carries no message of its own
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "success": true,
///     "data": { ... },
///     "message": "optional text"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the server handled the request successfully
    pub success: bool,
    /// Response data (optional)
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, mostly present on failures
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Split the envelope into its payload or the server's error message.
    ///
    /// A successful envelope without `data` yields `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_keeps_server_message() {
        let json = r#"{"success":false,"message":"Invalid price range"}"#;
        let resp: ApiResponse<Vec<String>> = serde_json::from_str(json).unwrap();

        assert_eq!(resp.into_result(), Err("Invalid price range".to_string()));
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let json = r#"{"success":false}"#;
        let resp: ApiResponse<()> = serde_json::from_str(json).unwrap();

        assert_eq!(resp.into_result(), Err(DEFAULT_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn test_success_without_data() {
        let json = r#"{"success":true}"#;
        let resp: ApiResponse<Vec<u32>> = serde_json::from_str(json).unwrap();

        assert_eq!(resp.into_result(), Ok(None));
    }

    #[test]
    fn test_error_response_skips_data() {
        let resp = ApiResponse::<u32>::error("nope");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }
}
