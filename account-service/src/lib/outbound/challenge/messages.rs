use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::models::ChallengeVerification;

/// Request body sent to the siteverify endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SiteverifyRequest<'a> {
    pub secret: &'a str,
    pub response: &'a str,
}

/// Response body returned by the siteverify endpoint.
///
/// Only `success` is required; the rest is diagnostic.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteverifyResponse {
    pub success: bool,
    #[serde(default)]
    pub challenge_ts: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl From<SiteverifyResponse> for ChallengeVerification {
    fn from(response: SiteverifyResponse) -> Self {
        Self {
            accepted: response.success,
            hostname: response.hostname,
            challenge_ts: response.challenge_ts,
            error_codes: response.error_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = SiteverifyRequest {
            secret: "server-secret",
            response: "client-token",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"secret": "server-secret", "response": "client-token"})
        );
    }

    #[test]
    fn test_response_with_diagnostics() {
        let body = r#"{
            "success": false,
            "challenge_ts": "2024-01-01T00:00:00.000Z",
            "hostname": "example.com",
            "error-codes": ["invalid-input-response"]
        }"#;

        let verification: ChallengeVerification =
            serde_json::from_str::<SiteverifyResponse>(body).unwrap().into();

        assert!(!verification.accepted);
        assert_eq!(verification.hostname.as_deref(), Some("example.com"));
        assert_eq!(verification.error_codes, vec!["invalid-input-response"]);
    }

    #[test]
    fn test_response_minimal() {
        let response: SiteverifyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();

        assert!(response.success);
        assert!(response.error_codes.is_empty());
    }

    #[test]
    fn test_response_without_success_is_rejected() {
        assert!(serde_json::from_str::<SiteverifyResponse>(r#"{"hostname": "x"}"#).is_err());
    }
}
