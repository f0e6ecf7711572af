//! Endpoint paths and wire-level response types.

use serde::{Deserialize, Deserializer};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// OAuth2 token endpoint for the printer-subject password grant.
pub(crate) const TOKEN_ENDPOINT: &str = "/api/1/printing/oauth2/auth/token?subject=printer";

/// Printer resource path for a device.
pub(crate) fn printer_path(device_id: &str) -> String {
    format!("/api/1/printing/printers/{device_id}")
}

/// Scan destination collection path for a device.
pub(crate) fn scan_destinations_path(device_id: &str) -> String {
    format!("/api/1/scanning/scanners/{device_id}/destinations")
}

// ============================================================================
// Response Types
// ============================================================================

/// Successful response from the token endpoint.
///
/// Error responses carry an `error` field instead and are rejected before
/// this type is deserialized.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenGrantResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(deserialize_with = "deserialize_expires_in")]
    pub expires_in: i64,
    pub subject_id: String,
}

// The token endpoint has been observed returning expires_in both as a
// number and as a quoted string.
fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ExpiresIn {
        Seconds(i64),
        Text(String),
    }

    match ExpiresIn::deserialize(deserializer)? {
        ExpiresIn::Seconds(n) => Ok(n),
        ExpiresIn::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn printer_path_includes_device_id() {
        assert_eq!(printer_path("dev-9"), "/api/1/printing/printers/dev-9");
    }

    #[test]
    fn scan_destinations_path_includes_device_id() {
        assert_eq!(
            scan_destinations_path("dev-9"),
            "/api/1/scanning/scanners/dev-9/destinations"
        );
    }

    #[test]
    fn grant_accepts_numeric_expires_in() {
        let grant: TokenGrantResponse = serde_json::from_value(json!({
            "access_token": "at-1",
            "refresh_token": "rf-1",
            "expires_in": 3600,
            "subject_id": "dev-9"
        }))
        .unwrap();
        assert_eq!(grant.expires_in, 3600);
    }

    #[test]
    fn grant_accepts_string_expires_in() {
        let grant: TokenGrantResponse = serde_json::from_value(json!({
            "access_token": "at-1",
            "expires_in": "3600",
            "subject_id": "dev-9"
        }))
        .unwrap();
        assert_eq!(grant.expires_in, 3600);
        assert!(grant.refresh_token.is_none());
    }
}
