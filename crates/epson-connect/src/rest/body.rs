//! Request body representation and encoding.

use url::form_urlencoded;

use crate::error::Error;

/// A request body for [`Session::dispatch`](crate::Session::dispatch).
///
/// The closed set of variants maps one-to-one onto the encodings the API
/// accepts; the variant picks the encoding, the headers declare the content
/// type.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON (`application/json`).
    Json(serde_json::Value),
    /// Sent as raw bytes, unmodified (`application/octet-stream`, images).
    Raw(Vec<u8>),
    /// Serialized as `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
}

/// Encode a request body to wire bytes.
pub(crate) fn encode_body(body: &RequestBody) -> Result<Vec<u8>, Error> {
    match body {
        RequestBody::Json(value) => Ok(serde_json::to_vec(value)?),
        RequestBody::Raw(bytes) => Ok(bytes.clone()),
        RequestBody::Form(pairs) => {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            Ok(encoded.into_bytes())
        }
    }
}

/// The fixed password-grant form sent by every empty-token dispatch.
///
/// The password field is always empty; the printer email is the only
/// secret-bearing part of the grant.
pub(crate) fn password_grant_form(printer_email: &str) -> Vec<u8> {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "password")
        .append_pair("username", printer_email)
        .append_pair("password", "")
        .finish()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_serializes() {
        let body = RequestBody::Json(json!({"a": 1}));
        assert_eq!(encode_body(&body).unwrap(), br#"{"a":1}"#.to_vec());
    }

    #[test]
    fn raw_body_passes_through_unmodified() {
        let bytes = vec![0x01, 0x02, 0xff, 0x00];
        let body = RequestBody::Raw(bytes.clone());
        assert_eq!(encode_body(&body).unwrap(), bytes);
    }

    #[test]
    fn form_body_urlencodes_pairs() {
        let body = RequestBody::Form(vec![
            ("id".to_string(), "dest-1".to_string()),
            ("alias name".to_string(), "home".to_string()),
        ]);
        assert_eq!(
            encode_body(&body).unwrap(),
            b"id=dest-1&alias+name=home".to_vec()
        );
    }

    #[test]
    fn grant_form_has_fixed_shape() {
        let form = password_grant_form("printer@test.local");
        assert_eq!(
            String::from_utf8(form).unwrap(),
            "grant_type=password&username=printer%40test.local&password="
        );
    }
}
