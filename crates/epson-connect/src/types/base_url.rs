//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated Epson Connect API base URL.
///
/// This type ensures the URL is absolute, uses HTTPS (or HTTP for localhost),
/// and is properly normalized for endpoint construction.
///
/// # Example
///
/// ```
/// use epson_connect::BaseUrl;
///
/// let base = BaseUrl::new("https://api.epsonconnect.com").unwrap();
/// assert_eq!(base.endpoint("/api/1/printing/printers/abc"),
///            "https://api.epsonconnect.com/api/1/printing/printers/abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for a path-and-query fragment.
    pub fn endpoint(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim it before appending the endpoint path
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://api.epsonconnect.com").unwrap();
        assert_eq!(base.host(), Some("api.epsonconnect.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let base = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(base.host(), Some("localhost"));
    }

    #[test]
    fn endpoint_construction() {
        let base = BaseUrl::new("https://api.epsonconnect.com").unwrap();
        assert_eq!(
            base.endpoint("/api/1/printing/oauth2/auth/token?subject=printer"),
            "https://api.epsonconnect.com/api/1/printing/oauth2/auth/token?subject=printer"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_endpoint() {
        let base = BaseUrl::new("https://api.epsonconnect.com/").unwrap();
        assert_eq!(
            base.endpoint("/api/1/printing/printers/abc"),
            "https://api.epsonconnect.com/api/1/printing/printers/abc"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(BaseUrl::new("http://api.epsonconnect.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api/1/printing").is_err());
    }
}
