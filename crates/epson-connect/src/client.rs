//! Client construction layer.
//!
//! Resolves configuration from explicit values or the environment, builds a
//! [`Session`], and performs the initial authentication.

use std::env;
use tracing::instrument;

use crate::auth::{Credentials, Session};
use crate::error::{Error, InvalidInputError};
use crate::printer::Printer;
use crate::scanner::Scanner;
use crate::types::BaseUrl;

/// Production Epson Connect API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.epsonconnect.com";

const ENV_PRINTER_EMAIL: &str = "EPSON_CONNECT_API_PRINTER_EMAIL";
const ENV_CLIENT_ID: &str = "EPSON_CONNECT_API_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "EPSON_CONNECT_API_CLIENT_SECRET";

/// Configuration for [`Client::connect`].
///
/// Any field left as `None` falls back to its `EPSON_CONNECT_API_*`
/// environment variable; the base URL falls back to the production endpoint.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// API base URL. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Printer email used as the grant username.
    pub printer_email: Option<String>,
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth client secret.
    pub client_secret: Option<String>,
}

impl ClientConfig {
    /// Resolve the configuration into a base URL and credentials.
    pub(crate) fn resolve(self) -> Result<(BaseUrl, Credentials), Error> {
        let base_url = BaseUrl::new(
            self.base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let printer_email = resolve_field(self.printer_email, ENV_PRINTER_EMAIL, "Printer Email")?;
        let client_id = resolve_field(self.client_id, ENV_CLIENT_ID, "Client ID")?;
        let client_secret = resolve_field(self.client_secret, ENV_CLIENT_SECRET, "Client Secret")?;

        Ok((
            base_url,
            Credentials::new(printer_email, client_id, client_secret),
        ))
    }
}

fn resolve_field(
    explicit: Option<String>,
    env_name: &str,
    display_name: &'static str,
) -> Result<String, Error> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env::var(env_name).ok().filter(|v| !v.is_empty()))
        .ok_or_else(|| InvalidInputError::MissingCredential { name: display_name }.into())
}

/// High-level client for the Epson Connect API.
///
/// Owns the [`Session`] and hands out borrowing [`Printer`] and [`Scanner`]
/// resource clients.
#[derive(Debug)]
pub struct Client {
    session: Session,
}

impl Client {
    /// Resolve configuration, create a session, and authenticate.
    #[instrument(skip(config))]
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        let (base_url, credentials) = config.resolve()?;
        let session = Session::new(base_url, credentials);
        session.authenticate().await?;
        Ok(Self { session })
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a printer client for this session.
    pub fn printer(&self) -> Printer<'_> {
        Printer::new(&self.session)
    }

    /// Returns a scanner client for this session.
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.session)
    }

    /// End the session. Best-effort; see [`Session::deauthenticate`].
    pub async fn deauthenticate(&self) {
        self.session.deauthenticate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_resolves() {
        let (base_url, credentials) = ClientConfig {
            base_url: Some("https://api.epsonconnect.com".to_string()),
            printer_email: Some("printer@test.local".to_string()),
            client_id: Some("cid".to_string()),
            client_secret: Some("csecret".to_string()),
        }
        .resolve()
        .unwrap();

        assert_eq!(base_url.host(), Some("api.epsonconnect.com"));
        assert_eq!(credentials.printer_email(), "printer@test.local");
    }

    #[test]
    fn base_url_defaults_to_production() {
        let (base_url, _) = ClientConfig {
            printer_email: Some("printer@test.local".to_string()),
            client_id: Some("cid".to_string()),
            client_secret: Some("csecret".to_string()),
            ..ClientConfig::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(base_url.as_str(), "https://api.epsonconnect.com");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ClientConfig {
            base_url: Some("not a url".to_string()),
            printer_email: Some("printer@test.local".to_string()),
            client_id: Some("cid".to_string()),
            client_secret: Some("csecret".to_string()),
        }
        .resolve();

        assert!(result.is_err());
    }

    #[test]
    fn empty_explicit_value_is_treated_as_missing() {
        // Only meaningful when the env fallback is unset, which holds in CI.
        if env::var(ENV_CLIENT_SECRET).is_ok() {
            return;
        }
        let result = ClientConfig {
            printer_email: Some("printer@test.local".to_string()),
            client_id: Some("cid".to_string()),
            client_secret: Some(String::new()),
            ..ClientConfig::default()
        }
        .resolve();

        assert!(matches!(
            result,
            Err(Error::InvalidInput(
                InvalidInputError::MissingCredential { name: "Client Secret" }
            ))
        ));
    }
}
