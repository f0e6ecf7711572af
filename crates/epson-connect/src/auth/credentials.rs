//! API credentials type.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Credentials for the Epson Connect password-grant token exchange.
///
/// This type holds the printer email plus the OAuth client id and secret
/// issued for the API application.
///
/// # Security
///
/// The client secret is never exposed in Debug output to prevent
/// accidental logging.
///
/// # Example
///
/// ```
/// use epson_connect::Credentials;
///
/// let creds = Credentials::new("example@print.epsonconnect.com", "client-id", "client-secret");
/// assert_eq!(creds.printer_email(), "example@print.epsonconnect.com");
/// ```
pub struct Credentials {
    printer_email: String,
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `printer_email` - The email address assigned to the printer
    /// * `client_id` - OAuth client id for the API application
    /// * `client_secret` - OAuth client secret for the API application
    pub fn new(
        printer_email: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            printer_email: printer_email.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the printer email used as the grant username.
    pub fn printer_email(&self) -> &str {
        &self.printer_email
    }

    /// Returns the `Basic` authorization header value for the token exchange.
    ///
    /// # Security
    ///
    /// Use this only when constructing token exchange requests.
    /// Never log or display this value.
    pub(crate) fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("printer_email", &self.printer_email)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            printer_email: self.printer_email.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}
