//! Session management for authenticated Epson Connect operations.

use chrono::{Duration, Utc};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{ApiError, AuthError, Error};
use crate::rest::{
    HttpTransport, RequestBody, TOKEN_ENDPOINT, TokenGrantResponse, encode_body,
    password_grant_form, printer_path,
};
use crate::types::BaseUrl;

use super::credentials::Credentials;
use super::tokens::{AccessToken, RefreshToken, TokenState};

/// A session holding the OAuth2 token lifecycle for the Epson Connect API.
///
/// The session is the single chokepoint through which every API call is
/// made: resource clients ([`Printer`](crate::Printer),
/// [`Scanner`](crate::Scanner)) borrow a session and route their requests
/// through [`Session::dispatch`], which renews a stale access token before
/// the call goes out.
///
/// # Token lifecycle
///
/// A new session is unauthenticated. [`Session::authenticate`] performs the
/// password-grant token exchange and is safe to call repeatedly: while the
/// current token is still valid it returns immediately without touching the
/// network. [`Session::deauthenticate`] revokes the printer registration
/// best-effort and drops the access token; the refresh token and subject id
/// deliberately survive it.
///
/// # Thread safety
///
/// Token state sits behind a mutex, and the check-then-exchange sequence in
/// `authenticate()` holds it for the whole exchange, so concurrent callers
/// cannot both observe a stale token and double-renew.
///
/// # Example
///
/// ```no_run
/// use epson_connect::{BaseUrl, Credentials, Session};
///
/// # async fn example() -> Result<(), epson_connect::Error> {
/// let base = BaseUrl::new("https://api.epsonconnect.com")?;
/// let creds = Credentials::new("example@print.epsonconnect.com", "id", "secret");
/// let session = Session::new(base, creds);
/// session.authenticate().await?;
///
/// println!("device: {}", session.device_id().await);
/// # Ok(())
/// # }
/// ```
pub struct Session {
    credentials: Credentials,
    transport: HttpTransport,
    state: Mutex<TokenState>,
}

impl Session {
    /// Create a new, unauthenticated session. No network activity.
    pub fn new(base_url: BaseUrl, credentials: Credentials) -> Self {
        Self {
            credentials,
            transport: HttpTransport::new(base_url),
            state: Mutex::new(TokenState::new()),
        }
    }

    /// Returns the API base URL this session talks to.
    pub fn base_url(&self) -> &BaseUrl {
        self.transport.base()
    }

    /// Perform the password-grant token exchange, or renew a stale token.
    ///
    /// Returns immediately without a network call while the current access
    /// token is still valid. On the first successful exchange the refresh
    /// token is stored; later renewals never overwrite it.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::Rejected`] when the token endpoint reports an
    /// `error` field, or [`AuthError::Exchange`] wrapping any transport or
    /// decoding failure.
    #[instrument(skip(self), fields(base = %self.transport.base()))]
    pub async fn authenticate(&self) -> Result<(), Error> {
        // Hold the lock across the whole check-then-exchange sequence so two
        // callers racing on a stale token issue a single renewal.
        let mut state = self.state.lock().await;

        if state.is_fresh(Utc::now()) {
            debug!("access token still valid, skipping exchange");
            return Ok(());
        }

        info!(
            renewal = state.access_token.is_some(),
            "requesting access token"
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.credentials.basic_authorization())
                .expect("invalid credential characters"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        // Token is empty or stale here, so the round trip substitutes the
        // password-grant form as the request body.
        let body = self
            .round_trip(Method::POST, TOKEN_ENDPOINT, headers, None, None)
            .await
            .map_err(|e| AuthError::Exchange {
                source: Box::new(e),
            })?;

        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(AuthError::Rejected {
                error: error.to_string(),
            }
            .into());
        }

        let grant: TokenGrantResponse =
            serde_json::from_value(body).map_err(|e| AuthError::Exchange {
                source: Box::new(Error::Decode(e)),
            })?;

        // The refresh token is only issued meaningfully on the first grant;
        // renewals must not clobber it.
        if state.access_token.is_none() {
            state.refresh_token = grant.refresh_token.map(RefreshToken::new);
        }

        state.expires_at = Utc::now() + Duration::seconds(grant.expires_in);
        state.access_token = Some(AccessToken::new(grant.access_token));
        state.subject_id = grant.subject_id;

        debug!(device_id = %state.subject_id, "token exchange complete");
        Ok(())
    }

    /// Revoke the printer registration and drop the access token.
    ///
    /// The revoke call is best-effort: a failed DELETE is logged and
    /// otherwise ignored, and the access token is cleared regardless.
    /// The refresh token and subject id survive deauthentication.
    #[instrument(skip(self), fields(base = %self.transport.base()))]
    pub async fn deauthenticate(&self) {
        let (token, path) = {
            let state = self.state.lock().await;
            (
                state.access_token.clone(),
                printer_path(&state.subject_id),
            )
        };

        info!("deauthenticating session");

        let headers = Self::json_headers(token.as_ref());
        if let Err(err) = self
            .round_trip(Method::DELETE, &path, headers, None, token.as_ref())
            .await
        {
            warn!(error = %err, "deauthentication revoke failed");
        }

        self.state.lock().await.access_token = None;
    }

    /// Dispatch one API call: encode, send, decode, classify.
    ///
    /// A stale token is renewed before the call goes out. When `headers` is
    /// `None` the default headers are used: `Authorization: Bearer {token}`
    /// and `Content-Type: application/json`.
    ///
    /// A session that has never authenticated sends the password-grant form
    /// as the body, whatever `body` the caller supplied; the only legitimate
    /// call in that state is the bootstrap token exchange itself.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::TransportError`] when the exchange itself fails,
    /// [`Error::Decode`] when the response is not JSON, or [`ApiError`] when
    /// the decoded response carries a `code` field.
    #[instrument(skip(self, headers, body), fields(base = %self.transport.base()))]
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<RequestBody>,
    ) -> Result<Value, Error> {
        let needs_renewal = {
            let state = self.state.lock().await;
            state.access_token.is_some() && !state.is_fresh(Utc::now())
        };
        if needs_renewal {
            self.authenticate().await?;
        }

        let token = self.state.lock().await.access_token.clone();
        let headers = headers.unwrap_or_else(|| Self::json_headers(token.as_ref()));

        self.round_trip(method, path, headers, body.as_ref(), token.as_ref())
            .await
    }

    /// Returns the default headers for dispatched requests.
    ///
    /// Pure function of the current access token: `Authorization: Bearer
    /// {token}` (empty token renders as `Bearer `) and `Content-Type:
    /// application/json`.
    pub async fn default_headers(&self) -> HeaderMap {
        let token = self.state.lock().await.access_token.clone();
        Self::json_headers(token.as_ref())
    }

    /// Returns the server-assigned device id.
    ///
    /// Empty until the first successful authentication; callers must handle
    /// an empty device id downstream.
    pub async fn device_id(&self) -> String {
        self.state.lock().await.subject_id.clone()
    }

    /// Export the current access token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the printer.
    pub async fn access_token(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.access_token.as_ref().map(|t| t.as_str().to_string())
    }

    /// Export the refresh token issued on the first authentication.
    ///
    /// # Security
    ///
    /// Handle the returned token securely.
    pub async fn refresh_token(&self) -> Option<String> {
        let state = self.state.lock().await;
        state
            .refresh_token
            .as_ref()
            .map(|t| t.as_str().to_string())
    }

    /// Build the default Bearer/JSON header map for a token snapshot.
    fn json_headers(token: Option<&AccessToken>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token.map(AccessToken::as_str).unwrap_or_default());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Encode, send, and decode one HTTP exchange.
    ///
    /// `token` is the caller's snapshot of the access token. When it is
    /// `None` the body is unconditionally replaced by the password-grant
    /// form; this is what turns the bootstrap dispatch into the token
    /// exchange.
    async fn round_trip(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&RequestBody>,
        token: Option<&AccessToken>,
    ) -> Result<Value, Error> {
        let payload = match token {
            None => Some(password_grant_form(self.credentials.printer_email())),
            Some(_) => body.map(encode_body).transpose()?,
        };

        let (status, raw) = self.transport.send(method, path, headers, payload).await?;

        // DELETE and execute-print style endpoints answer with no body.
        if raw.is_empty() {
            return Ok(Value::Null);
        }

        let decoded: Value = serde_json::from_slice(&raw)?;

        // The API is not consistent about the type of the code field; any
        // present, non-null value marks the response as an error.
        if let Some(code) = decoded.get("code").filter(|c| !c.is_null()) {
            let code = match code.as_str() {
                Some(s) => s.to_string(),
                None => code.to_string(),
            };
            return Err(ApiError::new(
                status.as_u16(),
                code,
                decoded
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            )
            .into());
        }

        Ok(decoded)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", self.transport.base())
            .field("credentials", &self.credentials)
            .field("state", &"[REDACTED]")
            .finish()
    }
}
