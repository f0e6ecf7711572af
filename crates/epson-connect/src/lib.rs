//! epson-connect - Epson Connect API client
//!
//! This library provides access to the Epson Connect cloud printing and
//! scanning service with a session-centric API. A [`Session`] owns the OAuth2
//! token lifecycle; every API call flows through its dispatch chokepoint,
//! which renews stale tokens transparently. The [`Printer`] and [`Scanner`]
//! resource clients borrow the session and never outlive it.
//!
//! # Example
//!
//! ```no_run
//! use epson_connect::{Client, ClientConfig};
//!
//! # async fn example() -> Result<(), epson_connect::Error> {
//! let client = Client::connect(ClientConfig {
//!     printer_email: Some("example@print.epsonconnect.com".into()),
//!     client_id: Some("client-id".into()),
//!     client_secret: Some("client-secret".into()),
//!     ..ClientConfig::default()
//! })
//! .await?;
//!
//! let printer = client.printer();
//! let job_id = printer.print("report.pdf".as_ref()).await?;
//! println!("submitted job {job_id}");
//!
//! client.deauthenticate().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod error;
pub mod printer;
pub mod rest;
pub mod scanner;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session};
pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, AuthError, Error, InvalidInputError, TransportError};
pub use printer::{JobSettings, PrintJob, PrintMode, PrintSetting, Printer};
pub use rest::RequestBody;
pub use scanner::{DestinationKind, ScanDestination, Scanner};
pub use types::BaseUrl;

// The dispatch seam speaks in terms of these HTTP types.
pub use reqwest::Method;
pub use reqwest::header::{HeaderMap, HeaderValue};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
