//! Authentication types and session management.
//!
//! This module provides the OAuth2 primitives for the Epson Connect API.
//! All authenticated operations flow through a [`Session`] object.

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::Session;
pub use tokens::{AccessToken, RefreshToken};
