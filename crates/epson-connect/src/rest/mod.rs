//! REST plumbing for the Epson Connect API.
//!
//! This module provides the HTTP transport, the wire-level endpoint
//! definitions, and the request body encoding used by the dispatch core.

mod body;
mod endpoints;
mod transport;

pub use body::RequestBody;

pub(crate) use body::{encode_body, password_grant_form};
pub(crate) use endpoints::*;
pub(crate) use transport::HttpTransport;
