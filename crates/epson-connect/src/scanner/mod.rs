//! Scanner resource client.
//!
//! Manages the scan-to-cloud destinations registered for a device. The
//! client keeps a local cache of destinations it has seen, which `update`
//! uses to merge unspecified fields.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::auth::Session;
use crate::error::{Error, InvalidInputError};
use crate::rest::{RequestBody, scan_destinations_path};

/// Kind of scan destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// Scans are mailed to an address.
    Mail,
    /// Scans are posted to a URL.
    Url,
}

/// A registered scan destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDestination {
    /// Server-assigned destination id.
    pub id: String,
    /// Display name, 1-32 characters.
    pub alias_name: String,
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    /// Mail address or URL, 4-544 characters.
    pub destination: String,
}

#[derive(Debug, Deserialize)]
struct ListDestinationsResponse {
    #[serde(default)]
    destinations: Vec<ScanDestination>,
}

/// Client for scan destination management.
///
/// Borrows the [`Session`] it dispatches through and must not outlive it.
#[derive(Debug)]
pub struct Scanner<'a> {
    session: &'a Session,
    destinations: HashMap<String, ScanDestination>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner client over an authenticated session.
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            destinations: HashMap::new(),
        }
    }

    async fn path(&self) -> String {
        scan_destinations_path(&self.session.device_id().await)
    }

    /// List the registered scan destinations, refreshing the local cache.
    #[instrument(skip(self))]
    pub async fn list(&mut self) -> Result<Vec<ScanDestination>, Error> {
        let path = self.path().await;
        let response = self.session.dispatch(Method::GET, &path, None, None).await?;
        let parsed: ListDestinationsResponse = serde_json::from_value(response)?;

        self.destinations = parsed
            .destinations
            .iter()
            .map(|d| (d.id.clone(), d.clone()))
            .collect();
        debug!(count = parsed.destinations.len(), "listed scan destinations");

        Ok(parsed.destinations)
    }

    /// Register a new scan destination.
    #[instrument(skip(self, destination))]
    pub async fn add(
        &mut self,
        name: &str,
        destination: &str,
        kind: DestinationKind,
    ) -> Result<ScanDestination, Error> {
        validate_alias_name(name)?;
        validate_destination(destination)?;

        let path = self.path().await;
        let body = RequestBody::Json(json!({
            "alias_name": name,
            "type": kind,
            "destination": destination,
        }));

        let response = self
            .session
            .dispatch(Method::POST, &path, None, Some(body))
            .await?;
        let created: ScanDestination = serde_json::from_value(response)?;

        self.destinations.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    /// Update a registered scan destination.
    ///
    /// Fields left as `None` keep their cached values, so the destination
    /// must have been seen by this client via [`Scanner::list`] or
    /// [`Scanner::add`] first.
    #[instrument(skip(self, destination))]
    pub async fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        destination: Option<&str>,
        kind: Option<DestinationKind>,
    ) -> Result<ScanDestination, Error> {
        let cached = self
            .destinations
            .get(id)
            .ok_or_else(|| InvalidInputError::UnknownDestination { id: id.to_string() })?;

        if let Some(name) = name {
            validate_alias_name(name)?;
        }
        if let Some(destination) = destination {
            validate_destination(destination)?;
        }

        let body = RequestBody::Json(json!({
            "id": id,
            "alias_name": name.unwrap_or(&cached.alias_name),
            "type": kind.unwrap_or(cached.kind),
            "destination": destination.unwrap_or(&cached.destination),
        }));

        let path = self.path().await;
        let response = self
            .session
            .dispatch(Method::POST, &path, None, Some(body))
            .await?;
        let updated: ScanDestination = serde_json::from_value(response)?;

        self.destinations.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Remove a scan destination and evict it from the cache.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &str) -> Result<(), Error> {
        let path = self.path().await;
        let body = RequestBody::Json(json!({ "id": id }));

        self.session
            .dispatch(Method::DELETE, &path, None, Some(body))
            .await?;

        self.destinations.remove(id);
        Ok(())
    }
}

fn validate_alias_name(name: &str) -> Result<(), Error> {
    if name.is_empty() || name.len() > 32 {
        return Err(InvalidInputError::DestinationName.into());
    }
    Ok(())
}

fn validate_destination(destination: &str) -> Result<(), Error> {
    if destination.len() < 4 || destination.len() > 544 {
        return Err(InvalidInputError::Destination.into());
    }
    Ok(())
}
