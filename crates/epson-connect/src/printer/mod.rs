//! Printer resource client.
//!
//! Thin wrapper over the session dispatch seam for printer capabilities and
//! the three-step print flow: create a job, upload the file, execute.

mod settings;

pub use settings::{JobSettings, PrintMode, PrintSetting};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};
use url::{Url, form_urlencoded};

use crate::auth::Session;
use crate::error::{Error, InvalidInputError};
use crate::rest::{RequestBody, printer_path};

/// File extensions the service accepts for printing.
const VALID_EXTENSIONS: [&str; 13] = [
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "pdf", "jpeg", "jpg", "bmp", "gif", "png",
    "tiff",
];

/// A print job created by the API, ready for upload and execution.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintJob {
    /// Server-assigned job id.
    pub id: String,
    /// Presigned URI the file must be uploaded to.
    pub upload_uri: String,
}

/// Client for printer operations.
///
/// Borrows the [`Session`] it dispatches through and must not outlive it.
#[derive(Debug)]
pub struct Printer<'a> {
    session: &'a Session,
}

impl<'a> Printer<'a> {
    /// Create a printer client over an authenticated session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Returns the device id of the printer this session is bound to.
    pub async fn device_id(&self) -> String {
        self.session.device_id().await
    }

    /// Retrieve the printer's capabilities for a print mode.
    #[instrument(skip(self))]
    pub async fn capabilities(&self, mode: PrintMode) -> Result<Value, Error> {
        let path = format!(
            "{}/capability/{}",
            printer_path(&self.device_id().await),
            mode
        );
        self.session.dispatch(Method::GET, &path, None, None).await
    }

    /// Create a print job from the given settings.
    ///
    /// Missing settings are filled with defaults: a generated job name, the
    /// `document` print mode, and plain-paper A4 print settings when a
    /// partial [`PrintSetting`] is supplied.
    #[instrument(skip(self, settings))]
    pub async fn create_job(&self, settings: Option<JobSettings>) -> Result<PrintJob, Error> {
        let settings = settings.unwrap_or_default().finalize();
        debug!(job_name = settings.job_name.as_deref(), "creating print job");

        let path = format!("{}/jobs", printer_path(&self.device_id().await));
        let body = RequestBody::Json(serde_json::to_value(&settings)?);

        let response = self
            .session
            .dispatch(Method::POST, &path, None, Some(body))
            .await?;

        Ok(serde_json::from_value(response)?)
    }

    /// Upload a file to a job's presigned upload URI.
    ///
    /// The upload path is rebuilt from the URI keeping only its `Key` query
    /// parameter, plus a `File` name derived from the extension. Photo-mode
    /// uploads are declared as `image/jpeg`, everything else as
    /// `application/octet-stream`.
    #[instrument(skip(self, upload_uri))]
    pub async fn upload_file(
        &self,
        upload_uri: &str,
        file_path: &Path,
        print_mode: PrintMode,
    ) -> Result<Value, Error> {
        let extension = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !VALID_EXTENSIONS.contains(&extension.as_str()) {
            return Err(InvalidInputError::Extension { extension }.into());
        }

        let uri = Url::parse(upload_uri).map_err(|e| InvalidInputError::UploadUri {
            value: upload_uri.to_string(),
            reason: e.to_string(),
        })?;
        let key = uri
            .query_pairs()
            .find(|(name, _)| name == "Key")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| InvalidInputError::UploadUri {
                value: upload_uri.to_string(),
                reason: "missing Key query parameter".to_string(),
            })?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("Key", &key)
            .append_pair("File", &format!("1.{extension}"))
            .finish();
        let path = format!("{}?{}", uri.path(), query);

        let content_type = match print_mode {
            PrintMode::Photo => "image/jpeg",
            PrintMode::Document => "application/octet-stream",
        };

        let data = tokio::fs::read(file_path).await?;
        debug!(bytes = data.len(), content_type, "uploading print file");

        // The upload endpoint expects the bare access token in the
        // Authorization header, without the `Bearer` prefix the rest of the
        // API uses.
        let token = self.session.access_token().await.unwrap_or_default();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type).expect("invalid content type"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token).expect("invalid token characters"),
        );

        self.session
            .dispatch(
                Method::POST,
                &path,
                Some(headers),
                Some(RequestBody::Raw(data)),
            )
            .await
    }

    /// Start printing an uploaded job.
    #[instrument(skip(self))]
    pub async fn execute_print(&self, job_id: &str) -> Result<(), Error> {
        let path = format!(
            "{}/jobs/{}/print",
            printer_path(&self.device_id().await),
            job_id
        );

        let token = self.session.access_token().await.unwrap_or_default();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .expect("invalid token characters"),
        );

        self.session
            .dispatch(Method::POST, &path, Some(headers), None)
            .await?;
        Ok(())
    }

    /// Print a file end to end: create a job, upload, execute.
    ///
    /// Returns the id of the submitted job.
    #[instrument(skip(self))]
    pub async fn print(&self, file_path: &Path) -> Result<String, Error> {
        let job = self.create_job(None).await?;
        self.upload_file(&job.upload_uri, file_path, PrintMode::Document)
            .await?;
        self.execute_print(&job.id).await?;
        Ok(job.id)
    }
}
