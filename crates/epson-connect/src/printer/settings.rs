//! Print job settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Print mode for a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Document printing (the default).
    #[default]
    Document,
    /// Photo printing; uploads are declared as `image/jpeg`.
    Photo,
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintMode::Document => write!(f, "document"),
            PrintMode::Photo => write!(f, "photo"),
        }
    }
}

/// Settings for a print job.
///
/// A missing job name is replaced by a generated `job-xxxxxxxx` name when
/// the job is created. Settings schema validation is left to the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobSettings {
    /// Job name shown in the printer's job list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    /// Print mode; defaults to document.
    pub print_mode: PrintMode,
    /// Device print settings; omitted entirely when not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_setting: Option<PrintSetting>,
}

impl JobSettings {
    /// Fill in the defaults the API expects for unset fields.
    pub(crate) fn finalize(mut self) -> Self {
        if self.job_name.as_deref().is_none_or(str::is_empty) {
            self.job_name = Some(random_job_name());
        }
        self
    }
}

/// Device-level print settings.
///
/// The defaults mirror the service's own: A4 plain paper, normal quality,
/// color, single copy.
#[derive(Debug, Clone, Serialize)]
pub struct PrintSetting {
    pub media_size: String,
    pub media_type: String,
    pub borderless: bool,
    pub print_quality: String,
    pub source: String,
    pub color_mode: String,
    #[serde(rename = "2_sided")]
    pub two_sided: String,
    pub reverse_order: bool,
    pub copies: u32,
    pub collate: bool,
}

impl Default for PrintSetting {
    fn default() -> Self {
        Self {
            media_size: "ms_a4".to_string(),
            media_type: "mt_plainpaper".to_string(),
            borderless: false,
            print_quality: "normal".to_string(),
            source: "auto".to_string(),
            color_mode: "color".to_string(),
            two_sided: "none".to_string(),
            reverse_order: false,
            copies: 1,
            collate: true,
        }
    }
}

/// Generate a random 8-character job name.
fn random_job_name() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("job-{}", &id[..8])
}
