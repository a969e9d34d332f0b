use thiserror::Error;

/// Errors and diagnostics produced while scanning, planning and extracting.
///
/// Per-file problems are attached to a `FileRecord` as diagnostics instead of
/// aborting the folder scan, so the type is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The probe report is not the JSON shape we expect
    #[error("Malformed probe report for {file}: {message}")]
    MalformedReport { file: String, message: String },

    /// A track whose type is not video, audio or subtitles
    #[error("Unknown track type '{track_type}' for track {id} in {file}")]
    UnknownTrackType {
        file: String,
        id: u32,
        track_type: String,
    },

    /// The probe tool could not be run or returned something unusable
    #[error("Probe failed for {file}: {message}")]
    ProbeFailure { file: String, message: String },

    /// The requested folder does not exist or is not a directory
    #[error("Invalid folder: {0}")]
    InvalidFolder(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error executing the extraction command: {0}")]
    Extraction(String),
}

impl AppError {
    /// Build a `MalformedReport` for a file
    pub fn malformed(file: &str, message: impl Into<String>) -> Self {
        AppError::MalformedReport {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Build a `ProbeFailure` for a file
    pub fn probe_failure(file: &str, message: impl Into<String>) -> Self {
        AppError::ProbeFailure {
            file: file.to_string(),
            message: message.into(),
        }
    }
}
