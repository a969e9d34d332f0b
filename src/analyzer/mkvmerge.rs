use crate::analyzer::facets::FolderFacets;
use crate::analyzer::metadata::FileRecord;
use crate::error::AppError;
use crate::tracks::{Attachment, Track, TrackDetails, TrackKind};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Source of raw identification reports, one JSON document per file
pub trait Probe {
    fn probe(&self, path: &Path) -> Result<Value, AppError>;
}

/// Probe backed by `mkvmerge -J`
#[derive(Debug, Clone)]
pub struct MkvmergeProbe {
    program: String,
}

impl MkvmergeProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MkvmergeProbe {
    fn default() -> Self {
        Self::new("mkvmerge")
    }
}

impl Probe for MkvmergeProbe {
    fn probe(&self, path: &Path) -> Result<Value, AppError> {
        run_mkvmerge(&self.program, path)
    }
}

/// Run mkvmerge's JSON identification on one file.
///
/// mkvmerge exits with 1 on warnings and 2 on errors but still prints a
/// report for `-J`, so any output that parses as JSON is accepted.
fn run_mkvmerge(program: &str, path: &Path) -> Result<Value, AppError> {
    let file = path.display().to_string();
    let output = Command::new(program)
        .arg("-J")
        .arg(path)
        .output()
        .map_err(|e| AppError::probe_failure(&file, format!("Failed to execute {}: {}", program, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    match serde_json::from_str::<Value>(&stdout) {
        Ok(value) => Ok(value),
        Err(e) if output.status.success() => Err(AppError::probe_failure(
            &file,
            format!("Failed to parse {} output: {}", program, e),
        )),
        Err(_) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AppError::probe_failure(
                &file,
                format!("{} failed ({}): {}", program, output.status, stderr.trim()),
            ))
        }
    }
}

/// Probe and normalize one file. Never fails: a probe error or a malformed
/// report yields a degraded record carrying the error as a diagnostic.
pub fn analyze(probe: &dyn Probe, path: &Path, facets: &mut FolderFacets) -> FileRecord {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let result = probe
        .probe(path)
        .and_then(|report| normalize(&file_name, report, facets));

    match result {
        Ok(record) => record,
        Err(e) => {
            warn!("{}", e);
            FileRecord::degraded(file_name, e)
        }
    }
}

/// Turn one mkvmerge identification report into a `FileRecord`.
///
/// Structural problems (not an object, `tracks` not an array, fields of the
/// wrong JSON type) fail with `MalformedReport`. Individual tracks that cannot
/// be used are skipped with a diagnostic. Every kept track is added to
/// `facets`.
pub fn normalize(
    file_name: &str,
    report: Value,
    facets: &mut FolderFacets,
) -> Result<FileRecord, AppError> {
    if !report.is_object() {
        return Err(AppError::malformed(file_name, "report is not a JSON object"));
    }
    let raw: RawReport =
        serde_json::from_value(report).map_err(|e| AppError::malformed(file_name, e.to_string()))?;

    let container = raw.container.unwrap_or_default();
    let title = container
        .properties
        .and_then(|p| p.title)
        .unwrap_or_default();
    let has_chapters = raw.chapters.is_some_and(|c| !c.is_empty());

    let mut record = FileRecord::new(file_name)
        .with_title(title)
        .with_chapters(has_chapters);

    if container.recognized == Some(false) {
        record.push_diagnostic(AppError::probe_failure(
            file_name,
            "container format not recognized",
        ));
    }
    for message in raw.errors.unwrap_or_default() {
        record.push_diagnostic(AppError::probe_failure(file_name, message));
    }
    for message in raw.warnings.unwrap_or_default() {
        debug!("{}: probe warning: {}", file_name, message);
    }

    for raw_track in raw.tracks.unwrap_or_default() {
        match raw_track.into_track(file_name) {
            Ok(track) => {
                debug!(
                    "{}: track {} {} {} '{}'",
                    file_name,
                    track.id,
                    track.kind(),
                    track.codec,
                    track.language
                );
                if record.track(track.id).is_some() {
                    let diagnostic = AppError::malformed(
                        file_name,
                        format!("duplicate track id {}", track.id),
                    );
                    warn!("{}", diagnostic);
                    record.push_diagnostic(diagnostic);
                    continue;
                }
                facets.record(&track);
                record.push_track(track);
            }
            Err(diagnostic) => {
                warn!("{}", diagnostic);
                record.push_diagnostic(diagnostic);
            }
        }
    }

    for attachment in raw.attachments.unwrap_or_default() {
        record.push_attachment(Attachment {
            id: attachment.id,
            file_name: attachment.file_name.unwrap_or_default(),
            content_type: attachment.content_type.unwrap_or_default(),
        });
    }

    Ok(record)
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct RawReport {
    container: Option<RawContainer>,
    tracks: Option<Vec<RawTrack>>,
    chapters: Option<Vec<Value>>,
    attachments: Option<Vec<RawAttachment>>,
    errors: Option<Vec<String>>,
    warnings: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawContainer {
    recognized: Option<bool>,
    properties: Option<RawContainerProperties>,
}

#[derive(Debug, Deserialize)]
struct RawContainerProperties {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    id: Option<u32>,
    #[serde(rename = "type")]
    track_type: Option<String>,
    codec: Option<String>,
    properties: Option<RawTrackProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTrackProperties {
    language: Option<String>,
    language_ietf: Option<String>,
    track_name: Option<String>,
    default_track: Option<bool>,
    display_dimensions: Option<String>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAttachment {
    id: u32,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl RawTrack {
    fn into_track(self, file_name: &str) -> Result<Track, AppError> {
        let track_type = self.track_type.unwrap_or_default();
        let Some(id) = self.id else {
            return Err(AppError::malformed(
                file_name,
                format!("track of type '{}' has no id", track_type),
            ));
        };
        let Some(kind) = TrackKind::from_probe_type(&track_type) else {
            return Err(AppError::UnknownTrackType {
                file: file_name.to_string(),
                id,
                track_type,
            });
        };

        let props = self.properties.unwrap_or_default();
        let language = props
            .language_ietf
            .filter(|l| !l.is_empty())
            .or(props.language)
            .unwrap_or_default();

        let details = match kind {
            TrackKind::Video => TrackDetails::Video {
                display_dimensions: props.display_dimensions.unwrap_or_default(),
            },
            TrackKind::Audio => TrackDetails::Audio,
            TrackKind::Subtitle => TrackDetails::Subtitle {
                encoding: props.encoding.unwrap_or_default(),
            },
        };

        Ok(Track {
            id,
            codec: self.codec.unwrap_or_default(),
            language,
            name: props.track_name.unwrap_or_default(),
            is_default: props.default_track == Some(true),
            details,
        })
    }
}
