//! Human-readable track summaries.
//!
//! Strings use a small markup subset: default tracks are wrapped in `<b>`
//! and ampersands in track names are escaped.

use super::{Track, TrackKind};
use crate::analyzer::FileRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How multiple entries are joined in one summary string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum JoinStyle {
    /// One entry per line
    #[default]
    #[serde(rename = "lines")]
    #[value(name = "lines")]
    OneLinePerEntry,
    /// Entries separated by ", "
    #[serde(rename = "comma")]
    #[value(name = "comma")]
    CommaJoined,
}

impl JoinStyle {
    pub fn separator(&self) -> &'static str {
        match self {
            JoinStyle::OneLinePerEntry => "\n",
            JoinStyle::CommaJoined => ", ",
        }
    }
}

/// Escape a name for embedding in markup
fn escape_name(name: &str) -> String {
    name.replace('&', "&amp;")
}

fn bold(text: String) -> String {
    format!("<b>{}</b>", text)
}

/// One `{id}-{language} ({codec})` fragment
fn track_fragment(track: &Track, is_default: bool) -> String {
    let fragment = if track.name.is_empty() {
        format!("{}-{} ({})", track.id, track.language, track.codec)
    } else {
        format!(
            "{}-{} ('{}' {})",
            track.id,
            track.language,
            escape_name(&track.name),
            track.codec
        )
    };

    if is_default { bold(fragment) } else { fragment }
}

/// Summary of every track of one kind, in ascending id order
pub fn format_tracks(record: &FileRecord, kind: TrackKind, style: JoinStyle) -> String {
    record
        .tracks_of(kind)
        .into_iter()
        .map(|track| track_fragment(track, record.is_default(track.id)))
        .collect::<Vec<_>>()
        .join(style.separator())
}

/// `{file_name} ({content_type})` per attachment, in source order
pub fn format_attachments(record: &FileRecord, style: JoinStyle) -> String {
    record
        .attachments()
        .iter()
        .map(|a| format!("{} ({})", escape_name(&a.file_name), a.content_type))
        .collect::<Vec<_>>()
        .join(style.separator())
}

/// `<b>{id}</b>-{type}` per default track, in probe order
pub fn format_defaults(record: &FileRecord, style: JoinStyle) -> String {
    record
        .tracks()
        .iter()
        .filter(|t| record.is_default(t.id))
        .map(|t| format!("<b>{}</b>-{}", t.id, t.kind().probe_type()))
        .collect::<Vec<_>>()
        .join(style.separator())
}

/// Drop the markup so a summary can go to a plain terminal
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "").replace("&amp;", "&")
}
