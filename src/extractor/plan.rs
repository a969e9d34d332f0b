use crate::analyzer::{FileRecord, extension_for};
use crate::tracks::{Track, TrackKind};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which parts of each file to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every track, the chapters and the attachments
    #[default]
    All,
    /// Video, audio and subtitle tracks
    Tracks,
    Video,
    Audio,
    Subtitle,
    Chapters,
    Attachments,
}

impl Scope {
    pub fn includes_tracks(&self, kind: TrackKind) -> bool {
        match self {
            Scope::All | Scope::Tracks => true,
            Scope::Video => kind == TrackKind::Video,
            Scope::Audio => kind == TrackKind::Audio,
            Scope::Subtitle => kind == TrackKind::Subtitle,
            Scope::Chapters | Scope::Attachments => false,
        }
    }

    pub fn includes_chapters(&self) -> bool {
        matches!(self, Scope::All | Scope::Chapters)
    }

    pub fn includes_attachments(&self) -> bool {
        matches!(self, Scope::All | Scope::Attachments)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Scope::All => "Everything",
            Scope::Tracks => "Tracks",
            Scope::Video => "Video",
            Scope::Audio => "Audio",
            Scope::Subtitle => "Subtitles",
            Scope::Chapters => "Chapters",
            Scope::Attachments => "Attachments",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One resolved extraction instruction for a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionDirective {
    /// Every track of one kind, as (track id, output path)
    Tracks {
        kind: TrackKind,
        outputs: Vec<(u32, PathBuf)>,
    },
    /// The chapters as XML
    Chapters { output: PathBuf },
    /// Every attachment, as (attachment id, output path)
    Attachments { outputs: Vec<(u32, PathBuf)> },
}

/// Everything to extract from one file. No directives means nothing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPlan {
    pub file_name: String,
    pub source: PathBuf,
    pub directives: Vec<ExtractionDirective>,
}

impl ExtractionPlan {
    pub fn is_noop(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Join a file name onto the active folder. An empty folder leaves the
/// name relative.
pub fn in_folder(folder: &Path, name: &str) -> PathBuf {
    folder.join(name.trim_start_matches(std::path::is_separator))
}

/// Make a probe-supplied name usable as a single file name inside the
/// active folder: separators become `_`, and an empty name or one made only
/// of dots (`.`, `..`) becomes underscores.
pub fn safe_file_name(name: &str) -> String {
    let name = name.replace(std::path::is_separator, "_");
    if name.is_empty() {
        "_".to_string()
    } else if name.chars().all(|c| c == '.') {
        name.replace('.', "_")
    } else {
        name
    }
}

/// `{base}.track_{id}.{name}.{language}.{ext}`, skipping empty parts.
///
/// An empty language leaves no empty segment behind: a track without
/// language gives `base.track_3.ogg`, never `base.track_3..ogg`.
pub fn track_output_name(record: &FileRecord, track: &Track) -> String {
    let id = format!("track_{}", track.id);
    let name = track.name.replace(std::path::is_separator, "_");
    let extension = extension_for(track.kind(), &track.codec);

    [
        record.base_name(),
        id.as_str(),
        name.as_str(),
        track.language.as_str(),
        extension,
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(".")
}

/// `{base}.chapters.xml`
pub fn chapters_output_name(record: &FileRecord) -> String {
    format!("{}.chapters.xml", record.base_name())
}

/// Build the extraction plan of one file for a scope.
///
/// Directives come in a fixed order: video, audio, subtitles, chapters,
/// attachments. Only non-empty categories produce a directive.
pub fn build_plan(record: &FileRecord, scope: Scope, folder: &Path) -> ExtractionPlan {
    let mut directives = Vec::new();

    for kind in TrackKind::ALL {
        if !scope.includes_tracks(kind) {
            continue;
        }
        let outputs: Vec<(u32, PathBuf)> = record
            .tracks_of(kind)
            .into_iter()
            .map(|track| (track.id, in_folder(folder, &track_output_name(record, track))))
            .collect();
        if !outputs.is_empty() {
            directives.push(ExtractionDirective::Tracks { kind, outputs });
        }
    }

    if scope.includes_chapters() && record.has_chapters() {
        directives.push(ExtractionDirective::Chapters {
            output: in_folder(folder, &chapters_output_name(record)),
        });
    }

    if scope.includes_attachments() && !record.attachments().is_empty() {
        let outputs = record
            .attachments()
            .iter()
            .map(|a| (a.id, in_folder(folder, &safe_file_name(&a.file_name))))
            .collect();
        directives.push(ExtractionDirective::Attachments { outputs });
    }

    ExtractionPlan {
        file_name: record.file_name().to_string(),
        source: in_folder(folder, record.file_name()),
        directives,
    }
}
