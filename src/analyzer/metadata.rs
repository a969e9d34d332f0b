use crate::error::AppError;
use crate::tracks::{Attachment, JoinStyle, Track, TrackKind, format_tracks};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Memoized display strings, one slot per (kind, join style)
#[derive(Debug, Clone, Default)]
struct SummaryCache([OnceLock<String>; 6]);

impl SummaryCache {
    fn slot(&self, kind: TrackKind, style: JoinStyle) -> &OnceLock<String> {
        let kind_index = match kind {
            TrackKind::Video => 0,
            TrackKind::Audio => 1,
            TrackKind::Subtitle => 2,
        };
        let style_index = match style {
            JoinStyle::OneLinePerEntry => 0,
            JoinStyle::CommaJoined => 1,
        };
        &self.0[kind_index * 2 + style_index]
    }
}

/// Normalized metadata of one container file
///
/// Track ids are unique and `default_track_ids` only ever holds ids of
/// tracks in the record. Mutating methods drop the memoized summaries.
#[derive(Debug, Clone)]
pub struct FileRecord {
    file_name: String,
    title: String,
    tracks: Vec<Track>,
    default_track_ids: BTreeSet<u32>,
    has_chapters: bool,
    attachments: Vec<Attachment>,
    diagnostics: Vec<AppError>,
    summaries: SummaryCache,
}

impl FileRecord {
    /// Create an empty record for a file name (including its extension)
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            title: String::new(),
            tracks: Vec::new(),
            default_track_ids: BTreeSet::new(),
            has_chapters: false,
            attachments: Vec::new(),
            diagnostics: Vec::new(),
            summaries: SummaryCache::default(),
        }
    }

    /// A record with no metadata, carrying the reason it could not be read
    pub fn degraded(file_name: impl Into<String>, error: AppError) -> Self {
        let mut record = Self::new(file_name);
        record.diagnostics.push(error);
        record
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_chapters(mut self, has_chapters: bool) -> Self {
        self.has_chapters = has_chapters;
        self
    }

    /// Add a track. Returns false and leaves the record untouched when the
    /// id is already taken.
    pub fn push_track(&mut self, track: Track) -> bool {
        if self.track(track.id).is_some() {
            return false;
        }
        if track.is_default {
            self.default_track_ids.insert(track.id);
        }
        self.tracks.push(track);
        self.summaries = SummaryCache::default();
        true
    }

    pub fn push_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    pub fn push_diagnostic(&mut self, diagnostic: AppError) {
        self.diagnostics.push(diagnostic);
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without its final extension
    pub fn base_name(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(i) if i > 0 => &self.file_name[..i],
            _ => &self.file_name,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tracks in probe order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks of one kind, sorted by id
    pub fn tracks_of(&self, kind: TrackKind) -> Vec<&Track> {
        let mut tracks: Vec<&Track> = self.tracks.iter().filter(|t| t.kind() == kind).collect();
        tracks.sort_by_key(|t| t.id);
        tracks
    }

    pub fn default_track_ids(&self) -> &BTreeSet<u32> {
        &self.default_track_ids
    }

    pub fn is_default(&self, id: u32) -> bool {
        self.default_track_ids.contains(&id)
    }

    pub fn has_chapters(&self) -> bool {
        self.has_chapters
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn diagnostics(&self) -> &[AppError] {
        &self.diagnostics
    }

    /// Display summary of one track kind, computed once per join style
    pub fn summary(&self, kind: TrackKind, style: JoinStyle) -> &str {
        self.summaries
            .slot(kind, style)
            .get_or_init(|| format_tracks(self, kind, style))
    }
}
