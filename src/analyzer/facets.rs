use crate::tracks::{Track, TrackKind};
use std::collections::BTreeSet;

/// Distinct values seen for one track kind across a folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindFacets {
    pub languages: BTreeSet<String>,
    pub codecs: BTreeSet<String>,
    pub ids: BTreeSet<u32>,
}

impl KindFacets {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Folder-wide distinct languages, codecs and ids per track kind.
///
/// Sets are sorted and case-sensitive. They only grow while a folder is being
/// indexed; a new index starts from `FolderFacets::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderFacets {
    video: KindFacets,
    audio: KindFacets,
    subtitle: KindFacets,
}

impl FolderFacets {
    pub fn get(&self, kind: TrackKind) -> &KindFacets {
        match kind {
            TrackKind::Video => &self.video,
            TrackKind::Audio => &self.audio,
            TrackKind::Subtitle => &self.subtitle,
        }
    }

    fn get_mut(&mut self, kind: TrackKind) -> &mut KindFacets {
        match kind {
            TrackKind::Video => &mut self.video,
            TrackKind::Audio => &mut self.audio,
            TrackKind::Subtitle => &mut self.subtitle,
        }
    }

    /// Add a track's language, codec and id to its kind's sets
    pub fn record(&mut self, track: &Track) {
        let facets = self.get_mut(track.kind());
        facets.languages.insert(track.language.clone());
        facets.codecs.insert(track.codec.clone());
        facets.ids.insert(track.id);
    }
}
