use crate::analyzer::{FileRecord, FolderFacets, Probe, analyze};
use crate::error::AppError;
use crate::extractor::{ExtractionPlan, Scope, build_plan};
use crate::folder::scanner::list_media_files;
use crate::tracks::{JoinStyle, TrackKind};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything known about the active folder.
///
/// Built in one go and never patched: a folder or join style change builds a
/// new index.
#[derive(Debug, Clone)]
pub struct FolderIndex {
    folder: PathBuf,
    join_style: JoinStyle,
    records: Vec<FileRecord>,
    facets: FolderFacets,
}

impl FolderIndex {
    /// Probe every media file of `folder`.
    ///
    /// Fails only when the folder itself cannot be listed. A file that cannot
    /// be probed or parsed still gets a record, with the error attached.
    pub fn build(
        folder: &Path,
        extensions: &[String],
        probe: &dyn Probe,
        join_style: JoinStyle,
    ) -> Result<Self, AppError> {
        let files = list_media_files(folder, extensions)?;
        info!("Scanning {} ({} files)", folder.display(), files.len());

        let mut facets = FolderFacets::default();
        let records: Vec<FileRecord> = files
            .iter()
            .map(|path| analyze(probe, path, &mut facets))
            .collect();

        Ok(Self {
            folder: folder.to_path_buf(),
            join_style,
            records,
            facets,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn join_style(&self) -> JoinStyle {
        self.join_style
    }

    /// Records sorted by file name
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn record(&self, file_name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.file_name() == file_name)
    }

    pub fn facets(&self) -> &FolderFacets {
        &self.facets
    }

    /// One plan per record, in record order
    pub fn plans(&self, scope: Scope) -> Vec<ExtractionPlan> {
        self.records
            .iter()
            .map(|record| build_plan(record, scope, &self.folder))
            .collect()
    }

    /// `(file name, summary)` for one kind, joined with the index's style
    pub fn summaries(&self, kind: TrackKind) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .map(|record| (record.file_name(), record.summary(kind, self.join_style)))
            .collect()
    }

    /// Every diagnostic of the folder with the file it belongs to
    pub fn diagnostics(&self) -> Vec<(&str, &AppError)> {
        self.records
            .iter()
            .flat_map(|record| {
                record
                    .diagnostics()
                    .iter()
                    .map(move |d| (record.file_name(), d))
            })
            .collect()
    }
}
