use crate::analyzer::Probe;
use crate::error::AppError;
use crate::folder::index::FolderIndex;
use crate::tracks::JoinStyle;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The active folder, the display join style and the index built from them.
///
/// Every rebuild produces a complete new index that replaces the current one
/// only when it succeeds.
pub struct Session {
    probe: Box<dyn Probe>,
    extensions: Vec<String>,
    join_style: JoinStyle,
    index: Option<FolderIndex>,
}

impl Session {
    pub fn new(probe: Box<dyn Probe>, extensions: Vec<String>, join_style: JoinStyle) -> Self {
        Self {
            probe,
            extensions,
            join_style,
            index: None,
        }
    }

    /// Current index, if a folder was ever loaded successfully
    pub fn index(&self) -> Option<&FolderIndex> {
        self.index.as_ref()
    }

    pub fn folder(&self) -> Option<&Path> {
        self.index.as_ref().map(|i| i.folder())
    }

    pub fn join_style(&self) -> JoinStyle {
        self.join_style
    }

    fn rebuild(&mut self, folder: &Path, join_style: JoinStyle) -> Result<&FolderIndex, AppError> {
        match FolderIndex::build(folder, &self.extensions, self.probe.as_ref(), join_style) {
            Ok(index) => {
                self.join_style = join_style;
                Ok(self.index.insert(index))
            }
            Err(e) => {
                warn!("Keeping previous folder index: {}", e);
                Err(e)
            }
        }
    }

    /// Switch to another folder
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) -> Result<&FolderIndex, AppError> {
        let folder = folder.into();
        let join_style = self.join_style;
        self.rebuild(&folder, join_style)
    }

    /// Change the join style. The active folder is rescanned so cached
    /// summaries never mix styles.
    pub fn set_join_style(&mut self, join_style: JoinStyle) -> Result<Option<&FolderIndex>, AppError> {
        match self.folder().map(Path::to_path_buf) {
            Some(folder) => self.rebuild(&folder, join_style).map(Some),
            None => {
                self.join_style = join_style;
                Ok(None)
            }
        }
    }

    /// Rescan the active folder
    pub fn refresh(&mut self) -> Result<Option<&FolderIndex>, AppError> {
        let join_style = self.join_style;
        match self.folder().map(Path::to_path_buf) {
            Some(folder) => self.rebuild(&folder, join_style).map(Some),
            None => Ok(None),
        }
    }
}
