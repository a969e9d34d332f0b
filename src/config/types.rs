use crate::extractor::Scope;
use crate::tracks::JoinStyle;
use serde::{Deserialize, Serialize};

/// External tool locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Identification tool, called as `mkvmerge -J <file>`
    pub mkvmerge: String,
    /// Extraction tool
    pub mkvextract: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mkvmerge: "mkvmerge".to_string(),
            mkvextract: "mkvextract".to_string(),
        }
    }
}

/// Folder scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to probe, matched case-insensitively
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["mkv".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub join_style: JoinStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Scope used when none is given on the command line
    pub scope: Scope,
}
