//! Folder-wide Matroska track inventory and `mkvextract` command planning.
//!
//! Each media file of a folder is identified with `mkvmerge -J`, normalized
//! into a [`analyzer::FileRecord`], summarized for display and turned into an
//! [`extractor::ExtractionPlan`] for a chosen [`extractor::Scope`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod folder;
pub mod tracks;
pub mod utils;

pub use error::AppError;
