pub mod classifier;
pub mod facets;
pub mod metadata;
pub mod mkvmerge;

pub use classifier::extension_for;
pub use facets::{FolderFacets, KindFacets};
pub use metadata::FileRecord;
pub use mkvmerge::{MkvmergeProbe, Probe, analyze, normalize};
