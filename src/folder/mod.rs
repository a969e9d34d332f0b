pub mod index;
pub mod scanner;
pub mod session;

pub use index::FolderIndex;
pub use scanner::{list_media_files, resolve_folder};
pub use session::Session;
