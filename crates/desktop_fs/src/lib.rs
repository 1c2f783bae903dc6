//! In-memory hierarchical file system shared by the desktop runtime and its hosted apps.
//!
//! [`FileSystemStore`] owns every [`FsNode`] and keeps the parent/child links consistent in both
//! directions. Refused operations report an [`FsError`] whose display text is meant for users.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod node;
pub mod seed;
pub mod store;

pub use error::FsError;
pub use node::{
    text_file_name, CreateNodeOptions, FsNode, FsNodeBody, FsNodeKind, NodeId, TEXT_FILE_APP_ID,
    TEXT_FILE_EXTENSION,
};
pub use seed::{README_APP_ID, README_CONTENT, README_FILE_NAME, SEED_FOLDERS};
pub use store::{FileSystemStore, ROOT_DRIVE_NAME};
