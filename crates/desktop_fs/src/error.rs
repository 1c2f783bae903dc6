//! File-system error taxonomy.
//!
//! `Display` output is written for end users; apps surface it verbatim in their notice areas.

use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a [`crate::FileSystemStore`] operation was refused.
pub enum FsError {
    /// The target node does not exist.
    #[error("Error: No file or folder with id {0} exists.")]
    NotFound(NodeId),
    /// The destination of a create is missing or is not a folder.
    #[error("Error: The destination {0} is missing or is not a folder.")]
    InvalidParent(NodeId),
    /// Rename or delete targeted the root drive.
    #[error("Error: Cannot rename or delete the root drive.")]
    ProtectedRoot,
    /// A sibling already uses the requested name.
    #[error("Error: A file or folder named \"{name}\" already exists here.")]
    NameCollision {
        /// Conflicting name.
        name: String,
    },
    /// Delete targeted a folder that still has children.
    #[error("Error: Cannot delete folder \"{name}\" because it is not empty.")]
    NotEmpty {
        /// Folder name.
        name: String,
    },
    /// A content update targeted a folder.
    #[error("Error: \"{0}\" is not a file.")]
    NotAFile(String),
    /// The requested name is empty or contains a path separator.
    #[error("Error: \"{0}\" is not a valid name.")]
    InvalidName(String),
}
