//! Node types stored by [`crate::FileSystemStore`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Stable identifier for a file-system node.
pub struct NodeId(pub u64);

impl NodeId {
    /// Identifier reserved for the root drive.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// File-system node kind.
pub enum FsNodeKind {
    /// Leaf node carrying optional text content.
    File,
    /// Container node with child entries.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Kind-specific node payload.
pub enum FsNodeBody {
    /// File payload.
    File {
        /// Application id able to open the file.
        app_id: Option<String>,
        /// Text payload.
        content: Option<String>,
    },
    /// Folder payload.
    Folder {
        /// Child ids in insertion order. Display order comes from
        /// [`crate::FileSystemStore::get_children`].
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A file or folder owned by [`crate::FileSystemStore`].
pub struct FsNode {
    /// Node identifier.
    pub id: NodeId,
    /// Display name, unique among siblings.
    pub name: String,
    /// Owning folder, `None` only for the root.
    pub parent_id: Option<NodeId>,
    /// Kind-specific payload.
    pub body: FsNodeBody,
}

impl FsNode {
    /// Returns the node kind.
    pub fn kind(&self) -> FsNodeKind {
        match self.body {
            FsNodeBody::File { .. } => FsNodeKind::File,
            FsNodeBody::Folder { .. } => FsNodeKind::Folder,
        }
    }

    /// Returns `true` for folders.
    pub fn is_folder(&self) -> bool {
        matches!(self.body, FsNodeBody::Folder { .. })
    }

    /// Returns `true` for files.
    pub fn is_file(&self) -> bool {
        matches!(self.body, FsNodeBody::File { .. })
    }

    /// Returns `true` for the root node.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Child ids for folders, `None` for files.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.body {
            FsNodeBody::Folder { children } => Some(children),
            FsNodeBody::File { .. } => None,
        }
    }

    /// Associated application id for files.
    pub fn app_id(&self) -> Option<&str> {
        match &self.body {
            FsNodeBody::File { app_id, .. } => app_id.as_deref(),
            FsNodeBody::Folder { .. } => None,
        }
    }

    /// Text content for files.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            FsNodeBody::File { content, .. } => content.as_deref(),
            FsNodeBody::Folder { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.body {
            FsNodeBody::Folder { children } => Some(children),
            FsNodeBody::File { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Optional payload for [`crate::FileSystemStore::create_node`].
///
/// Both fields only apply to files and are ignored for folders.
pub struct CreateNodeOptions {
    /// Initial text content.
    pub content: Option<String>,
    /// Application id able to open the file.
    pub app_id: Option<String>,
}

impl CreateNodeOptions {
    /// Options for a text file opened by `app_id`.
    pub fn text(content: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            app_id: Some(app_id.into()),
        }
    }
}

/// Extension appended to text documents created by the explorer and the editor.
pub const TEXT_FILE_EXTENSION: &str = ".txt";

/// Application associated with text documents.
pub const TEXT_FILE_APP_ID: &str = "notepad";

/// Trims `name` and appends [`TEXT_FILE_EXTENSION`] unless it is already present.
pub fn text_file_name(name: &str) -> String {
    let name = name.trim();
    if name.ends_with(TEXT_FILE_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{TEXT_FILE_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_file_name_appends_missing_extension_once() {
        assert_eq!(text_file_name("notes"), "notes.txt");
        assert_eq!(text_file_name(" notes.txt "), "notes.txt");
        assert_eq!(text_file_name("archive.tar"), "archive.tar.txt");
    }
}
