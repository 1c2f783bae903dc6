//! Initial file-system layout present at startup.

use leptos::logging;

use crate::{
    node::{CreateNodeOptions, FsNodeKind, TEXT_FILE_APP_ID},
    store::FileSystemStore,
};

/// Folders created directly under the root drive.
pub const SEED_FOLDERS: [&str; 2] = ["Documents", "Pictures"];
/// Name of the seeded text file at the root.
pub const README_FILE_NAME: &str = "README.txt";
/// Content of the seeded text file.
pub const README_CONTENT: &str = "Welcome to Browser OS!\n\nThis is a simple text file.";
/// Application that opens the seeded text file.
pub const README_APP_ID: &str = TEXT_FILE_APP_ID;

impl FileSystemStore {
    /// Creates the startup tree: `C:` with `Documents/`, `Pictures/` and `README.txt`.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let root = store.root_id();

        for folder in SEED_FOLDERS {
            if let Err(err) =
                store.create_node(root, folder, FsNodeKind::Folder, CreateNodeOptions::default())
            {
                logging::warn!("seeding {folder} failed: {err}");
            }
        }
        if let Err(err) = store.create_node(
            root,
            README_FILE_NAME,
            FsNodeKind::File,
            CreateNodeOptions::text(README_CONTENT, README_APP_ID),
        ) {
            logging::warn!("seeding {README_FILE_NAME} failed: {err}");
        }

        store
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seeded_tree_matches_startup_layout() {
        let store = FileSystemStore::seeded();
        let root = store.root_id();

        let listing: Vec<(&str, FsNodeKind)> = store
            .get_children(root)
            .into_iter()
            .map(|node| (node.name.as_str(), node.kind()))
            .collect();
        assert_eq!(
            listing,
            vec![
                ("Documents", FsNodeKind::Folder),
                ("Pictures", FsNodeKind::Folder),
                ("README.txt", FsNodeKind::File),
            ]
        );

        let readme = store
            .find_child_by_name(root, README_FILE_NAME)
            .expect("readme");
        assert_eq!(readme.app_id(), Some("notepad"));
        assert_eq!(readme.content(), Some(README_CONTENT));
        assert_eq!(store.get_node(root).map(|n| n.name.as_str()), Some("C:"));
        assert_eq!(store, FileSystemStore::default());
    }

    #[test]
    fn unseeded_store_holds_only_root() {
        let store = FileSystemStore::new();

        assert_eq!(store.len(), 1);
        assert!(store.get_children(store.root_id()).is_empty());
    }
}
