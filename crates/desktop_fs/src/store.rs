//! Node table and tree operations.

use std::{cmp::Ordering, collections::BTreeMap};

use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::{
    error::FsError,
    node::{CreateNodeOptions, FsNode, FsNodeBody, FsNodeKind, NodeId},
};

/// Display name of the root drive.
pub const ROOT_DRIVE_NAME: &str = "C:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Exclusive owner of every file-system node.
///
/// Lookups hand out borrows, so callers re-fetch by [`NodeId`] after any mutation. Every mutating
/// operation validates first and only then edits the node table and the parent's child list, so a
/// refused call leaves the tree untouched.
pub struct FileSystemStore {
    nodes: BTreeMap<NodeId, FsNode>,
    next_node_id: u64,
}

impl FileSystemStore {
    /// Creates a store holding only the root drive.
    pub fn new() -> Self {
        let root = FsNode {
            id: NodeId::ROOT,
            name: ROOT_DRIVE_NAME.to_string(),
            parent_id: None,
            body: FsNodeBody::Folder {
                children: Vec::new(),
            },
        };
        let mut nodes = BTreeMap::new();
        nodes.insert(NodeId::ROOT, root);
        Self {
            nodes,
            next_node_id: NodeId::ROOT.0 + 1,
        }
    }

    /// Root drive id.
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a well-formed store; the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &FsNode> {
        self.nodes.values()
    }

    /// Looks up a node.
    pub fn get_node(&self, id: NodeId) -> Option<&FsNode> {
        self.nodes.get(&id)
    }

    /// Returns the children of `folder_id`, folders first and then by name.
    ///
    /// Missing ids and files yield an empty list.
    pub fn get_children(&self, folder_id: NodeId) -> Vec<&FsNode> {
        let Some(children) = self.nodes.get(&folder_id).and_then(FsNode::children) else {
            return Vec::new();
        };
        let mut entries: Vec<&FsNode> = children
            .iter()
            .filter_map(|child_id| self.nodes.get(child_id))
            .collect();
        entries.sort_by(|a, b| listing_order(a, b));
        entries
    }

    /// Returns the owning folder of `id`.
    pub fn get_parent(&self, id: NodeId) -> Option<&FsNode> {
        let parent_id = self.nodes.get(&id)?.parent_id?;
        self.nodes.get(&parent_id)
    }

    /// Finds a direct child of `folder_id` by exact name.
    pub fn find_child_by_name(&self, folder_id: NodeId, name: &str) -> Option<&FsNode> {
        self.nodes
            .get(&folder_id)?
            .children()?
            .iter()
            .filter_map(|child_id| self.nodes.get(child_id))
            .find(|child| child.name == name)
    }

    /// Renders the `/`-joined path of `id`, with the root drive shown as `C:/`.
    ///
    /// A broken parent chain yields the partial path from the highest reachable ancestor; an
    /// unknown id yields an empty string.
    pub fn get_path_string(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut rooted = false;
        let mut cursor = self.nodes.get(&id);
        while let Some(node) = cursor {
            segments.push(node.name.as_str());
            if segments.len() > self.nodes.len() {
                break;
            }
            match node.parent_id {
                Some(parent_id) => cursor = self.nodes.get(&parent_id),
                None => {
                    rooted = true;
                    break;
                }
            }
        }
        segments.reverse();

        if !rooted {
            return segments.join("/");
        }
        let (root, rest) = segments.split_at(1);
        format!("{}/{}", root[0], rest.join("/"))
    }

    /// Creates a node under `parent_id`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidParent`] when `parent_id` is missing or not a folder.
    /// - [`FsError::InvalidName`] when `name` is blank or contains `/`.
    /// - [`FsError::NameCollision`] when a sibling already uses `name`.
    pub fn create_node(
        &mut self,
        parent_id: NodeId,
        name: impl Into<String>,
        kind: FsNodeKind,
        options: CreateNodeOptions,
    ) -> Result<&FsNode, FsError> {
        let name = name.into();
        let parent = self
            .nodes
            .get(&parent_id)
            .filter(|node| node.is_folder())
            .ok_or_else(|| refused("create_node", FsError::InvalidParent(parent_id)))?;
        validate_name(&name).map_err(|err| refused("create_node", err))?;
        if self.sibling_named(parent, &name, None) {
            return Err(refused("create_node", FsError::NameCollision { name }));
        }

        let body = match kind {
            FsNodeKind::File => FsNodeBody::File {
                app_id: options.app_id,
                content: options.content,
            },
            FsNodeKind::Folder => {
                if options != CreateNodeOptions::default() {
                    logging::warn!("create_node: ignoring file options for folder \"{name}\"");
                }
                FsNodeBody::Folder {
                    children: Vec::new(),
                }
            }
        };

        let id = NodeId(self.next_node_id);
        let Some(siblings) = self
            .nodes
            .get_mut(&parent_id)
            .and_then(FsNode::children_mut)
        else {
            return Err(refused("create_node", FsError::InvalidParent(parent_id)));
        };
        siblings.push(id);
        self.next_node_id = self.next_node_id.saturating_add(1);

        logging::log!("node created: {name} (id {id}) in parent {parent_id}");
        let node = FsNode {
            id,
            name,
            parent_id: Some(parent_id),
            body,
        };
        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Replaces the text content of a file.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] for unknown ids and [`FsError::NotAFile`] for folders.
    pub fn update_node_content(
        &mut self,
        id: NodeId,
        content: impl Into<String>,
    ) -> Result<(), FsError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| refused("update_node_content", FsError::NotFound(id)))?;
        match &mut node.body {
            FsNodeBody::File { content: slot, .. } => {
                *slot = Some(content.into());
                logging::log!("node content updated: {} (id {id})", node.name);
                Ok(())
            }
            FsNodeBody::Folder { .. } => Err(refused(
                "update_node_content",
                FsError::NotAFile(node.name.clone()),
            )),
        }
    }

    /// Renames a node. Renaming to the current name is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] for unknown ids.
    /// - [`FsError::ProtectedRoot`] for the root drive.
    /// - [`FsError::InvalidName`] when `new_name` is blank or contains `/`.
    /// - [`FsError::NameCollision`] when another sibling already uses `new_name`.
    pub fn rename_node(&mut self, id: NodeId, new_name: impl Into<String>) -> Result<(), FsError> {
        let new_name = new_name.into();
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| refused("rename_node", FsError::NotFound(id)))?;
        let Some(parent_id) = node.parent_id else {
            return Err(refused("rename_node", FsError::ProtectedRoot));
        };
        validate_name(&new_name).map_err(|err| refused("rename_node", err))?;
        if node.name == new_name {
            return Ok(());
        }
        let parent = self
            .nodes
            .get(&parent_id)
            .filter(|parent| parent.is_folder())
            .ok_or_else(|| refused("rename_node", FsError::InvalidParent(parent_id)))?;
        if self.sibling_named(parent, &new_name, Some(id)) {
            return Err(refused(
                "rename_node",
                FsError::NameCollision { name: new_name },
            ));
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            let old_name = std::mem::replace(&mut node.name, new_name);
            logging::log!("node renamed: {old_name} -> {} (id {id})", node.name);
        }
        Ok(())
    }

    /// Deletes a file or an empty folder. Non-empty folders are refused rather than cascaded.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] for unknown ids.
    /// - [`FsError::ProtectedRoot`] for the root drive.
    /// - [`FsError::NotEmpty`] for folders with at least one child.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), FsError> {
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| refused("delete_node", FsError::NotFound(id)))?;
        let Some(parent_id) = node.parent_id else {
            return Err(refused("delete_node", FsError::ProtectedRoot));
        };
        if node.children().is_some_and(|children| !children.is_empty()) {
            return Err(refused(
                "delete_node",
                FsError::NotEmpty {
                    name: node.name.clone(),
                },
            ));
        }
        let Some(siblings) = self
            .nodes
            .get_mut(&parent_id)
            .and_then(FsNode::children_mut)
        else {
            return Err(refused("delete_node", FsError::InvalidParent(parent_id)));
        };
        siblings.retain(|child_id| *child_id != id);

        if let Some(removed) = self.nodes.remove(&id) {
            logging::log!("node deleted: {} (id {id})", removed.name);
        }
        Ok(())
    }

    fn sibling_named(&self, parent: &FsNode, name: &str, except: Option<NodeId>) -> bool {
        parent
            .children()
            .unwrap_or_default()
            .iter()
            .filter(|child_id| Some(**child_id) != except)
            .filter_map(|child_id| self.nodes.get(child_id))
            .any(|sibling| sibling.name == name)
    }
}

impl Default for FileSystemStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn validate_name(name: &str) -> Result<(), FsError> {
    if name.trim().is_empty() || name.contains('/') {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn refused(op: &str, err: FsError) -> FsError {
    logging::warn!("{op} refused: {err}");
    err
}

fn listing_order(a: &FsNode, b: &FsNode) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}
