//! File explorer desktop app over the shared [`FileSystemStore`].
//!
//! [`ExplorerSession`] tracks the open folder and the selection and performs every file operation;
//! [`ExplorerApp`] renders it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppId, AppMountContext, AppServices};
use desktop_fs::{
    text_file_name, CreateNodeOptions, FileSystemStore, FsError, FsNode, FsNodeKind, NodeId,
    TEXT_FILE_APP_ID,
};
use leptos::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One listed entry of the open folder.
pub struct ExplorerRow {
    /// Node id.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Whether the entry is a folder.
    pub is_folder: bool,
}

impl From<&FsNode> for ExplorerRow {
    fn from(node: &FsNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            is_folder: node.is_folder(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of opening (double-clicking) an entry.
pub enum ExplorerActivation {
    /// The entry was a folder and is now the open folder.
    Navigated,
    /// The entry is a file that `app_id` should open.
    OpenFile {
        /// Associated application.
        app_id: AppId,
        /// File to open.
        file_id: NodeId,
    },
    /// The file cannot be opened; carries the message to show.
    Unassociated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Open folder and selection of one explorer window.
pub struct ExplorerSession {
    current_folder: NodeId,
    selected: Option<NodeId>,
}

impl ExplorerSession {
    /// A session showing `folder` with nothing selected.
    pub fn new(folder: NodeId) -> Self {
        Self {
            current_folder: folder,
            selected: None,
        }
    }

    /// Folder being shown.
    pub fn current_folder(&self) -> NodeId {
        self.current_folder
    }

    /// Entries of the open folder, folders first.
    pub fn items<'a>(&self, fs: &'a FileSystemStore) -> Vec<&'a FsNode> {
        fs.get_children(self.current_folder)
    }

    /// Owned rows for rendering.
    pub fn rows(&self, fs: &FileSystemStore) -> Vec<ExplorerRow> {
        self.items(fs).into_iter().map(ExplorerRow::from).collect()
    }

    /// Path of the open folder, such as `C:/Documents`.
    pub fn current_path(&self, fs: &FileSystemStore) -> String {
        fs.get_path_string(self.current_folder)
    }

    /// `true` unless the open folder is the root.
    pub fn can_go_up(&self, fs: &FileSystemStore) -> bool {
        fs.get_parent(self.current_folder).is_some()
    }

    /// Selects `id` for rename or delete.
    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    /// Selected entry id.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Opens `id`: folders are entered, files are resolved to their associated app.
    ///
    /// Clears the selection. Returns `None` when `id` no longer exists.
    pub fn activate(&mut self, fs: &FileSystemStore, id: NodeId) -> Option<ExplorerActivation> {
        self.selected = None;
        let node = fs.get_node(id)?;
        if node.is_folder() {
            self.current_folder = id;
            return Some(ExplorerActivation::Navigated);
        }
        let activation = match node.app_id() {
            None => ExplorerActivation::Unassociated(format!(
                "Don't know how to open \"{}\". No associated application.",
                node.name
            )),
            Some(raw) => match AppId::new(raw) {
                Ok(app_id) => {
                    logging::log!("opening \"{}\" with {app_id}", node.name);
                    ExplorerActivation::OpenFile {
                        app_id,
                        file_id: id,
                    }
                }
                Err(_) => ExplorerActivation::Unassociated(format!(
                    "No application available to open \"{}\" (App ID: {raw})",
                    node.name
                )),
            },
        };
        Some(activation)
    }

    /// Moves to the parent folder. Clears the selection.
    pub fn go_up(&mut self, fs: &FileSystemStore) -> bool {
        self.selected = None;
        match fs.get_parent(self.current_folder) {
            Some(parent) => {
                self.current_folder = parent.id;
                true
            }
            None => false,
        }
    }

    /// Creates a folder in the open folder.
    ///
    /// # Errors
    ///
    /// The [`FsError`] from the store.
    pub fn create_folder(&self, fs: &mut FileSystemStore, name: &str) -> Result<NodeId, FsError> {
        fs.create_node(
            self.current_folder,
            name.trim(),
            FsNodeKind::Folder,
            CreateNodeOptions::default(),
        )
        .map(|node| node.id)
    }

    /// Creates an empty notepad document in the open folder, appending `.txt` when missing.
    ///
    /// # Errors
    ///
    /// [`FsError::InvalidName`] for a blank name, otherwise the [`FsError`] from the store.
    pub fn create_text_file(
        &self,
        fs: &mut FileSystemStore,
        name: &str,
    ) -> Result<NodeId, FsError> {
        if name.trim().is_empty() {
            return Err(FsError::InvalidName(name.to_string()));
        }
        fs.create_node(
            self.current_folder,
            text_file_name(name),
            FsNodeKind::File,
            CreateNodeOptions::text("", TEXT_FILE_APP_ID),
        )
        .map(|node| node.id)
    }

    /// Renames the selected entry and clears the selection on success.
    ///
    /// An empty or unchanged name is ignored and returns `Ok(false)`, as does having no selection.
    ///
    /// # Errors
    ///
    /// The [`FsError`] from the store; the selection is kept.
    pub fn rename_selected(
        &mut self,
        fs: &mut FileSystemStore,
        new_name: &str,
    ) -> Result<bool, FsError> {
        let Some(id) = self.selected else {
            return Ok(false);
        };
        let Some(node) = fs.get_node(id) else {
            self.selected = None;
            return Ok(false);
        };
        if new_name.is_empty() || new_name == node.name {
            return Ok(false);
        }
        fs.rename_node(id, new_name)?;
        self.selected = None;
        Ok(true)
    }

    /// Deletes the selected entry and clears the selection on success.
    ///
    /// # Errors
    ///
    /// The [`FsError`] from the store; non-empty folders are refused.
    pub fn delete_selected(&mut self, fs: &mut FileSystemStore) -> Result<bool, FsError> {
        let Some(id) = self.selected else {
            return Ok(false);
        };
        fs.delete_node(id)?;
        self.selected = None;
        Ok(true)
    }

    /// `true` when the open folder or the selection was removed elsewhere.
    pub fn is_stale(&self, fs: &FileSystemStore) -> bool {
        !fs.get_node(self.current_folder).is_some_and(FsNode::is_folder)
            || self.selected.is_some_and(|id| fs.get_node(id).is_none())
    }

    /// Falls back to the root for a vanished folder and drops a vanished selection.
    pub fn reconcile(&mut self, fs: &FileSystemStore) {
        if !fs.get_node(self.current_folder).is_some_and(FsNode::is_folder) {
            self.current_folder = fs.root_id();
            self.selected = None;
        }
        if self.selected.is_some_and(|id| fs.get_node(id).is_none()) {
            self.selected = None;
        }
    }

    /// Status bar text, such as `3 item(s) | Selected: README.txt`.
    pub fn status_line(&self, fs: &FileSystemStore) -> String {
        let mut line = format!("{} item(s)", self.items(fs).len());
        if let Some(id) = self.selected {
            let name = fs.get_node(id).map(|node| node.name.as_str()).unwrap_or("...");
            line.push_str(&format!(" | Selected: {name}"));
        }
        line
    }
}

fn follow_store_changes(files: RwSignal<FileSystemStore>, session: RwSignal<ExplorerSession>) {
    create_effect(move |_| {
        let stale = files.with(|fs| session.with_untracked(|s| s.is_stale(fs)));
        if stale {
            files.with_untracked(|fs| session.update(|s| s.reconcile(fs)));
        }
    });
}

/// Runs a session operation that writes to the store, then publishes the changed session.
///
/// Views read the store and the session together, so the store borrow ends before `session`
/// notifies them.
fn update_store_then_session<T>(
    files: RwSignal<FileSystemStore>,
    session: RwSignal<ExplorerSession>,
    op: impl FnOnce(&mut ExplorerSession, &mut FileSystemStore) -> T,
) -> Option<T> {
    let mut next = session.get_untracked();
    let result = files.try_update(|fs| op(&mut next, fs))?;
    if session.get_untracked() != next {
        session.set(next);
    }
    Some(result)
}

/// Opens `id` and asks the runtime to launch files; `Err` carries the notice to show.
fn activate_entry(
    files: RwSignal<FileSystemStore>,
    session: RwSignal<ExplorerSession>,
    services: AppServices,
    id: NodeId,
) -> Result<(), String> {
    let activation = files
        .with_untracked(|fs| session.try_update(|s| s.activate(fs, id)))
        .flatten();
    match activation {
        Some(ExplorerActivation::OpenFile { app_id, file_id }) => services
            .launcher
            .open_file(app_id, file_id)
            .map_err(|err| err.to_string()),
        Some(ExplorerActivation::Unassociated(message)) => Err(message),
        Some(ExplorerActivation::Navigated) | None => Ok(()),
    }
}

/// Mounts the explorer into a runtime window.
pub fn mount_explorer_app(context: AppMountContext) -> View {
    view! { <ExplorerApp files=context.files services=context.services /> }.into_view()
}

#[component]
/// File explorer window contents.
pub fn ExplorerApp(
    /// Shared file system.
    files: RwSignal<FileSystemStore>,
    /// Runtime services used to open files in other apps.
    services: AppServices,
) -> impl IntoView {
    let root = files.with_untracked(FileSystemStore::root_id);
    let session = create_rw_signal(ExplorerSession::new(root));
    let notice = create_rw_signal::<Option<String>>(None);
    let name_input = create_rw_signal(String::new());
    let confirm_delete = create_rw_signal(false);

    follow_store_changes(files, session);

    let report = move |result: Result<bool, FsError>| match result {
        Ok(_) => notice.set(None),
        Err(err) => notice.set(Some(err.to_string())),
    };
    let activate = move |id: NodeId| {
        confirm_delete.set(false);
        match activate_entry(files, session, services, id) {
            Ok(()) => notice.set(None),
            Err(message) => notice.set(Some(message)),
        }
    };
    let go_up = move |_| {
        confirm_delete.set(false);
        files.with_untracked(|fs| {
            session.update(|s| {
                s.go_up(fs);
            })
        });
    };
    let create_folder = move |_| {
        let name = name_input.get_untracked();
        let result = files.try_update(|fs| session.get_untracked().create_folder(fs, &name));
        if let Some(result) = result {
            if result.is_ok() {
                name_input.set(String::new());
            }
            report(result.map(|_| true));
        }
    };
    let create_text_file = move |_| {
        let name = name_input.get_untracked();
        let result = files.try_update(|fs| session.get_untracked().create_text_file(fs, &name));
        if let Some(result) = result {
            if result.is_ok() {
                name_input.set(String::new());
            }
            report(result.map(|_| true));
        }
    };
    let rename = move |_| {
        let name = name_input.get_untracked();
        let result =
            update_store_then_session(files, session, |s, fs| s.rename_selected(fs, &name));
        if let Some(result) = result {
            if result == Ok(true) {
                name_input.set(String::new());
            }
            report(result);
        }
    };
    let delete = move |_| {
        if !confirm_delete.get_untracked() {
            confirm_delete.set(true);
            return;
        }
        confirm_delete.set(false);
        let result = update_store_then_session(files, session, ExplorerSession::delete_selected);
        if let Some(result) = result {
            report(result);
        }
    };

    let rows = move || files.with(|fs| session.with(|s| s.rows(fs)));
    let has_selection = move || session.with(|s| s.selected().is_some());
    let selected_name = move || {
        files.with(|fs| {
            session.with(|s| {
                s.selected()
                    .and_then(|id| fs.get_node(id))
                    .map(|node| node.name.clone())
                    .unwrap_or_default()
            })
        })
    };

    view! {
        <div class="app-shell app-explorer-shell">
            <div class="app-toolbar" role="group" aria-label="Explorer actions">
                <button
                    type="button"
                    class="app-action"
                    title="Go Up"
                    disabled=move || !files.with(|fs| session.with(|s| s.can_go_up(fs)))
                    on:click=go_up
                >
                    "Up"
                </button>
                <input
                    type="text"
                    readonly=true
                    aria-label="Current Path"
                    prop:value=move || files.with(|fs| session.with(|s| s.current_path(fs)))
                />
                <input
                    type="text"
                    placeholder="Name"
                    aria-label="Name for new or renamed item"
                    prop:value=move || name_input.get()
                    on:input=move |ev| name_input.set(event_target_value(&ev))
                />
                <button type="button" class="app-action" on:click=create_folder>
                    "New Folder"
                </button>
                <button type="button" class="app-action" on:click=create_text_file>
                    "New Text File"
                </button>
                <button
                    type="button"
                    class="app-action"
                    disabled=move || !has_selection()
                    on:click=rename
                >
                    "Rename"
                </button>
                <button
                    type="button"
                    class="app-action app-action-danger"
                    disabled=move || !has_selection()
                    on:click=delete
                >
                    {move || {
                        if confirm_delete.get() {
                            format!("Delete \"{}\"?", selected_name())
                        } else {
                            "Delete".to_string()
                        }
                    }}
                </button>
            </div>

            <Show
                when=move || !rows().is_empty()
                fallback=|| view! { <p class="explorer-empty">"This folder is empty"</p> }
            >
                <ul class="explorer-list" role="listbox" aria-label="Folder contents">
                    <For each=rows key=|row| row.clone() let:row>
                        <li>
                            <button
                                type="button"
                                class=move || {
                                    if session.with(|s| s.selected() == Some(row.id)) {
                                        "explorer-row selected"
                                    } else {
                                        "explorer-row"
                                    }
                                }
                                title=format!("Name: {}", row.name)
                                on:click=move |_| {
                                    confirm_delete.set(false);
                                    session.update(|s| s.select(row.id));
                                }
                                on:dblclick=move |_| activate(row.id)
                            >
                                <span class="explorer-row-icon" aria-hidden="true">
                                    {if row.is_folder { "[DIR]" } else { "[TXT]" }}
                                </span>
                                <span>{row.name.clone()}</span>
                            </button>
                        </li>
                    </For>
                </ul>
            </Show>

            <div class="app-statusbar">
                <span>{move || files.with(|fs| session.with(|s| s.status_line(fs)))}</span>
                <span class="app-notice">{move || notice.get().unwrap_or_default()}</span>
            </div>
        </div>
    }
}
