//! Notepad desktop app: a plain-text editor bound to at most one file.
//!
//! [`NotepadDocument`] holds the editing state and its file-system round trips; [`NotepadApp`]
//! renders it and keeps the hosting window's title in sync.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppMountContext, AppServices};
use desktop_fs::{
    text_file_name, CreateNodeOptions, FileSystemStore, FsError, FsNodeKind, NodeId,
    TEXT_FILE_APP_ID,
};
use leptos::*;
use thiserror::Error;

/// Text shown in a notepad opened without a file.
pub const DEFAULT_NOTEPAD_TEXT: &str = "This is a simple notepad.\nStart typing...";

const UNTITLED_NAME: &str = "Untitled";
const DEFAULT_SAVE_FOLDER: &str = "Documents";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a save was refused.
pub enum NotepadError {
    /// Save requires a bound file; use save-as first.
    #[error("This document has not been saved yet. Use Save As to choose a name.")]
    Unbound,
    /// The file system refused the write.
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Editing state of one notepad window.
pub struct NotepadDocument {
    file_id: Option<NodeId>,
    file_name: Option<String>,
    text: String,
    saved_text: String,
}

impl Default for NotepadDocument {
    fn default() -> Self {
        Self::untitled()
    }
}

impl NotepadDocument {
    /// A clean, unbound document holding [`DEFAULT_NOTEPAD_TEXT`].
    pub fn untitled() -> Self {
        Self {
            file_id: None,
            file_name: None,
            text: DEFAULT_NOTEPAD_TEXT.to_string(),
            saved_text: DEFAULT_NOTEPAD_TEXT.to_string(),
        }
    }

    /// Loads the text of `bound_file`, falling back to an untitled document when the binding is
    /// absent or does not resolve to a file.
    pub fn load(fs: &FileSystemStore, bound_file: Option<NodeId>) -> Self {
        let Some(file_id) = bound_file else {
            return Self::untitled();
        };
        match fs.get_node(file_id) {
            Some(node) if node.is_file() => {
                let text = node.content().unwrap_or_default().to_string();
                Self {
                    file_id: Some(file_id),
                    file_name: Some(node.name.clone()),
                    saved_text: text.clone(),
                    text,
                }
            }
            _ => {
                logging::warn!("notepad: file {file_id} is not a readable file");
                Self::untitled()
            }
        }
    }

    /// Bound file, if any.
    pub fn file_id(&self) -> Option<NodeId> {
        self.file_id
    }

    /// Name of the bound file as last seen.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Current editor text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the editor text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// `true` when the text differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.text != self.saved_text
    }

    /// Window title: `"<name> - Notepad"`, prefixed with `*` while there are unsaved edits.
    pub fn title(&self) -> String {
        let name = self.file_name.as_deref().unwrap_or(UNTITLED_NAME);
        let marker = if self.is_dirty() { "*" } else { "" };
        format!("{marker}{name} - Notepad")
    }

    /// Writes the text back to the bound file.
    ///
    /// # Errors
    ///
    /// [`NotepadError::Unbound`] without a bound file, or the [`FsError`] from the write.
    pub fn save(&mut self, fs: &mut FileSystemStore) -> Result<(), NotepadError> {
        let file_id = self.file_id.ok_or(NotepadError::Unbound)?;
        fs.update_node_content(file_id, self.text.clone())?;
        self.saved_text = self.text.clone();
        Ok(())
    }

    /// Creates a new text file named `name` in `folder_id` holding the current text and binds the
    /// document to it. `.txt` is appended when missing.
    ///
    /// # Errors
    ///
    /// The [`FsError`] from creating the file; the document is unchanged on failure.
    pub fn save_as(
        &mut self,
        fs: &mut FileSystemStore,
        folder_id: NodeId,
        name: &str,
    ) -> Result<NodeId, NotepadError> {
        if name.trim().is_empty() {
            return Err(FsError::InvalidName(name.to_string()).into());
        }
        let file_name = text_file_name(name);
        let node = fs.create_node(
            folder_id,
            file_name,
            FsNodeKind::File,
            CreateNodeOptions::text(self.text.clone(), TEXT_FILE_APP_ID),
        )?;
        self.file_id = Some(node.id);
        self.file_name = Some(node.name.clone());
        self.saved_text = self.text.clone();
        Ok(node.id)
    }

    /// `true` when the bound file was renamed or removed since it was last seen.
    pub fn file_name_changed(&self, fs: &FileSystemStore) -> bool {
        let Some(file_id) = self.file_id else {
            return false;
        };
        fs.get_node(file_id).map(|node| node.name.as_str()) != self.file_name.as_deref()
    }

    /// Follows renames of the bound file and drops the binding when the file is gone.
    ///
    /// The text is kept either way.
    pub fn sync_file_name(&mut self, fs: &FileSystemStore) {
        let Some(file_id) = self.file_id else {
            return;
        };
        match fs.get_node(file_id) {
            Some(node) => self.file_name = Some(node.name.clone()),
            None => {
                logging::warn!("notepad: bound file {file_id} was deleted");
                self.file_id = None;
                self.file_name = None;
            }
        }
    }
}

/// Folder offered for save-as: `Documents` under the root when present, the root otherwise.
pub fn default_save_folder(fs: &FileSystemStore) -> NodeId {
    fs.find_child_by_name(fs.root_id(), DEFAULT_SAVE_FOLDER)
        .filter(|node| node.is_folder())
        .map(|node| node.id)
        .unwrap_or_else(|| fs.root_id())
}

fn push_title_changes(document: RwSignal<NotepadDocument>, services: AppServices) {
    create_effect(move |previous: Option<String>| {
        let title = document.with(NotepadDocument::title);
        if previous.as_deref() != Some(title.as_str()) {
            services.window.set_title(title.clone());
        }
        title
    });
}

fn follow_bound_file(files: RwSignal<FileSystemStore>, document: RwSignal<NotepadDocument>) {
    create_effect(move |_| {
        let stale = files.with(|fs| document.with_untracked(|doc| doc.file_name_changed(fs)));
        if stale {
            files.with_untracked(|fs| document.update(|doc| doc.sync_file_name(fs)));
        }
    });
}

// Store writes finish before `document` changes; the title effect reaches back into the store.
fn save_document(
    files: RwSignal<FileSystemStore>,
    document: RwSignal<NotepadDocument>,
) -> Option<Result<(), NotepadError>> {
    let mut next = document.get_untracked();
    let result = files.try_update(|fs| next.save(fs))?;
    if result.is_ok() {
        document.set(next);
    }
    Some(result)
}

fn save_document_as(
    files: RwSignal<FileSystemStore>,
    document: RwSignal<NotepadDocument>,
    name: &str,
) -> Option<Result<NodeId, NotepadError>> {
    let mut next = document.get_untracked();
    let result = files.try_update(|fs| {
        let folder = default_save_folder(fs);
        next.save_as(fs, folder, name)
    })?;
    if result.is_ok() {
        document.set(next);
    }
    Some(result)
}

/// Mounts the notepad into a runtime window.
pub fn mount_notepad_app(context: AppMountContext) -> View {
    view! {
        <NotepadApp
            bound_file=context.bound_file
            files=context.files
            services=context.services
        />
    }
    .into_view()
}

#[component]
/// Notepad app window contents.
pub fn NotepadApp(
    /// File opened with the window, if any.
    bound_file: Option<NodeId>,
    /// Shared file system.
    files: RwSignal<FileSystemStore>,
    /// Runtime services for the hosting window.
    services: AppServices,
) -> impl IntoView {
    let document =
        create_rw_signal(files.with_untracked(|fs| NotepadDocument::load(fs, bound_file)));
    let notice = create_rw_signal::<Option<String>>(None);
    let save_as_name = create_rw_signal(String::new());

    push_title_changes(document, services);
    follow_bound_file(files, document);

    let save = move |_| match save_document(files, document) {
        Some(Ok(())) => notice.set(Some("Saved".to_string())),
        Some(Err(err)) => notice.set(Some(err.to_string())),
        None => {}
    };
    let save_as = move |_| {
        let name = save_as_name.get_untracked();
        match save_document_as(files, document, &name) {
            Some(Ok(file_id)) => {
                let path = files.with_untracked(|fs| fs.get_path_string(file_id));
                save_as_name.set(String::new());
                notice.set(Some(format!("Saved as {path}")));
            }
            Some(Err(err)) => notice.set(Some(err.to_string())),
            None => {}
        }
    };

    view! {
        <div class="app-shell app-notepad-shell">
            <div class="app-toolbar" role="group" aria-label="Notepad actions">
                <button
                    type="button"
                    class="app-action"
                    disabled=move || document.with(|doc| doc.file_id().is_none())
                    on:click=save
                >
                    "Save"
                </button>
                <input
                    type="text"
                    placeholder="new-note.txt"
                    aria-label="Save as file name"
                    prop:value=move || save_as_name.get()
                    on:input=move |ev| save_as_name.set(event_target_value(&ev))
                />
                <button type="button" class="app-action" on:click=save_as>
                    "Save As"
                </button>
            </div>
            <textarea
                class="notepad-page"
                spellcheck="false"
                autocomplete="off"
                aria-label="Notepad document editor"
                prop:value=move || document.with(|doc| doc.text().to_string())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    document.update(|doc| doc.set_text(text));
                    notice.set(None);
                }
            />
            <div class="app-statusbar">
                <span>
                    {move || document.with(|doc| format!("Lines: {}", doc.text().lines().count()))}
                </span>
                <span>{move || notice.get().unwrap_or_default()}</span>
            </div>
        </div>
    }
}
