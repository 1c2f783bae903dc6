//! Built-in application registry and open-request helpers.

mod placeholders;

use desktop_app_contract::{AppId, AppModule};
use desktop_fs::{FileSystemStore, FsNode, NodeId};
use thiserror::Error;

use crate::model::OpenWindowRequest;

pub use placeholders::{normalize_browser_url, DEFAULT_BROWSER_URL};

pub const NOTEPAD_APP_ID: &str = "notepad";
pub const ABOUT_APP_ID: &str = "about";
pub const TICTACTOE_APP_ID: &str = "tictactoe";
pub const CALCULATOR_APP_ID: &str = "calculator";
pub const BROWSER_APP_ID: &str = "browser";
pub const EXPLORER_APP_ID: &str = "explorer";

/// Registry entry describing one launchable application.
#[derive(Debug, Clone)]
pub struct AppDefinition {
    pub id: AppId,
    pub name: &'static str,
    pub icon: &'static str,
    pub module: AppModule,
}

impl AppDefinition {
    fn builtin(
        id: &'static str,
        name: &'static str,
        icon: &'static str,
        module: AppModule,
    ) -> Self {
        Self {
            id: AppId::trusted(id),
            name,
            icon,
            module,
        }
    }
}

// Entries are identified by id; the module is a plain function pointer.
impl PartialEq for AppDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AppDefinition {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a file could not be opened in an application window.
pub enum LaunchError {
    #[error("Error: No file with id {0} exists.")]
    MissingFile(NodeId),
    #[error("\"{0}\" is a folder, not a file.")]
    NotAFile(String),
    #[error("Don't know how to open \"{name}\". No associated application.")]
    NoAssociatedApp { name: String },
    #[error("No application available to open \"{name}\" (App ID: {app_id})")]
    UnknownApp { name: String, app_id: String },
}

/// Immutable table of launchable apps, built once and shared through the runtime context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRegistry {
    apps: Vec<AppDefinition>,
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AppRegistry {
    pub fn new(apps: Vec<AppDefinition>) -> Self {
        Self { apps }
    }

    /// The six apps shipped with the desktop, in desktop-icon order.
    pub fn builtin() -> Self {
        Self::new(vec![
            AppDefinition::builtin(
                NOTEPAD_APP_ID,
                "Notepad",
                "/icons/notepad.png",
                AppModule::new(desktop_app_notepad::mount_notepad_app),
            ),
            AppDefinition::builtin(
                ABOUT_APP_ID,
                "About OS",
                "/icons/about.png",
                AppModule::new(placeholders::mount_about_app),
            ),
            AppDefinition::builtin(
                TICTACTOE_APP_ID,
                "Tic Tac Toe",
                "/icons/tictactoe.png",
                AppModule::new(placeholders::mount_tictactoe_placeholder_app),
            ),
            AppDefinition::builtin(
                CALCULATOR_APP_ID,
                "Calculator",
                "/icons/calculator.png",
                AppModule::new(placeholders::mount_calculator_placeholder_app),
            ),
            AppDefinition::builtin(
                BROWSER_APP_ID,
                "Web Browser",
                "/icons/browser.png",
                AppModule::new(placeholders::mount_browser_app),
            ),
            AppDefinition::builtin(
                EXPLORER_APP_ID,
                "File Explorer",
                "/icons/folder.png",
                AppModule::new(desktop_app_explorer::mount_explorer_app),
            ),
        ])
    }

    pub fn apps(&self) -> &[AppDefinition] {
        &self.apps
    }

    pub fn find_app_by_id(&self, app_id: &str) -> Option<&AppDefinition> {
        self.apps.iter().find(|app| app.id.as_str() == app_id)
    }

    /// Request for a fresh, unbound window of `app_id`.
    pub fn default_open_request(&self, app_id: &str) -> Option<OpenWindowRequest> {
        self.find_app_by_id(app_id)
            .cloned()
            .map(OpenWindowRequest::new)
    }

    /// Request for a window of the app associated with `file_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] when the id is not a file, the file has no associated app, or the
    /// associated app is not registered.
    pub fn open_request_for_file(
        &self,
        files: &FileSystemStore,
        file_id: NodeId,
    ) -> Result<OpenWindowRequest, LaunchError> {
        let node = file_node(files, file_id)?;
        let app_id = node.app_id().ok_or_else(|| LaunchError::NoAssociatedApp {
            name: node.name.clone(),
        })?;
        self.open_request_with_app(files, file_id, app_id)
    }

    /// Request for a window of `app_id` bound to `file_id`, whatever app the file names.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] when the id is not a file or `app_id` is not registered.
    pub fn open_request_with_app(
        &self,
        files: &FileSystemStore,
        file_id: NodeId,
        app_id: &str,
    ) -> Result<OpenWindowRequest, LaunchError> {
        let node = file_node(files, file_id)?;
        let app = self
            .find_app_by_id(app_id)
            .ok_or_else(|| LaunchError::UnknownApp {
                name: node.name.clone(),
                app_id: app_id.to_string(),
            })?;
        Ok(OpenWindowRequest::with_file(app.clone(), file_id))
    }
}

fn file_node(files: &FileSystemStore, file_id: NodeId) -> Result<&FsNode, LaunchError> {
    let node = files
        .get_node(file_id)
        .ok_or(LaunchError::MissingFile(file_id))?;
    if !node.is_file() {
        return Err(LaunchError::NotAFile(node.name.clone()));
    }
    Ok(node)
}
