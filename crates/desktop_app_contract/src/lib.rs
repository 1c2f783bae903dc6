//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! A hosted app is an [`AppModule`]: a mount function that turns an [`AppMountContext`] into a
//! view. The context carries the optional bound file, the shared file system, and an
//! [`AppServices`] bundle through which the app talks back to the runtime (for example to
//! retitle its window).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_fs::{FileSystemStore, NodeId};
use leptos::{logging, Callable, Callback, RwSignal, View};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

const APP_ID_MAX_LEN: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons an application id was rejected.
pub enum AppIdError {
    /// The id is empty or longer than the allowed length.
    #[error("application id `{0}` must be 1-32 characters")]
    Length(String),
    /// The id contains characters outside `[a-z0-9-]` or does not start with a letter.
    #[error("invalid application id `{0}`; expected lowercase letters, digits and `-`")]
    Charset(String),
}

/// Stable identifier for an application type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    /// Returns an app identifier when `raw` is a short lowercase slug such as `notepad`.
    pub fn new(raw: impl Into<String>) -> Result<Self, AppIdError> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() > APP_ID_MAX_LEN {
            return Err(AppIdError::Length(raw));
        }
        let bytes = raw.as_bytes();
        let valid = bytes[0].is_ascii_lowercase()
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-');
        if !valid {
            return Err(AppIdError::Charset(raw));
        }
        Ok(Self(raw))
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Commands a hosted app sends to the desktop runtime.
pub enum AppCommand {
    /// Replace the title of the sending window.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
    /// Open `file_id` in a new window hosted by `app_id`.
    OpenFile {
        /// Application that should host the file.
        app_id: AppId,
        /// File to bind to the new window.
        file_id: NodeId,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
/// A command the runtime refused, with a message meant for the user.
pub struct CommandRejected(pub String);

/// Runtime reply to an [`AppCommand`].
pub type CommandResult = Result<(), CommandRejected>;

#[derive(Clone, Copy)]
/// Window-scoped service for title updates.
pub struct WindowService {
    sender: Callback<AppCommand, CommandResult>,
}

impl WindowService {
    /// Requests a title change for the current window.
    pub fn set_title(&self, title: impl Into<String>) {
        let command = AppCommand::SetWindowTitle {
            title: title.into(),
        };
        if let Err(err) = self.sender.call(command) {
            logging::warn!("title update refused: {err}");
        }
    }
}

#[derive(Clone, Copy)]
/// Service for launching other apps on files.
pub struct LauncherService {
    sender: Callback<AppCommand, CommandResult>,
}

impl LauncherService {
    /// Requests a new window of `app_id` bound to `file_id`.
    ///
    /// # Errors
    ///
    /// [`CommandRejected`] carrying the text to show when the runtime cannot open the file.
    pub fn open_file(&self, app_id: AppId, file_id: NodeId) -> CommandResult {
        self.sender.call(AppCommand::OpenFile { app_id, file_id })
    }
}

#[derive(Clone, Copy)]
/// Injected app services bundle.
pub struct AppServices {
    /// Window integration service.
    pub window: WindowService,
    /// App launching service.
    pub launcher: LauncherService,
}

impl AppServices {
    /// Creates service handles from the runtime command callback.
    pub fn new(sender: Callback<AppCommand, CommandResult>) -> Self {
        Self {
            window: WindowService { sender },
            launcher: LauncherService { sender },
        }
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App id from the runtime registry.
    pub app_id: AppId,
    /// Runtime window id.
    pub window_id: WindowRuntimeId,
    /// File bound to the window at open time, if any.
    pub bound_file: Option<NodeId>,
    /// Shared file system.
    pub files: RwSignal<FileSystemStore>,
    /// Runtime service bundle.
    pub services: AppServices,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Render capability of a registered app.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn application_ids_are_short_lowercase_slugs() {
        assert!(AppId::new("notepad").is_ok());
        assert!(AppId::new("tictactoe").is_ok());
        assert!(AppId::new("web-browser2").is_ok());
        assert_eq!(
            AppId::new(""),
            Err(AppIdError::Length(String::new()))
        );
        assert!(matches!(AppId::new("Notepad"), Err(AppIdError::Charset(_))));
        assert!(matches!(AppId::new("2048"), Err(AppIdError::Charset(_))));
        assert!(matches!(AppId::new("note pad"), Err(AppIdError::Charset(_))));
        assert!(matches!(
            AppId::new("a".repeat(APP_ID_MAX_LEN + 1)),
            Err(AppIdError::Length(_))
        ));
    }

    #[test]
    fn app_id_serializes_as_plain_string() {
        let id = AppId::trusted("notepad");

        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"notepad\"");
        assert_eq!(id.to_string(), "notepad");
    }

    #[test]
    fn services_forward_commands_to_runtime_sender() {
        let runtime = leptos::create_runtime();
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = sent.clone();
        let services = AppServices::new(Callback::new(move |command: AppCommand| {
            sink.borrow_mut().push(command);
            Ok(())
        }));

        services.window.set_title("notes.txt - Notepad");
        let opened = services
            .launcher
            .open_file(AppId::trusted("notepad"), NodeId(7));

        assert_eq!(opened, Ok(()));
        assert_eq!(
            *sent.borrow(),
            vec![
                AppCommand::SetWindowTitle {
                    title: "notes.txt - Notepad".to_string()
                },
                AppCommand::OpenFile {
                    app_id: AppId::trusted("notepad"),
                    file_id: NodeId(7),
                },
            ]
        );
        runtime.dispose();
    }

    #[test]
    fn launcher_passes_refusals_back_to_the_app() {
        let runtime = leptos::create_runtime();
        let services = AppServices::new(Callback::new(|command: AppCommand| match command {
            AppCommand::OpenFile { app_id, .. } => Err(CommandRejected(format!(
                "No application available (App ID: {app_id})"
            ))),
            AppCommand::SetWindowTitle { .. } => Ok(()),
        }));

        let opened = services.launcher.open_file(AppId::trusted("music"), NodeId(3));

        assert_eq!(
            opened.map_err(|err| err.to_string()),
            Err("No application available (App ID: music)".to_string())
        );
        runtime.dispose();
    }
}
