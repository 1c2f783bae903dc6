//! Runtime provider and context wiring for the desktop.
//!
//! This module owns the long-lived reducer container, the shared file system, the runtime effect
//! queue, and the app registry. UI composition stays in [`crate::components`].

use desktop_app_contract::{
    AppCommand, AppMountContext, AppServices, CommandRejected, CommandResult,
};
use desktop_fs::{FileSystemStore, NodeId};
use leptos::*;

use crate::{
    apps::{AppRegistry, LaunchError},
    effect_executor,
    model::{DesktopState, DragKind, PointerPosition, WindowDrag, WindowId},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive window-manager state.
    pub state: RwSignal<DesktopState>,
    /// Shared file system, seeded at startup.
    pub files: RwSignal<FileSystemStore>,
    /// Queue of runtime effects emitted by the reducer.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Window frame drag in progress, if any.
    pub drag: RwSignal<Option<WindowDrag>>,
    /// Immutable app table.
    pub registry: StoredValue<AppRegistry>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates the runtime signals in the current reactive owner.
    pub fn new(registry: AppRegistry) -> Self {
        let state = create_rw_signal(DesktopState::default());
        let files = create_rw_signal(FileSystemStore::seeded());
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
        let drag = create_rw_signal(None::<WindowDrag>);
        let registry = store_value(registry);

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut desktop = state.get_untracked();
            let previous = desktop.clone();
            let new_effects = files.with_untracked(|fs| reduce_desktop(&mut desktop, fs, action));
            if desktop != previous {
                state.set(desktop);
            }
            if !new_effects.is_empty() {
                effects.update(|queue| queue.extend(new_effects));
            }
        });

        Self {
            state,
            files,
            effects,
            drag,
            registry,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Opens an unbound window of `app_id`. Returns `false` for unregistered apps.
    pub fn open_app(&self, app_id: &str) -> bool {
        match self
            .registry
            .with_value(|registry| registry.default_open_request(app_id))
        {
            Some(request) => {
                self.dispatch_action(DesktopAction::OpenWindow(request));
                true
            }
            None => {
                logging::warn!("no registered app `{app_id}`");
                false
            }
        }
    }

    /// Opens `file_id` in a window of its associated app.
    ///
    /// # Errors
    ///
    /// Returns the [`LaunchError`] describing why the file cannot be opened.
    pub fn open_file(&self, file_id: NodeId) -> Result<(), LaunchError> {
        let request = self.files.with_untracked(|fs| {
            self.registry
                .with_value(|registry| registry.open_request_for_file(fs, file_id))
        })?;
        self.dispatch_action(DesktopAction::OpenWindow(request));
        Ok(())
    }

    /// Applies a command sent by the app hosted in `window_id`.
    ///
    /// # Errors
    ///
    /// [`CommandRejected`] with the [`LaunchError`] text when a file cannot be opened.
    pub fn handle_app_command(&self, window_id: WindowId, command: AppCommand) -> CommandResult {
        match command {
            AppCommand::SetWindowTitle { title } => {
                self.dispatch_action(DesktopAction::SetWindowTitle { window_id, title });
                Ok(())
            }
            AppCommand::OpenFile { app_id, file_id } => {
                let request = self.files.with_untracked(|fs| {
                    self.registry.with_value(|registry| {
                        registry.open_request_with_app(fs, file_id, app_id.as_str())
                    })
                });
                match request {
                    Ok(request) => {
                        self.dispatch_action(DesktopAction::OpenWindow(request));
                        Ok(())
                    }
                    Err(err) => {
                        logging::warn!(
                            "window {} could not open file {file_id}: {err}",
                            window_id.0
                        );
                        Err(err.into())
                    }
                }
            }
        }
    }

    /// Service bundle handed to the app hosted in `window_id`.
    pub fn app_services(&self, window_id: WindowId) -> AppServices {
        let runtime = *self;
        AppServices::new(Callback::new(move |command: AppCommand| {
            runtime.handle_app_command(window_id, command)
        }))
    }

    /// Drains queued runtime effects in emission order.
    pub fn take_effects(&self) -> Vec<RuntimeEffect> {
        let mut drained = Vec::new();
        self.effects.update(|queue| drained = std::mem::take(queue));
        drained
    }

    /// Starts dragging the frame of `window_id`. Ignored for unknown windows.
    pub fn begin_drag(&self, window_id: WindowId, kind: DragKind, pointer: PointerPosition) {
        let Some(rect) = self
            .state
            .with_untracked(|state| state.window(window_id).map(|w| w.rect))
        else {
            return;
        };
        self.drag.set(Some(WindowDrag::new(window_id, kind, rect, pointer)));
    }

    /// Moves the pointer of the active drag.
    pub fn update_drag(&self, pointer: PointerPosition) {
        if self.drag.with_untracked(Option::is_none) {
            return;
        }
        self.drag.update(|drag| {
            if let Some(drag) = drag {
                drag.pointer = pointer;
            }
        });
    }

    /// Ends the active drag and commits the previewed rect through the reducer.
    pub fn end_drag(&self) {
        let Some(drag) = self.drag.get_untracked() else {
            return;
        };
        self.drag.set(None);
        let rect = drag.rect();
        if rect == drag.rect_start {
            return;
        }
        let window_id = drag.window_id;
        self.dispatch_action(match drag.kind {
            DragKind::Move => DesktopAction::MoveWindow {
                window_id,
                x: rect.x,
                y: rect.y,
            },
            DragKind::Resize => DesktopAction::ResizeWindow {
                window_id,
                w: rect.w,
                h: rect.h,
            },
        });
    }
}

impl From<LaunchError> for CommandRejected {
    fn from(err: LaunchError) -> Self {
        Self(err.to_string())
    }
}

/// Mounts the registered app for `window_id` with its bound file and services.
pub fn mount_window_app(runtime: DesktopRuntimeContext, window_id: WindowId) -> View {
    let Some(window) = runtime
        .state
        .with_untracked(|state| state.window(window_id).cloned())
    else {
        return view! { <p>"Closed"</p> }.into_view();
    };
    let Some(module) = runtime.registry.with_value(|registry| {
        registry
            .find_app_by_id(window.app_id.as_str())
            .map(|app| app.module)
    }) else {
        logging::warn!("window {} hosts unregistered app `{}`", window_id.0, window.app_id);
        return view! { <p>"Application unavailable"</p> }.into_view();
    };

    module.mount(AppMountContext {
        app_id: window.app_id,
        window_id: window.id.0,
        bound_file: window.file_id,
        files: runtime.files,
        services: runtime.app_services(window_id),
    })
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// App table; defaults to [`AppRegistry::builtin`].
    #[prop(optional)]
    registry: Option<AppRegistry>,
    children: Children,
) -> impl IntoView {
    let runtime = DesktopRuntimeContext::new(registry.unwrap_or_default());
    provide_context(runtime);
    effect_executor::install(runtime);
    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppId;
    use desktop_fs::{CreateNodeOptions, FsNodeKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn readme(runtime: &DesktopRuntimeContext) -> NodeId {
        runtime.files.with_untracked(|fs| {
            fs.find_child_by_name(fs.root_id(), "README.txt")
                .expect("readme")
                .id
        })
    }

    #[test]
    fn open_app_dispatches_through_reducer() {
        let rt = create_runtime();
        let runtime = DesktopRuntimeContext::new(AppRegistry::builtin());

        assert!(runtime.open_app("explorer"));
        assert!(!runtime.open_app("paint"));

        let state = runtime.state.get_untracked();
        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.title, "File Explorer");
        assert_eq!(window.icon, "/icons/folder.png");
        assert_eq!(state.focused_window_id(), Some(window.id));
        assert_eq!(
            runtime.take_effects(),
            vec![
                RuntimeEffect::WindowOpened(window.id),
                RuntimeEffect::FocusWindowInput(window.id),
            ]
        );
        assert!(runtime.take_effects().is_empty());
        rt.dispose();
    }

    #[test]
    fn open_file_uses_associated_app_and_reports_failures() {
        let rt = create_runtime();
        let runtime = DesktopRuntimeContext::new(AppRegistry::builtin());
        let readme = readme(&runtime);
        let plain = runtime.files.try_update(|fs| {
            fs.create_node(
                fs.root_id(),
                "blob",
                FsNodeKind::File,
                CreateNodeOptions::default(),
            )
            .map(|node| node.id)
        });
        let plain = plain.expect("signal alive").expect("create blob");

        assert_eq!(runtime.open_file(readme), Ok(()));
        assert_eq!(
            runtime.open_file(plain),
            Err(LaunchError::NoAssociatedApp {
                name: "blob".to_string()
            })
        );

        let state = runtime.state.get_untracked();
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.windows[0].title, "README.txt - Notepad");
        rt.dispose();
    }

    #[test]
    fn app_services_route_commands_for_their_window() {
        let rt = create_runtime();
        let runtime = DesktopRuntimeContext::new(AppRegistry::builtin());
        let readme = readme(&runtime);
        runtime.open_app("explorer");
        let explorer = runtime.state.get_untracked().windows[0].id;
        let services = runtime.app_services(explorer);

        services.window.set_title("C:/ - File Explorer");
        let opened = services
            .launcher
            .open_file(AppId::trusted("notepad"), readme);
        let refused = services
            .launcher
            .open_file(AppId::trusted("music"), readme);

        assert_eq!(opened, Ok(()));
        assert_eq!(
            refused,
            Err(CommandRejected(
                "No application available to open \"README.txt\" (App ID: music)".to_string()
            ))
        );

        let state = runtime.state.get_untracked();
        assert_eq!(
            state.window(explorer).map(|w| w.title.as_str()),
            Some("C:/ - File Explorer")
        );
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.windows[1].title, "README.txt - Notepad");
        assert_eq!(state.focused_window_id(), Some(state.windows[1].id));
        rt.dispose();
    }

    #[test]
    fn commands_for_closed_windows_are_ignored() {
        let rt = create_runtime();
        let runtime = DesktopRuntimeContext::new(AppRegistry::builtin());
        runtime.open_app("about");
        let about = runtime.state.get_untracked().windows[0].id;
        let services = runtime.app_services(about);

        runtime.dispatch_action(DesktopAction::CloseWindow { window_id: about });
        let before = runtime.state.get_untracked();
        services.window.set_title("late");

        assert_eq!(runtime.state.get_untracked(), before);
        assert!(before.windows.is_empty());
        rt.dispose();
    }

    #[test]
    fn drags_commit_on_release_only() {
        let rt = create_runtime();
        let runtime = DesktopRuntimeContext::new(AppRegistry::builtin());
        runtime.open_app("about");
        let about = runtime.state.get_untracked().windows[0].id;

        runtime.begin_drag(about, DragKind::Move, PointerPosition { x: 120, y: 105 });
        runtime.update_drag(PointerPosition { x: 170, y: 145 });
        let preview = runtime.drag.get_untracked().map(|drag| drag.rect());
        let window_rect = |runtime: &DesktopRuntimeContext| {
            runtime
                .state
                .with_untracked(|state| state.window(about).map(|w| w.rect))
        };
        assert_eq!(window_rect(&runtime).map(|r| (r.x, r.y)), Some((100, 100)));
        assert_eq!(preview.map(|r| (r.x, r.y)), Some((150, 140)));

        runtime.end_drag();
        assert_eq!(runtime.drag.get_untracked(), None);
        assert_eq!(window_rect(&runtime).map(|r| (r.x, r.y)), Some((150, 140)));

        runtime.begin_drag(about, DragKind::Resize, PointerPosition { x: 550, y: 440 });
        runtime.update_drag(PointerPosition { x: 600, y: 420 });
        runtime.end_drag();
        assert_eq!(window_rect(&runtime).map(|r| (r.w, r.h)), Some((450, 280)));

        runtime.begin_drag(WindowId(99), DragKind::Move, PointerPosition { x: 0, y: 0 });
        assert_eq!(runtime.drag.get_untracked(), None);
        runtime.update_drag(PointerPosition { x: 10, y: 10 });
        runtime.end_drag();
        rt.dispose();
    }
}
