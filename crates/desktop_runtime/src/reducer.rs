//! Reducer actions, side-effect intents, and transition logic for the window manager.

use desktop_fs::FileSystemStore;

use crate::{
    model::{DesktopState, OpenWindowRequest, WindowId},
    window_manager,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Restore a minimized window and focus it.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Taskbar button press for a window.
    ToggleTaskbarWindow {
        /// Window whose taskbar button was pressed.
        window_id: WindowId,
    },
    /// Overwrite a window's position.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Overwrite a window's size.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// New width.
        w: i32,
        /// New height.
        h: i32,
    },
    /// Replace a window's title.
    SetWindowTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title.
        title: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell to execute.
pub enum RuntimeEffect {
    /// A window was created.
    WindowOpened(WindowId),
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// A window was removed.
    WindowClosed(WindowId),
}

/// Applies a [`DesktopAction`] to `state` and collects resulting side effects.
///
/// `files` resolves file bindings for newly opened windows. Actions naming unknown windows leave
/// `state` untouched and emit nothing.
pub fn reduce_desktop(
    state: &mut DesktopState,
    files: &FileSystemStore,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = window_manager::open_window(state, files, &req.app, req.file_id);
            effects.push(RuntimeEffect::WindowOpened(window_id));
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if window_manager::close_window(state, window_id) {
                effects.push(RuntimeEffect::WindowClosed(window_id));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if window_manager::focus_window(state, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            window_manager::minimize_window(state, window_id);
        }
        DesktopAction::RestoreWindow { window_id } => {
            if window_manager::restore_window(state, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            if window_manager::toggle_taskbar_window(state, window_id)
                && state.is_focused(window_id)
            {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            window_manager::update_window_position(state, window_id, x, y);
        }
        DesktopAction::ResizeWindow { window_id, w, h } => {
            window_manager::update_window_size(state, window_id, w, h);
        }
        DesktopAction::SetWindowTitle { window_id, title } => {
            window_manager::update_window_title(state, window_id, title);
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use desktop_fs::{CreateNodeOptions, FsNodeKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::AppRegistry;

    fn open(state: &mut DesktopState, files: &FileSystemStore, app_id: &str) -> WindowId {
        let request = AppRegistry::builtin()
            .default_open_request(app_id)
            .expect("builtin app");
        let effects = reduce_desktop(state, files, DesktopAction::OpenWindow(request));
        let window_id = state.windows.last().expect("window").id;
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::WindowOpened(window_id),
                RuntimeEffect::FocusWindowInput(window_id),
            ]
        );
        window_id
    }

    fn assert_focus_is_topmost(state: &DesktopState) {
        if let Some(focused) = state.focused_window_id() {
            assert_eq!(state.topmost_window_id(), Some(focused));
        }
    }

    #[test]
    fn open_window_focuses_new_window_with_increasing_z() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();

        let first = open(&mut state, &files, "explorer");
        let second = open(&mut state, &files, "notepad");

        let first_z = state.window(first).expect("first").z_index;
        let second_z = state.window(second).expect("second").z_index;
        assert_eq!(first_z, 10);
        assert!(second_z > first_z);
        assert_eq!(state.focused_window_id(), Some(second));
        assert_ne!(first, second);
        assert_focus_is_topmost(&state);
    }

    #[test]
    fn focusing_background_window_raises_it_to_top() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let a = open(&mut state, &files, "about");
        let _b = open(&mut state, &files, "calculator");
        let _c = open(&mut state, &files, "tictactoe");

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::FocusWindow { window_id: a },
        );

        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(a)]);
        assert_eq!(state.focused_window_id(), Some(a));
        assert_eq!(state.topmost_window_id(), Some(a));
        let top = state.window(a).expect("a").z_index;
        assert!(state.windows.iter().all(|w| w.id == a || w.z_index < top));
    }

    #[test]
    fn focusing_focused_window_is_noop() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let a = open(&mut state, &files, "about");
        let snapshot = state.clone();

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::FocusWindow { window_id: a },
        );

        assert!(effects.is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn z_indices_stay_unique_across_focus_changes() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let ids: Vec<_> = ["about", "browser", "explorer"]
            .into_iter()
            .map(|app| open(&mut state, &files, app))
            .collect();

        for window_id in [ids[0], ids[2], ids[1], ids[0]] {
            reduce_desktop(&mut state, &files, DesktopAction::FocusWindow { window_id });
            assert_focus_is_topmost(&state);
        }

        let mut z: Vec<_> = state.windows.iter().map(|w| w.z_index).collect();
        z.sort_unstable();
        z.dedup();
        assert_eq!(z.len(), state.windows.len());
    }

    #[test]
    fn minimizing_focused_window_leaves_focus_absent_until_restore() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let a = open(&mut state, &files, "about");
        let b = open(&mut state, &files, "browser");

        reduce_desktop(&mut state, &files, DesktopAction::MinimizeWindow { window_id: b });
        assert_eq!(state.focused_window_id(), None);
        assert!(state.window(b).expect("b").minimized);

        reduce_desktop(&mut state, &files, DesktopAction::MinimizeWindow { window_id: a });
        assert_eq!(state.focused_window_id(), None);

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::RestoreWindow { window_id: b },
        );
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(b)]);
        assert_eq!(state.focused_window_id(), Some(b));
        assert!(!state.window(b).expect("b").minimized);
        assert_focus_is_topmost(&state);
    }

    #[test]
    fn minimizing_background_window_keeps_focus() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let a = open(&mut state, &files, "about");
        let b = open(&mut state, &files, "browser");

        reduce_desktop(&mut state, &files, DesktopAction::MinimizeWindow { window_id: a });

        assert_eq!(state.focused_window_id(), Some(b));
        assert_focus_is_topmost(&state);
    }

    #[test]
    fn closed_window_is_gone_and_later_actions_are_noops() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let a = open(&mut state, &files, "about");
        let b = open(&mut state, &files, "browser");

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::CloseWindow { window_id: b },
        );
        assert_eq!(effects, vec![RuntimeEffect::WindowClosed(b)]);
        assert!(state.window(b).is_none());
        assert_eq!(state.focused_window_id(), None);
        assert!(state.window(a).is_some());

        let snapshot = state.clone();
        for action in [
            DesktopAction::CloseWindow { window_id: b },
            DesktopAction::FocusWindow { window_id: b },
            DesktopAction::MinimizeWindow { window_id: b },
            DesktopAction::RestoreWindow { window_id: b },
            DesktopAction::ToggleTaskbarWindow { window_id: b },
            DesktopAction::MoveWindow {
                window_id: b,
                x: 1,
                y: 2,
            },
            DesktopAction::ResizeWindow {
                window_id: b,
                w: 3,
                h: 4,
            },
            DesktopAction::SetWindowTitle {
                window_id: b,
                title: "ghost".to_string(),
            },
        ] {
            assert!(reduce_desktop(&mut state, &files, action).is_empty());
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn taskbar_toggle_minimizes_if_focused_and_restores_if_minimized() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let win = open(&mut state, &files, "explorer");

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        );
        assert!(effects.is_empty());
        assert!(state.window(win).expect("win").minimized);
        assert_eq!(state.focused_window_id(), None);

        let effects = reduce_desktop(
            &mut state,
            &files,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        );
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(win)]);
        assert!(!state.window(win).expect("win").minimized);
        assert_eq!(state.focused_window_id(), Some(win));
    }

    #[test]
    fn move_resize_and_retitle_overwrite_window_fields() {
        let files = FileSystemStore::seeded();
        let mut state = DesktopState::default();
        let win = open(&mut state, &files, "browser");

        reduce_desktop(
            &mut state,
            &files,
            DesktopAction::MoveWindow {
                window_id: win,
                x: 12,
                y: 34,
            },
        );
        reduce_desktop(
            &mut state,
            &files,
            DesktopAction::ResizeWindow {
                window_id: win,
                w: 640,
                h: 480,
            },
        );
        reduce_desktop(
            &mut state,
            &files,
            DesktopAction::SetWindowTitle {
                window_id: win,
                title: "Docs".to_string(),
            },
        );

        let window = state.window(win).expect("win");
        assert_eq!((window.rect.x, window.rect.y), (12, 34));
        assert_eq!((window.rect.w, window.rect.h), (640, 480));
        assert_eq!(window.title, "Docs");
        assert_eq!(window.app_id.as_str(), "browser");
    }

    #[test]
    fn notepad_on_seeded_readme_is_titled_after_the_file() {
        let files = FileSystemStore::seeded();
        let registry = AppRegistry::builtin();
        let readme = files
            .find_child_by_name(files.root_id(), "README.txt")
            .expect("readme")
            .id;
        let request = registry
            .open_request_for_file(&files, readme)
            .expect("open request");
        let mut state = DesktopState::default();

        reduce_desktop(&mut state, &files, DesktopAction::OpenWindow(request));

        let window = state.windows.last().expect("window");
        assert_eq!(window.title, "README.txt - Notepad");
        assert_eq!(window.file_id, Some(readme));
    }

    #[test]
    fn explorer_created_file_opens_in_its_associated_app() {
        let mut files = FileSystemStore::seeded();
        let registry = AppRegistry::builtin();
        let documents = files
            .find_child_by_name(files.root_id(), "Documents")
            .expect("documents")
            .id;
        let notes = files
            .create_node(
                documents,
                "notes.txt",
                FsNodeKind::File,
                CreateNodeOptions::text("", "notepad"),
            )
            .expect("notes")
            .id;
        let request = registry
            .open_request_for_file(&files, notes)
            .expect("open request");
        let mut state = DesktopState::default();

        reduce_desktop(&mut state, &files, DesktopAction::OpenWindow(request));

        assert_eq!(
            state.windows.last().map(|w| w.title.as_str()),
            Some("notes.txt - Notepad")
        );
    }
}
