//! Window-manager transitions over [`DesktopState`].
//!
//! Every function treats an unknown window id as a no-op and returns `true` only when it changed
//! state. [`crate::reduce_desktop`] routes [`crate::DesktopAction`] values here.

use desktop_app_contract::AppId;
use desktop_fs::{FileSystemStore, NodeId};
use leptos::logging;

use crate::{
    apps::AppDefinition,
    model::{DesktopState, WindowId, WindowRecord},
};

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id += 1;
    id
}

fn next_z_index(state: &mut DesktopState) -> u32 {
    let z = state.next_z_index;
    state.next_z_index += 1;
    z
}

fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

/// Resolves `file_id` to a bound file name, dropping bindings that do not point at a file.
fn resolve_bound_file(
    files: &FileSystemStore,
    app_id: &AppId,
    file_id: Option<NodeId>,
) -> Option<(NodeId, String)> {
    let file_id = file_id?;
    match files.get_node(file_id) {
        Some(node) if node.is_file() => Some((file_id, node.name.clone())),
        Some(node) => {
            logging::warn!(
                "not binding {app_id} window to folder \"{}\" ({file_id})",
                node.name
            );
            None
        }
        None => {
            logging::warn!("not binding {app_id} window to missing file {file_id}");
            None
        }
    }
}

/// Opens a new focused window hosting `app`, optionally bound to `file_id`.
///
/// The window is cascaded from the configured origin based on how many windows are already open.
/// A binding that resolves to a file sizes the window for documents and titles it
/// `"<file name> - <app name>"`; anything else is dropped and the title is the app name.
pub fn open_window(
    state: &mut DesktopState,
    files: &FileSystemStore,
    app: &AppDefinition,
    file_id: Option<NodeId>,
) -> WindowId {
    let bound = resolve_bound_file(files, &app.id, file_id);
    let rect = state
        .config
        .cascade_rect(state.windows.len(), bound.is_some());
    let title = match &bound {
        Some((_, file_name)) => format!("{file_name} - {}", app.name),
        None => app.name.to_string(),
    };

    let id = next_window_id(state);
    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        id,
        app_id: app.id.clone(),
        title,
        icon: app.icon.to_string(),
        rect,
        z_index,
        minimized: false,
        file_id: bound.map(|(file_id, _)| file_id),
    });
    state.focused = Some(id);
    logging::log!("opened window {} for {}", id.0, app.id);
    id
}

/// Removes `window_id`. Focus is cleared, not handed to another window.
pub fn close_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != window_id);
    if state.windows.len() == before {
        return false;
    }
    if state.focused == Some(window_id) {
        state.focused = None;
    }
    true
}

/// Raises `window_id` above every other window, un-minimizes it, and focuses it.
///
/// Focusing the already focused window changes nothing.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.focused == Some(window_id) || state.window(window_id).is_none() {
        return false;
    }
    let z_index = next_z_index(state);
    if let Some(window) = find_window_mut(state, window_id) {
        window.z_index = z_index;
        window.minimized = false;
    }
    state.focused = Some(window_id);
    true
}

/// Minimizes `window_id`, clearing focus when it held it.
pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.minimized = true;
    if state.focused == Some(window_id) {
        state.focused = None;
    }
    true
}

/// Restoring a window is focusing it.
pub fn restore_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    focus_window(state, window_id)
}

pub fn update_window_position(
    state: &mut DesktopState,
    window_id: WindowId,
    x: i32,
    y: i32,
) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.rect.x = x;
    window.rect.y = y;
    true
}

pub fn update_window_size(state: &mut DesktopState, window_id: WindowId, w: i32, h: i32) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.rect.w = w;
    window.rect.h = h;
    true
}

pub fn update_window_title(
    state: &mut DesktopState,
    window_id: WindowId,
    title: impl Into<String>,
) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.title = title.into();
    true
}

/// Taskbar button behavior: restore when minimized, minimize when focused, focus otherwise.
pub fn toggle_taskbar_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.window(window_id) else {
        return false;
    };
    if window.minimized {
        restore_window(state, window_id)
    } else if state.is_focused(window_id) {
        minimize_window(state, window_id)
    } else {
        focus_window(state, window_id)
    }
}
