use desktop_app_contract::AppId;
use desktop_fs::NodeId;
use serde::{Deserialize, Serialize};

use crate::apps::AppDefinition;

pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
pub const FILE_WINDOW_WIDTH: i32 = 600;
pub const FILE_WINDOW_HEIGHT: i32 = 420;
pub const MIN_WINDOW_WIDTH: i32 = 250;
pub const MIN_WINDOW_HEIGHT: i32 = 150;
pub const MAX_WINDOW_WIDTH: i32 = 1200;
pub const MAX_WINDOW_HEIGHT: i32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Placement and stacking constants for the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// First z-index handed out; later windows and focus changes count up from here.
    pub initial_z_index: u32,
    /// Top-left corner of the first window in a cascade.
    pub cascade_origin: i32,
    /// Per-window shift along both axes.
    pub cascade_step: i32,
    /// Number of open windows after which the cascade starts over.
    pub cascade_wrap: usize,
    pub default_width: i32,
    pub default_height: i32,
    /// Size used when the window is bound to a file.
    pub file_window_width: i32,
    pub file_window_height: i32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            initial_z_index: 10,
            cascade_origin: 100,
            cascade_step: 20,
            cascade_wrap: 10,
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
            file_window_width: FILE_WINDOW_WIDTH,
            file_window_height: FILE_WINDOW_HEIGHT,
        }
    }
}

impl DesktopConfig {
    /// Rect for a new window given how many windows are already open.
    pub fn cascade_rect(&self, open_windows: usize, bound_to_file: bool) -> WindowRect {
        let slot = open_windows % self.cascade_wrap.max(1);
        let offset = i32::try_from(slot).unwrap_or(0) * self.cascade_step;
        let (w, h) = if bound_to_file {
            (self.file_window_width, self.file_window_height)
        } else {
            (self.default_width, self.default_height)
        };
        WindowRect {
            x: self.cascade_origin,
            y: self.cascade_origin,
            w,
            h,
        }
        .offset(offset, offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub file_id: Option<NodeId>,
}

/// Open windows plus the stacking and focus bookkeeping.
///
/// Mutate through [`crate::window_manager`] or [`crate::reduce_desktop`] so that z-indices stay
/// unique and `focused` stays in sync with the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub config: DesktopConfig,
    pub next_window_id: u64,
    pub next_z_index: u32,
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_config(DesktopConfig::default())
    }
}

impl DesktopState {
    pub fn with_config(config: DesktopConfig) -> Self {
        Self {
            config,
            next_window_id: 1,
            next_z_index: config.initial_z_index,
            windows: Vec::new(),
            focused: None,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// The focused window, if any. Cleared by closing or minimizing it; never auto-promoted.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused
    }

    /// Highest-stacked window that is not minimized.
    pub fn topmost_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn is_focused(&self, window_id: WindowId) -> bool {
        self.focused == Some(window_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Title-bar drag; commits as `MoveWindow`.
    Move,
    /// Corner-handle drag; commits as `ResizeWindow`.
    Resize,
}

/// A pointer drag on one window frame.
///
/// The frame previews [`WindowDrag::rect`] while the pointer moves; the window record only changes
/// when the drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDrag {
    pub window_id: WindowId,
    pub kind: DragKind,
    pub rect_start: WindowRect,
    pub pointer_start: PointerPosition,
    pub pointer: PointerPosition,
}

impl WindowDrag {
    pub fn new(
        window_id: WindowId,
        kind: DragKind,
        rect_start: WindowRect,
        pointer: PointerPosition,
    ) -> Self {
        Self {
            window_id,
            kind,
            rect_start,
            pointer_start: pointer,
            pointer,
        }
    }

    /// Rect the window would have if the drag ended at the current pointer.
    pub fn rect(&self) -> WindowRect {
        let dx = self.pointer.x - self.pointer_start.x;
        let dy = self.pointer.y - self.pointer_start.y;
        match self.kind {
            DragKind::Move => self.rect_start.offset(dx, dy),
            DragKind::Resize => WindowRect {
                w: (self.rect_start.w + dx).clamp(MIN_WINDOW_WIDTH, MAX_WINDOW_WIDTH),
                h: (self.rect_start.h + dy).clamp(MIN_WINDOW_HEIGHT, MAX_WINDOW_HEIGHT),
                ..self.rect_start
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindowRequest {
    pub app: AppDefinition,
    pub file_id: Option<NodeId>,
}

impl OpenWindowRequest {
    pub fn new(app: AppDefinition) -> Self {
        Self { app, file_id: None }
    }

    pub fn with_file(app: AppDefinition, file_id: NodeId) -> Self {
        Self {
            app,
            file_id: Some(file_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fresh_state_starts_counters_from_config() {
        let state = DesktopState::with_config(DesktopConfig {
            initial_z_index: 50,
            ..DesktopConfig::default()
        });

        assert_eq!(state.next_window_id, 1);
        assert_eq!(state.next_z_index, 50);
        assert_eq!(state.focused_window_id(), None);
        assert_eq!(state.topmost_window_id(), None);
    }

    #[test]
    fn cascade_rect_uses_document_size_for_bound_files() {
        let config = DesktopConfig::default();

        assert_eq!(
            config.cascade_rect(2, true),
            WindowRect {
                x: 140,
                y: 140,
                w: 600,
                h: 420
            }
        );
        assert_eq!(config.cascade_rect(12, false).x, 140);
    }

    #[test]
    fn drags_preview_moves_and_clamped_resizes() {
        let start = DesktopConfig::default().cascade_rect(0, false);
        let pointer = PointerPosition { x: 150, y: 110 };
        let mut drag = WindowDrag::new(WindowId(1), DragKind::Move, start, pointer);
        assert_eq!(drag.rect(), start);

        drag.pointer = PointerPosition { x: 180, y: 90 };
        assert_eq!(
            drag.rect(),
            WindowRect {
                x: 130,
                y: 80,
                w: 400,
                h: 300
            }
        );

        let mut resize = WindowDrag::new(WindowId(1), DragKind::Resize, start, pointer);
        resize.pointer = PointerPosition { x: -500, y: 2000 };
        assert_eq!(
            resize.rect(),
            WindowRect {
                x: 100,
                y: 100,
                w: MIN_WINDOW_WIDTH,
                h: MAX_WINDOW_HEIGHT
            }
        );
    }

    #[test]
    fn window_record_serializes_with_plain_ids() {
        let record = WindowRecord {
            id: WindowId(3),
            app_id: AppId::trusted("notepad"),
            title: "Notepad".to_string(),
            icon: "/icons/notepad.png".to_string(),
            rect: DesktopConfig::default().cascade_rect(0, false),
            z_index: 10,
            minimized: false,
            file_id: Some(NodeId(4)),
        };

        let value = serde_json::to_value(&record).expect("serialize");

        assert_eq!(value["id"], 3);
        assert_eq!(value["app_id"], "notepad");
        assert_eq!(value["file_id"], 4);
        assert_eq!(value["rect"]["w"], 400);
    }
}
