use super::*;
use crate::{
    model::{DragKind, WindowId},
    runtime_context::mount_window_app,
};

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window =
        Signal::derive(move || runtime.state.with(|state| state.window(window_id).cloned()));
    let focused = Signal::derive(move || runtime.state.with(|state| state.is_focused(window_id)));
    let preview = Signal::derive(move || {
        runtime
            .drag
            .with(|drag| drag.filter(|drag| drag.window_id == window_id).map(|drag| drag.rect()))
    });
    let focus = focus_unless_focused(window_id);
    let minimize = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
    };
    let close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
    };

    let begin_move = move |ev: ev::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        runtime.begin_drag(window_id, DragKind::Move, pointer_position(&ev));
    };

    let style = move || {
        window
            .get()
            .map(|win| {
                let rect = preview.get().unwrap_or(win.rect);
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    rect.x, rect.y, rect.w, rect.h, win.z_index
                )
            })
            .unwrap_or_default()
    };
    let class_name = move || {
        let minimized = window.get().map(|w| w.minimized).unwrap_or(false);
        format!(
            "desktop-window{}{}",
            if focused.get() { " focused" } else { "" },
            if minimized { " minimized" } else { "" }
        )
    };
    let title = move || window.get().map(|w| w.title).unwrap_or_default();
    let icon = move || window.get().map(|w| w.icon).unwrap_or_default();

    view! {
        <section
            class=class_name
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title
        >
            <header class="titlebar" on:pointerdown=begin_move>
                <div class="titlebar-title">
                    <img class="titlebar-app-icon" src=icon alt="" width="16" height="16" />
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=|ev: ev::PointerEvent| ev.stop_propagation()
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label="Close window"
                        on:pointerdown=|ev: ev::PointerEvent| ev.stop_propagation()
                        on:click=close
                    >
                        "X"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
            </div>
            <WindowResizeHandle window_id=window_id />
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let begin_resize = move |ev: ev::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        runtime.begin_drag(window_id, DragKind::Resize, pointer_position(&ev));
    };

    view! {
        <div class="window-resize-handle edge-se" aria-hidden="true" on:pointerdown=begin_resize />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    // Mounted once; the app keeps its own state across restyles of the frame.
    let contents = mount_window_app(runtime, window_id);

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
