//! Desktop UI composition: app icons, the window layer, and the taskbar.
//!
//! Title-bar and corner drags are previewed on the frame and committed on pointer release as
//! [`DesktopAction::MoveWindow`] and [`DesktopAction::ResizeWindow`].

mod taskbar;
mod window;

use leptos::*;

use self::{taskbar::Taskbar, window::DesktopWindow};
use crate::{
    model::{PointerPosition, WindowId},
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

pub use crate::runtime_context::{DesktopProvider, DesktopRuntimeContext};

#[component]
/// Full desktop surface. Must be rendered inside [`DesktopProvider`].
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_ids = move || {
        runtime
            .state
            .with(|state| state.windows.iter().map(|w| w.id).collect::<Vec<_>>())
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            on:pointermove=move |ev: ev::PointerEvent| runtime.update_drag(pointer_position(&ev))
            on:pointerup=move |_| runtime.end_drag()
            on:pointercancel=move |_| runtime.end_drag()
        >
            <DesktopIcons />
            <div class="desktop-window-layer">
                <For each=window_ids key=|id| id.0 let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = runtime.registry.with_value(|registry| registry.apps().to_vec());

    view! {
        <ul class="desktop-icons" role="list">
            {apps
                .into_iter()
                .map(|app| {
                    let app_id = app.id.clone();
                    view! {
                        <li>
                            <button
                                type="button"
                                class="desktop-icon"
                                on:dblclick=move |_| {
                                    runtime.open_app(app_id.as_str());
                                }
                            >
                                <img src=app.icon alt="" width="48" height="48" />
                                <span>{app.name}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

fn focus_unless_focused(window_id: WindowId) -> impl Fn(ev::PointerEvent) + Copy {
    let runtime = use_desktop_runtime();
    move |_| {
        if !runtime.state.with_untracked(|state| state.is_focused(window_id)) {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    }
}

fn pointer_position(ev: &ev::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary button for mice, primary contact for touch and pens.
fn is_primary_press(ev: &ev::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}
