use super::*;
use crate::model::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskbarButton {
    window_id: WindowId,
    title: String,
    icon: String,
    focused: bool,
    minimized: bool,
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let buttons = move || {
        runtime.state.with(|state| {
            state
                .windows
                .iter()
                .map(|w| TaskbarButton {
                    window_id: w.id,
                    title: w.title.clone(),
                    icon: w.icon.clone(),
                    focused: state.is_focused(w.id),
                    minimized: w.minimized,
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <nav class="taskbar" aria-label="Open windows">
            <For each=buttons key=|button| button.clone() let:button>
                <button
                    type="button"
                    class=format!(
                        "taskbar-window{}{}",
                        if button.focused { " focused" } else { "" },
                        if button.minimized { " minimized" } else { "" }
                    )
                    aria-pressed=button.focused.to_string()
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                            window_id: button.window_id,
                        });
                    }
                >
                    <img src=button.icon.clone() alt="" width="16" height="16" />
                    <span>{button.title.clone()}</span>
                </button>
            </For>
        </nav>
    }
}
