//! Built-in apps without file-system integration: About, the browser viewport, and static
//! placeholders for Calculator and Tic Tac Toe.

use desktop_app_contract::AppMountContext;
use leptos::*;

/// Page loaded by a fresh browser window.
pub const DEFAULT_BROWSER_URL: &str = "https://example.com";

const BROWSER_IFRAME_SANDBOX: &str = "allow-scripts allow-same-origin allow-forms allow-popups";

/// Trims `raw` and prefixes `https://` unless it already names an http(s) scheme.
pub fn normalize_browser_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

pub(super) fn mount_about_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-about-shell">
            <h2>"Browser OS v0.1"</h2>
            <p>"A Mock Operating System in the Browser."</p>
            <p>"Fancy stuff, yes."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_calculator_placeholder_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-calculator-shell">
            <p><strong>"Calculator (Placeholder)"</strong></p>
            <input type="text" class="app-display" readonly=true value="0" aria-label="Display" />
            <div class="app-keypad" role="group" aria-label="Calculator keys">
                {["7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+"]
                    .into_iter()
                    .map(|key| {
                        view! { <button type="button" class="app-key" disabled=true>{key}</button> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

pub(super) fn mount_tictactoe_placeholder_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-tictactoe-shell">
            <p><strong>"Tic Tac Toe (Placeholder)"</strong></p>
            <div class="app-board" role="grid" aria-label="Board">
                {(0..9)
                    .map(|_| {
                        view! { <button type="button" class="app-square" disabled=true></button> }
                    })
                    .collect_view()}
            </div>
            <div class="app-statusbar">
                <span>"Next player: X"</span>
            </div>
        </div>
    }
    .into_view()
}

pub(super) fn mount_browser_app(_: AppMountContext) -> View {
    view! { <BrowserApp /> }.into_view()
}

#[component]
fn BrowserApp() -> impl IntoView {
    let current_url = create_rw_signal(DEFAULT_BROWSER_URL.to_string());
    let address = create_rw_signal(DEFAULT_BROWSER_URL.to_string());

    let navigate = move || {
        let url = normalize_browser_url(&address.get_untracked());
        address.set(url.clone());
        current_url.set(url);
    };

    view! {
        <div class="app-shell app-browser-shell">
            <form
                class="app-toolbar"
                on:submit=move |ev| {
                    ev.prevent_default();
                    navigate();
                }
            >
                <input
                    type="text"
                    aria-label="Address Bar"
                    placeholder="Enter URL (e.g., example.com)"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                />
                <button type="submit" class="app-action">"Go"</button>
            </form>
            <iframe
                class="app-browser-viewport"
                title="Browser Content"
                src=move || current_url.get()
                sandbox=BROWSER_IFRAME_SANDBOX
            ></iframe>
            <div class="app-statusbar">
                <span>{move || format!("Loading: {}", current_url.get())}</span>
                <span>"Many sites block embedding"</span>
            </div>
        </div>
    }
}
