//! Desktop window manager runtime: window state, reducer, app registry, and Leptos wiring.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use apps::{AppDefinition, AppRegistry, LaunchError};
pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime_context::{mount_window_app, use_desktop_runtime};
