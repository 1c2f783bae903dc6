//! Runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Nested dispatches while draining enqueue a fresh batch.
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }
        for effect in runtime.take_effects() {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::WindowOpened(window_id) => {
            let title = runtime
                .state
                .with_untracked(|state| state.window(window_id).map(|w| w.title.clone()));
            logging::log!("window {} opened: {}", window_id.0, title.unwrap_or_default());
        }
        RuntimeEffect::FocusWindowInput(window_id) => {
            logging::log!("window {} focused", window_id.0);
        }
        RuntimeEffect::WindowClosed(window_id) => {
            logging::log!("window {} closed", window_id.0);
        }
    }
}
