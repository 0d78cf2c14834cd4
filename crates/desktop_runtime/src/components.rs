//! Desktop shell UI composition and interaction surfaces.

mod shortcut;
mod shutdown_view;
mod taskbar;
mod window;

use desktop_app_contract::AppKey;
use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use self::{
    shortcut::DesktopShortcut, shutdown_view::ShutdownSequence, taskbar::Taskbar,
    window::DesktopWindow,
};
use crate::{
    model::{PointerPosition, SelectionRect},
    reducer::DesktopAction,
    runtime_context::{use_desktop_runtime, DesktopRuntimeContext},
};

const TASKBAR_HEIGHT_PX: i32 = 32;
const DRAG_CAPTURE_THRESHOLD_PX: u32 = 3;

#[component]
/// Renders either the desktop or, while shut down, the shutdown sequence.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let shutting_down = create_memo(move |_| state.get().is_shutting_down());

    view! {
        <Show
            when=move || !shutting_down.get()
            fallback=move || {
                let shutdown_count = state.get_untracked().shutdown.shutdown_count;
                view! {
                    <ShutdownSequence
                        shutdown_count=shutdown_count
                        line_interval=runtime.config.shutdown_line_interval()
                        on_reboot=Callback::new(move |_| {
                            runtime.dispatch_action(DesktopAction::Reboot)
                        })
                    />
                }
            }
        >
            <DesktopSurface />
        </Show>
    }
}

#[component]
fn DesktopSurface() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let selection = create_memo(move |_| runtime.interaction.get().selection);

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && selection_active(runtime) {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::CancelSelection);
        }
    });
    on_cleanup(move || escape_listener.remove());

    // Capture starts with the first real drag so clicks on shortcuts keep their target.
    let pointer_captured = store_value(false);

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 || !ev.is_primary() {
            return;
        }
        pointer_captured.set_value(false);
        runtime.dispatch_action(DesktopAction::BeginSelection {
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let on_pointermove = move |ev: web_sys::PointerEvent| {
        let current = runtime.interaction.get_untracked().selection;
        if !current.active {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        if should_capture_pointer(current, pointer, pointer_captured.get_value()) {
            try_set_pointer_capture(&ev);
            pointer_captured.set_value(true);
        }
        runtime.dispatch_action(DesktopAction::UpdateSelection { pointer });
    };
    let on_pointerup = move |_| {
        pointer_captured.set_value(false);
        if selection_active(runtime) {
            runtime.dispatch_action(DesktopAction::EndSelection);
        }
    };
    let on_pointercancel = move |_| {
        pointer_captured.set_value(false);
        if selection_active(runtime) {
            runtime.dispatch_action(DesktopAction::CancelSelection);
        }
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            style="position:relative;min-height:100%;flex:1;user-select:none;"
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:pointercancel=on_pointercancel
        >
            <div class="desktop-window-layer">
                <For each=move || state.get().windows key=|win| win.key.clone() let:win>
                    <DesktopWindow app_key=win.key />
                </For>
            </div>
            <div class="desktop-shortcuts" style="position:absolute;top:0;left:0;">
                <For
                    each=move || state.get().shortcuts
                    key=|shortcut| shortcut.key.clone()
                    let:shortcut
                >
                    <DesktopShortcut app_key=shortcut.key />
                </For>
            </div>
            <Show when=move || selection.get().active fallback=|| ()>
                <div
                    class="desktop-selection-rect"
                    style=move || selection_rect_style(selection.get())
                />
            </Show>
            <Taskbar />
        </div>
    }
}

fn selection_active(runtime: DesktopRuntimeContext) -> bool {
    runtime.interaction.get_untracked().selection.active
}

/// Capture once an active drag moves past the jitter threshold. Presses and double-clicks stay
/// uncaptured so they reach the element under the pointer.
fn should_capture_pointer(
    selection: SelectionRect,
    pointer: PointerPosition,
    already_captured: bool,
) -> bool {
    let dx = pointer.x.abs_diff(selection.origin.x);
    let dy = pointer.y.abs_diff(selection.origin.y);
    selection.active
        && !already_captured
        && (dx > DRAG_CAPTURE_THRESHOLD_PX || dy > DRAG_CAPTURE_THRESHOLD_PX)
}

fn selection_rect_style(selection: SelectionRect) -> String {
    let bounds = selection.bounds;
    format!(
        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
         background-color:rgba(0, 0, 255, 0.3);border:2px solid blue;pointer-events:none;",
        bounds.x, bounds.y, bounds.width, bounds.height
    )
}

/// Stacking and visibility for a window container. Minimized windows stay mounted.
fn window_container_style(z_index: u32, minimized: bool) -> String {
    if minimized {
        format!("position:absolute;z-index:{z_index};opacity:0;pointer-events:none;")
    } else {
        format!("position:absolute;z-index:{z_index};")
    }
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn stop_pointer_event(ev: &web_sys::PointerEvent) {
    ev.stop_propagation();
}
