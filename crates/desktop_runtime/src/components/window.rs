use super::*;
use crate::apps;
use desktop_app_contract::{AppMountContext, WindowCallbacks};

/// Lifecycle callbacks bound to `key`, overriding anything the app could wire itself.
fn window_callbacks(runtime: DesktopRuntimeContext, key: AppKey) -> WindowCallbacks {
    let interact_key = key.clone();
    let minimize_key = key.clone();
    WindowCallbacks {
        on_interact: Callback::new(move |_| {
            runtime.dispatch_action(DesktopAction::BringToFront {
                key: interact_key.clone(),
            })
        }),
        on_minimize: Callback::new(move |_| {
            runtime.dispatch_action(DesktopAction::MinimizeWindow {
                key: minimize_key.clone(),
            })
        }),
        on_close: Callback::new(move |_| {
            runtime.dispatch_action(DesktopAction::CloseWindow { key: key.clone() })
        }),
    }
}

#[component]
pub(super) fn DesktopWindow(app_key: AppKey) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = {
        let key = app_key.clone();
        Signal::derive(move || runtime.state.get().window(&key).cloned())
    };
    let is_focused = {
        let key = app_key.clone();
        Signal::derive(move || {
            let desktop = runtime.state.get();
            desktop.top_window_key() == Some(&key)
                && desktop.window(&key).is_some_and(|w| !w.minimized)
        })
    };

    let contents = runtime
        .state
        .get_untracked()
        .window(&app_key)
        .cloned()
        .and_then(|record| {
            let module = apps::app_module(&record.key)?;
            Some(module.mount(AppMountContext {
                callbacks: window_callbacks(runtime, record.key.clone()),
                key: record.key,
                title: record.name,
                icon_id: record.icon_id,
                is_focused,
            }))
        })
        .unwrap_or_else(|| {
            logging::warn!("no app module registered for `{app_key}`");
            view! { <p>"Application unavailable"</p> }.into_view()
        });

    view! {
        <div
            class=move || {
                let (minimized, closing) = window
                    .get()
                    .map(|w| (w.minimized, w.closing))
                    .unwrap_or((false, true));
                format!(
                    "desktop-window-host{}{}",
                    if minimized { " minimized" } else { "" },
                    if closing { " closing" } else { "" }
                )
            }
            style=move || {
                window
                    .get()
                    .map(|w| window_container_style(w.z_index, w.minimized))
                    .unwrap_or_default()
            }
            on:pointerdown=move |ev| stop_pointer_event(&ev)
        >
            {contents}
        </div>
    }
}
