use std::time::Duration;

use super::*;
use crate::apps::{self, icon_asset_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    #[cfg(target_arch = "wasm32")]
    fn now() -> Self {
        let date = js_sys::Date::new_0();
        Self {
            hour: date.get_hours(),
            minute: date.get_minutes(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now() -> Self {
        Self { hour: 0, minute: 0 }
    }
}

fn format_taskbar_clock_time(snapshot: TaskbarClockSnapshot) -> String {
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, snapshot.minute, suffix)
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.stop_propagation();
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let start_menu_open = create_rw_signal(false);
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if start_menu_open.get_untracked() {
            start_menu_open.set(false);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Desktop taskbar"
            style=format!(
                "position:absolute;left:0;right:0;bottom:0;height:{TASKBAR_HEIGHT_PX}px;z-index:2147483647;"
            )
            on:pointerdown=move |ev| stop_pointer_event(&ev)
            on:mousedown=move |ev| stop_mouse_event(&ev)
        >
            <div class="taskbar-left">
                <button
                    class="start-button"
                    aria-haspopup="menu"
                    aria-expanded=move || start_menu_open.get().to_string()
                    on:click=move |_| start_menu_open.update(|open| *open = !*open)
                >
                    <img class="taskbar-glyph" src=icon_asset_url("windowsStart") alt="" />
                    <span>"Start"</span>
                </button>
                <Show when=move || start_menu_open.get() fallback=|| ()>
                    <div class="start-menu" role="menu">
                        {apps::app_registry()
                            .iter()
                            .map(|entry| {
                                let key = entry.key.clone();
                                view! {
                                    <button
                                        class="start-menu-item"
                                        role="menuitem"
                                        on:click=move |_| {
                                            start_menu_open.set(false);
                                            runtime.dispatch_action(DesktopAction::OpenApplication {
                                                key: key.clone(),
                                            });
                                        }
                                    >
                                        <img src=icon_asset_url(&entry.icon_id) alt="" />
                                        <span>{entry.display_name.clone()}</span>
                                    </button>
                                }
                            })
                            .collect_view()}
                        <hr />
                        <button
                            class="start-menu-item"
                            role="menuitem"
                            on:click=move |_| {
                                start_menu_open.set(false);
                                runtime.dispatch_action(DesktopAction::StartShutdown);
                            }
                        >
                            <img src=icon_asset_url("computerBig") alt="" />
                            <span>"Shut Down..."</span>
                        </button>
                    </div>
                </Show>
            </div>

            <div class="taskbar-running-strip" role="group" aria-label="Running windows">
                <For each=move || state.get().windows key=|win| win.key.clone() let:win>
                    <TaskbarWindowButton app_key=win.key />
                </For>
            </div>

            <div class="taskbar-clock">
                {move || format_taskbar_clock_time(clock_now.get())}
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(app_key: AppKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window = {
        let key = app_key.clone();
        Signal::derive(move || {
            let desktop = runtime.state.get();
            let active = desktop.top_window_key() == Some(&key);
            desktop.window(&key).cloned().map(|w| (w, active))
        })
    };

    move || {
        window.get().map(|(win, active)| {
            let toggle_key = win.key.clone();
            let focused = active && !win.minimized;
            view! {
                <button
                    class=if focused {
                        "taskbar-window-button active"
                    } else {
                        "taskbar-window-button"
                    }
                    aria-pressed=focused.to_string()
                    on:click=move |_| {
                        runtime.dispatch_action(DesktopAction::ToggleMinimize {
                            key: toggle_key.clone(),
                        })
                    }
                >
                    <img class="taskbar-app-icon" src=icon_asset_url(&win.icon_id) alt="" />
                    <span>{win.name}</span>
                </button>
            }
        })
    }
}
