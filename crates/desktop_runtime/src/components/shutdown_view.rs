use std::time::Duration;

use leptos::leptos_dom::helpers::IntervalHandle;

use super::*;
use crate::shutdown::shutdown_script;

/// Number of script lines visible after `ticks` reveal intervals.
fn visible_line_count(ticks: usize, total: usize) -> usize {
    ticks.saturating_add(1).min(total)
}

fn reveal_finished(ticks: usize, total: usize) -> bool {
    visible_line_count(ticks, total) >= total
}

#[component]
pub(super) fn ShutdownSequence(
    shutdown_count: u32,
    line_interval: Duration,
    on_reboot: Callback<()>,
) -> impl IntoView {
    let script = shutdown_script(shutdown_count);
    let ticks = create_rw_signal(0usize);
    let revealed = create_memo(move |_| visible_line_count(ticks.get(), script.len()));

    let interval = store_value(None::<IntervalHandle>);
    let stop_interval = move || {
        if let Some(handle) = interval.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    };

    if !reveal_finished(0, script.len()) {
        match set_interval_with_handle(
            move || {
                ticks.update(|t| *t += 1);
                if reveal_finished(ticks.get_untracked(), script.len()) {
                    stop_interval();
                }
            },
            line_interval,
        ) {
            Ok(handle) => interval.set_value(Some(handle)),
            Err(err) => {
                logging::warn!("shutdown line timer setup failed: {err:?}");
                ticks.set(script.len());
            }
        }
    }
    on_cleanup(stop_interval);

    view! {
        <div
            class="shutdown-sequence"
            role="status"
            aria-live="polite"
            style="position:absolute;inset:0;background-color:#1d2e2f;color:#ffffff;\
                   display:flex;flex-direction:column;padding:48px;font-family:monospace;"
        >
            {move || {
                script[..revealed.get()]
                    .iter()
                    .map(|line| view! { <p class="shutdown-line">{*line}</p> })
                    .collect_view()
            }}
            <Show when=move || revealed.get() == script.len() fallback=|| ()>
                <button class="shutdown-restart" on:click=move |_| on_reboot.call(())>
                    "Restart"
                </button>
            </Show>
        </div>
    }
}
