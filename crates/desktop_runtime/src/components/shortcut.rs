use super::*;
use crate::apps::icon_asset_url;

#[component]
pub(super) fn DesktopShortcut(app_key: AppKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let shortcut = {
        let key = app_key.clone();
        Signal::derive(move || {
            runtime
                .state
                .get()
                .shortcuts
                .into_iter()
                .find(|s| s.key == key)
        })
    };

    move || {
        shortcut.get().map(|shortcut| {
            let open_key = shortcut.key.clone();
            let bounds = shortcut.bounds();
            view! {
                <div
                    class=if shortcut.selected {
                        "desktop-shortcut selected"
                    } else {
                        "desktop-shortcut"
                    }
                    style=format!(
                        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;",
                        bounds.x, bounds.y, bounds.width, bounds.height
                    )
                    title=shortcut.name.clone()
                    on:dblclick=move |_| {
                        runtime.dispatch_action(DesktopAction::OpenApplication {
                            key: open_key.clone(),
                        })
                    }
                >
                    <img
                        class="desktop-shortcut-icon"
                        src=icon_asset_url(&shortcut.icon_id)
                        alt=""
                        draggable="false"
                    />
                    <span class="desktop-shortcut-label">{shortcut.name}</span>
                </div>
            }
        })
    }
}
