//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and the task
//! scheduler whose timers live exactly as long as the provider. UI composition stays in
//! [`crate::components`].

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;

use crate::{
    config::{shell_config, ShellConfig},
    effect_executor,
    model::{DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    scheduler::TaskScheduler,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Pending delayed tasks, cancelled when the provider is torn down.
    pub scheduler: StoredValue<TaskScheduler<TimeoutHandle>>,
    /// Embedded shell configuration.
    pub config: &'static ShellConfig,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots the desktop.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let config = shell_config();
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let scheduler = store_value(TaskScheduler::<TimeoutHandle>::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        state,
        interaction,
        effects,
        scheduler,
        config,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    on_cleanup(move || {
        let cancelled = scheduler
            .try_update_value(|pending| pending.cancel_all())
            .unwrap_or(0);
        if cancelled > 0 {
            logging::log!("desktop teardown cancelled {cancelled} pending task(s)");
        }
    });

    runtime.dispatch_action(DesktopAction::BootComplete {
        layout: config.shortcuts,
    });

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
