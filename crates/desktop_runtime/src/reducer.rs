//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::AppKey;
use thiserror::Error;

use crate::{
    apps,
    config::ShortcutLayout,
    model::{DesktopState, InteractionState, PointerPosition, SelectionRect, SessionPhase},
    scheduler::ScheduledTask,
    selection, window_manager,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Finish booting: lay out shortcuts and open the boot apps.
    BootComplete {
        /// Shortcut column layout.
        layout: ShortcutLayout,
    },
    /// Open (or re-focus) the window for a registered app.
    OpenApplication {
        /// Registry key of the app.
        key: AppKey,
    },
    /// Start the delayed close of a window.
    CloseWindow {
        /// Window to close.
        key: AppKey,
    },
    /// Drop a window from the collection. Fired by the close timer.
    RemoveWindow {
        /// Window to remove.
        key: AppKey,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        key: AppKey,
    },
    /// Taskbar focus/minimize toggle.
    ToggleMinimize {
        /// Window associated with the taskbar entry.
        key: AppKey,
    },
    /// Raise a window after the user interacted with it.
    BringToFront {
        /// Window to raise.
        key: AppKey,
    },
    /// Request the delayed shutdown.
    StartShutdown,
    /// Swap the desktop for the shutdown view. Fired by the shutdown timer.
    EnterShutdown,
    /// Leave the shutdown view with an empty desktop.
    Reboot,
    /// Start a rubber-band drag.
    BeginSelection {
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Stretch the active rubber band.
    UpdateSelection {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Apply the rubber band to the shortcuts.
    EndSelection,
    /// Abandon the rubber band.
    CancelSelection,
}

impl DesktopAction {
    /// Stable name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BootComplete { .. } => "boot-complete",
            Self::OpenApplication { .. } => "open-application",
            Self::CloseWindow { .. } => "close-window",
            Self::RemoveWindow { .. } => "remove-window",
            Self::MinimizeWindow { .. } => "minimize-window",
            Self::ToggleMinimize { .. } => "toggle-minimize",
            Self::BringToFront { .. } => "bring-to-front",
            Self::StartShutdown => "start-shutdown",
            Self::EnterShutdown => "enter-shutdown",
            Self::Reboot => "reboot",
            Self::BeginSelection { .. } => "begin-selection",
            Self::UpdateSelection { .. } => "update-selection",
            Self::EndSelection => "end-selection",
            Self::CancelSelection => "cancel-selection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Arm a timer for the task unless one is already pending.
    Schedule(ScheduledTask),
    /// Disarm a pending task.
    Cancel(ScheduledTask),
    /// The session phase changed.
    PhaseChanged(SessionPhase),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current session.
pub enum ReducerError {
    /// The key is not in the application registry.
    #[error("application `{0}` is not registered")]
    UnknownApplication(AppKey),
    /// The action is not accepted in the current session phase.
    #[error("`{action}` is not allowed while {phase:?}")]
    InvalidPhase {
        /// Rejected action name.
        action: &'static str,
        /// Phase at the time of the action.
        phase: SessionPhase,
    },
    /// A shutdown was already requested and is waiting on its timer.
    #[error("shutdown already requested")]
    ShutdownPending,
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Window actions naming a key that is not open are no-ops; timers and stale callbacks may
/// reference windows that are already gone.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action cannot apply in the current phase or names an
/// unregistered app. State is left unchanged in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    let action_name = action.name();
    match action {
        DesktopAction::BootComplete { layout } => {
            require_phase(state, SessionPhase::Booting, action_name)?;
            state.shortcuts = apps::build_shortcuts(apps::app_registry(), layout);
            state.phase = SessionPhase::Desktop;
            effects.push(RuntimeEffect::PhaseChanged(SessionPhase::Desktop));
            for key in apps::boot_app_keys() {
                open_application(state, key, &mut effects)?;
            }
        }
        DesktopAction::OpenApplication { key } => {
            require_phase(state, SessionPhase::Desktop, action_name)?;
            open_application(state, key, &mut effects)?;
        }
        DesktopAction::CloseWindow { key } => {
            if let Some(window) = window_manager::find_window_mut(state, &key) {
                if !window.closing {
                    window.closing = true;
                    effects.push(RuntimeEffect::Schedule(ScheduledTask::RemoveWindow { key }));
                }
            }
        }
        DesktopAction::RemoveWindow { key } => {
            window_manager::remove_window(state, &key);
        }
        DesktopAction::MinimizeWindow { key } => {
            window_manager::minimize(state, &key);
        }
        DesktopAction::ToggleMinimize { key } => {
            window_manager::toggle_minimize(state, &key);
        }
        DesktopAction::BringToFront { key } => {
            window_manager::bring_to_front(state, &key);
        }
        DesktopAction::StartShutdown => {
            require_phase(state, SessionPhase::Desktop, action_name)?;
            if state.shutdown.requested {
                return Err(ReducerError::ShutdownPending);
            }
            state.shutdown.requested = true;
            effects.push(RuntimeEffect::Schedule(ScheduledTask::EnterShutdown));
        }
        DesktopAction::EnterShutdown => {
            if state.phase == SessionPhase::Desktop && state.shutdown.requested {
                state.shutdown.requested = false;
                state.shutdown.shutdown_count = state.shutdown.shutdown_count.saturating_add(1);
                state.phase = SessionPhase::ShuttingDown;
                clear_windows(state, &mut effects);
                *interaction = InteractionState::default();
                effects.push(RuntimeEffect::PhaseChanged(SessionPhase::ShuttingDown));
            }
        }
        DesktopAction::Reboot => {
            require_phase(state, SessionPhase::ShuttingDown, action_name)?;
            clear_windows(state, &mut effects);
            for shortcut in &mut state.shortcuts {
                shortcut.selected = false;
            }
            interaction.selection = SelectionRect::default();
            state.phase = SessionPhase::Desktop;
            effects.push(RuntimeEffect::PhaseChanged(SessionPhase::Desktop));
        }
        DesktopAction::BeginSelection { pointer } => {
            if state.phase == SessionPhase::Desktop {
                selection::begin_selection(
                    &mut interaction.selection,
                    &mut state.shortcuts,
                    pointer,
                );
            }
        }
        DesktopAction::UpdateSelection { pointer } => {
            selection::update_selection(&mut interaction.selection, pointer);
        }
        DesktopAction::EndSelection => {
            selection::end_selection(&mut interaction.selection, &mut state.shortcuts);
        }
        DesktopAction::CancelSelection => {
            selection::cancel_selection(&mut interaction.selection);
        }
    }

    Ok(effects)
}

/// Opens `key`, or restores and raises its window when one already exists.
///
/// Re-opening a closing window cancels its pending removal.
fn open_application(
    state: &mut DesktopState,
    key: AppKey,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let descriptor =
        apps::app_descriptor(&key).ok_or_else(|| ReducerError::UnknownApplication(key.clone()))?;

    if window_manager::bring_to_front(state, &key) {
        if let Some(window) = window_manager::find_window_mut(state, &key) {
            window.minimized = false;
            if window.closing {
                window.closing = false;
                effects.push(RuntimeEffect::Cancel(ScheduledTask::RemoveWindow { key }));
            }
        }
        return Ok(());
    }

    window_manager::push_window(
        state,
        key,
        descriptor.display_name.clone(),
        descriptor.icon_id.clone(),
    );
    Ok(())
}

fn clear_windows(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    for window in state.windows.drain(..) {
        if window.closing {
            effects.push(RuntimeEffect::Cancel(ScheduledTask::RemoveWindow {
                key: window.key,
            }));
        }
    }
}

fn require_phase(
    state: &DesktopState,
    expected: SessionPhase,
    action: &'static str,
) -> Result<(), ReducerError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(ReducerError::InvalidPhase {
            action,
            phase: state.phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ShortcutRecord;

    fn showcase() -> AppKey {
        AppKey::trusted("showcase")
    }

    fn booted() -> (DesktopState, InteractionState) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BootComplete {
                layout: ShortcutLayout::default(),
            },
        )
        .expect("boot");
        (state, interaction)
    }

    fn empty_desktop() -> (DesktopState, InteractionState) {
        let (mut state, interaction) = booted();
        state.windows.clear();
        (state, interaction)
    }

    fn apply(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("reduce")
    }

    fn shut_down(state: &mut DesktopState, interaction: &mut InteractionState) {
        apply(state, interaction, DesktopAction::StartShutdown);
        apply(state, interaction, DesktopAction::EnterShutdown);
    }

    fn reboot_count_cycle(state: &mut DesktopState, interaction: &mut InteractionState) -> u32 {
        shut_down(state, interaction);
        let count = state.shutdown.shutdown_count;
        apply(state, interaction, DesktopAction::Reboot);
        count
    }

    #[test]
    fn boot_lays_out_shortcuts_and_opens_showcase() {
        let (state, _) = booted();

        assert_eq!(state.phase, SessionPhase::Desktop);
        assert_eq!(
            state.shortcuts,
            vec![ShortcutRecord {
                key: showcase(),
                name: "My Showcase".to_string(),
                icon_id: "showcase".to_string(),
                x: 6,
                y: 16,
                width: None,
                height: None,
                selected: false,
            }]
        );
        let window = state.window(&showcase()).expect("showcase window");
        assert_eq!(window.z_index, 1);
        assert!(!window.minimized);
    }

    #[test]
    fn boot_is_rejected_once_the_desktop_is_up() {
        let (mut state, mut interaction) = booted();
        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BootComplete {
                layout: ShortcutLayout::default(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReducerError::InvalidPhase {
                action: "boot-complete",
                phase: SessionPhase::Desktop,
            }
        );
    }

    #[test]
    fn opening_a_closed_app_adds_one_window_above_the_stack() {
        let (mut state, mut interaction) = empty_desktop();
        state.windows.push(crate::model::WindowRecord {
            key: AppKey::trusted("other"),
            name: "Other".to_string(),
            icon_id: "other".to_string(),
            z_index: 7,
            minimized: false,
            closing: false,
        });

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApplication { key: showcase() },
        );

        assert!(effects.is_empty());
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.window(&showcase()).unwrap().z_index, 8);
    }

    #[test]
    fn reopening_restores_and_raises_instead_of_duplicating() {
        let (mut state, mut interaction) = booted();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { key: showcase() },
        );

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApplication { key: showcase() },
        );

        assert_eq!(state.windows.len(), 1);
        let window = state.window(&showcase()).unwrap();
        assert!(!window.minimized);
        assert_eq!(window.z_index, 2);
    }

    #[test]
    fn opening_an_unregistered_app_is_an_error_without_state_change() {
        let (mut state, mut interaction) = booted();
        let before = state.clone();

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApplication {
                key: AppKey::trusted("missing"),
            },
        )
        .unwrap_err();

        assert_eq!(err, ReducerError::UnknownApplication(AppKey::trusted("missing")));
        assert_eq!(state, before);
    }

    #[test]
    fn close_schedules_removal_and_removal_fires_later() {
        let (mut state, mut interaction) = booted();

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { key: showcase() },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::Schedule(ScheduledTask::RemoveWindow {
                key: showcase()
            })]
        );
        assert!(state.window(&showcase()).unwrap().closing);

        let repeated = apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { key: showcase() },
        );
        assert!(repeated.is_empty());

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::RemoveWindow { key: showcase() },
        );
        assert!(state.windows.is_empty());

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::RemoveWindow { key: showcase() },
        );
        assert!(state.windows.is_empty());
    }

    #[test]
    fn reopening_a_closing_window_cancels_its_removal() {
        let (mut state, mut interaction) = booted();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { key: showcase() },
        );

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApplication { key: showcase() },
        );

        assert_eq!(
            effects,
            vec![RuntimeEffect::Cancel(ScheduledTask::RemoveWindow {
                key: showcase()
            })]
        );
        assert!(!state.window(&showcase()).unwrap().closing);
    }

    #[test]
    fn taskbar_toggle_minimizes_top_window_then_restores_it() {
        let (mut state, mut interaction) = booted();

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMinimize { key: showcase() },
        );
        let window = state.window(&showcase()).unwrap();
        assert!(window.minimized);
        assert_eq!(window.z_index, 2);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMinimize { key: showcase() },
        );
        let window = state.window(&showcase()).unwrap();
        assert!(!window.minimized);
        assert_eq!(window.z_index, 3);
    }

    #[test]
    fn interact_raises_without_restoring() {
        let (mut state, mut interaction) = booted();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { key: showcase() },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BringToFront { key: showcase() },
        );

        let window = state.window(&showcase()).unwrap();
        assert!(window.minimized);
        assert_eq!(window.z_index, 2);
    }

    #[test]
    fn window_actions_on_missing_keys_are_noops() {
        let (mut state, mut interaction) = booted();
        let before = state.clone();
        let missing = AppKey::trusted("missing");

        for action in [
            DesktopAction::CloseWindow {
                key: missing.clone(),
            },
            DesktopAction::RemoveWindow {
                key: missing.clone(),
            },
            DesktopAction::MinimizeWindow {
                key: missing.clone(),
            },
            DesktopAction::ToggleMinimize {
                key: missing.clone(),
            },
            DesktopAction::BringToFront { key: missing },
        ] {
            assert!(apply(&mut state, &mut interaction, action).is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn shutdown_waits_for_its_timer_then_clears_windows() {
        let (mut state, mut interaction) = booted();

        let effects = apply(&mut state, &mut interaction, DesktopAction::StartShutdown);
        assert_eq!(
            effects,
            vec![RuntimeEffect::Schedule(ScheduledTask::EnterShutdown)]
        );
        assert_eq!(state.phase, SessionPhase::Desktop);
        assert_eq!(state.windows.len(), 1);

        let effects = apply(&mut state, &mut interaction, DesktopAction::EnterShutdown);
        assert_eq!(
            effects,
            vec![RuntimeEffect::PhaseChanged(SessionPhase::ShuttingDown)]
        );
        assert!(state.is_shutting_down());
        assert!(state.windows.is_empty());
        assert_eq!(state.shutdown.shutdown_count, 2);
    }

    #[test]
    fn second_shutdown_request_while_pending_is_rejected() {
        let (mut state, mut interaction) = booted();
        apply(&mut state, &mut interaction, DesktopAction::StartShutdown);

        let err =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::StartShutdown).unwrap_err();
        assert_eq!(err, ReducerError::ShutdownPending);
    }

    #[test]
    fn shutdown_cancels_pending_window_removals() {
        let (mut state, mut interaction) = booted();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { key: showcase() },
        );
        apply(&mut state, &mut interaction, DesktopAction::StartShutdown);

        let effects = apply(&mut state, &mut interaction, DesktopAction::EnterShutdown);

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::Cancel(ScheduledTask::RemoveWindow { key: showcase() }),
                RuntimeEffect::PhaseChanged(SessionPhase::ShuttingDown),
            ]
        );
    }

    #[test]
    fn stale_shutdown_timer_is_ignored() {
        let (mut state, mut interaction) = booted();
        let before = state.clone();

        assert!(apply(&mut state, &mut interaction, DesktopAction::EnterShutdown).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn reboot_returns_to_an_empty_desktop() {
        let (mut state, mut interaction) = booted();
        state.shortcuts[0].selected = true;
        shut_down(&mut state, &mut interaction);

        apply(&mut state, &mut interaction, DesktopAction::Reboot);

        assert_eq!(state.phase, SessionPhase::Desktop);
        assert!(state.windows.is_empty());
        assert_eq!(state.shortcuts.len(), 1);
        assert!(!state.shortcuts[0].selected);
    }

    #[test]
    fn reboot_outside_shutdown_is_rejected() {
        let (mut state, mut interaction) = booted();
        let err = reduce_desktop(&mut state, &mut interaction, DesktopAction::Reboot).unwrap_err();
        assert_eq!(
            err,
            ReducerError::InvalidPhase {
                action: "reboot",
                phase: SessionPhase::Desktop,
            }
        );
    }

    #[test]
    fn opening_apps_is_rejected_while_shut_down() {
        let (mut state, mut interaction) = booted();
        shut_down(&mut state, &mut interaction);

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApplication { key: showcase() },
        )
        .unwrap_err();
        assert!(matches!(err, ReducerError::InvalidPhase { .. }));
        assert!(state.windows.is_empty());
    }

    #[test]
    fn shutdown_counter_grows_by_one_per_cycle() {
        let (mut state, mut interaction) = booted();
        let counts: Vec<u32> = (0..3)
            .map(|_| reboot_count_cycle(&mut state, &mut interaction))
            .collect();
        assert_eq!(counts, vec![2, 3, 4]);
    }

    #[test]
    fn rubber_band_selects_the_showcase_shortcut() {
        let (mut state, mut interaction) = booted();

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BeginSelection {
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateSelection {
                pointer: PointerPosition { x: 50, y: 50 },
            },
        );
        assert!(interaction.selection.active);
        apply(&mut state, &mut interaction, DesktopAction::EndSelection);

        assert!(state.shortcuts[0].selected);
        assert!(!interaction.selection.active);
    }

    #[test]
    fn entering_shutdown_drops_an_active_rubber_band() {
        let (mut state, mut interaction) = booted();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BeginSelection {
                pointer: PointerPosition { x: 10, y: 10 },
            },
        );

        shut_down(&mut state, &mut interaction);

        assert!(!interaction.selection.active);
    }
}
