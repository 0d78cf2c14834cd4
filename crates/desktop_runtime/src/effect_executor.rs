//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
    scheduler::{ScheduleOutcome, ScheduledTask},
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before processing so nested dispatches enqueue a fresh batch instead of
    // being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::Schedule(task) => schedule(runtime, task),
        RuntimeEffect::Cancel(task) => {
            runtime.scheduler.update_value(|pending| {
                pending.cancel(&task);
            });
        }
        RuntimeEffect::PhaseChanged(phase) => logging::log!("desktop phase -> {phase:?}"),
    }
}

fn schedule(runtime: DesktopRuntimeContext, task: ScheduledTask) {
    let delay = runtime.config.delay_for(&task);
    let fired = task.clone();
    let outcome = runtime.scheduler.try_update_value(|pending| {
        pending.schedule_with(task.clone(), || {
            match set_timeout_with_handle(
                move || {
                    let still_pending = runtime
                        .scheduler
                        .try_update_value(|pending| pending.complete(&fired))
                        .unwrap_or(false);
                    if still_pending {
                        runtime.dispatch_action(fired.into_action());
                    }
                },
                delay,
            ) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    logging::warn!("timer setup failed for {task:?}: {err:?}");
                    None
                }
            }
        })
    });

    if let Some(action) = action_for_unarmed_task(task, outcome) {
        runtime.dispatch_action(action);
    }
}

/// A refused timer runs its task immediately; the reducer already committed to it.
fn action_for_unarmed_task(
    task: ScheduledTask,
    outcome: Option<ScheduleOutcome>,
) -> Option<DesktopAction> {
    (outcome == Some(ScheduleOutcome::Refused)).then(|| task.into_action())
}
