//! Cancellable delayed tasks owned by the desktop runtime.
//!
//! Every pending timer is tracked by the [`ScheduledTask`] it will fire, so the reducer can cancel
//! work by identity and the provider can cancel everything on teardown.

use std::collections::BTreeMap;

use desktop_app_contract::AppKey;

use crate::reducer::DesktopAction;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
/// Delayed work requested by the reducer.
pub enum ScheduledTask {
    /// Drop a closing window once its close transition has played.
    RemoveWindow {
        /// Window to remove.
        key: AppKey,
    },
    /// Replace the desktop with the shutdown view.
    EnterShutdown,
}

impl ScheduledTask {
    /// Action dispatched when the task's timer fires.
    pub fn into_action(self) -> DesktopAction {
        match self {
            Self::RemoveWindow { key } => DesktopAction::RemoveWindow { key },
            Self::EnterShutdown => DesktopAction::EnterShutdown,
        }
    }
}

/// Handle to an armed timer that can be disarmed before it fires.
pub trait TimerHandle {
    fn cancel(self);
}

impl TimerHandle for leptos::leptos_dom::helpers::TimeoutHandle {
    fn cancel(self) {
        self.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of [`TaskScheduler::schedule_with`].
pub enum ScheduleOutcome {
    /// A new timer is pending for the task.
    Armed,
    /// The task already had a timer; nothing was armed.
    AlreadyPending,
    /// The host refused the timer; nothing is pending for the task.
    Refused,
}

/// Pending timers keyed by task identity.
pub struct TaskScheduler<H: TimerHandle> {
    pending: BTreeMap<ScheduledTask, H>,
}

impl<H: TimerHandle> Default for TaskScheduler<H> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<H: TimerHandle> TaskScheduler<H> {
    pub fn is_pending(&self, task: &ScheduledTask) -> bool {
        self.pending.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Arms `task` through `arm` unless it is already pending.
    ///
    /// `arm` returning `None` means the host refused the timer; the caller then owns running the
    /// task some other way.
    pub fn schedule_with(
        &mut self,
        task: ScheduledTask,
        arm: impl FnOnce() -> Option<H>,
    ) -> ScheduleOutcome {
        if self.is_pending(&task) {
            return ScheduleOutcome::AlreadyPending;
        }
        match arm() {
            Some(handle) => {
                self.pending.insert(task, handle);
                ScheduleOutcome::Armed
            }
            None => ScheduleOutcome::Refused,
        }
    }

    /// Forgets a task whose timer already fired. Returns `false` for stale timers.
    pub fn complete(&mut self, task: &ScheduledTask) -> bool {
        self.pending.remove(task).is_some()
    }

    /// Disarms a pending task.
    pub fn cancel(&mut self, task: &ScheduledTask) -> bool {
        match self.pending.remove(task) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Disarms every pending task and returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for handle in pending.into_values() {
            handle.cancel();
        }
        count
    }
}
