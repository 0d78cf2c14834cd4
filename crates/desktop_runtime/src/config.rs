//! Shell timing and layout configuration embedded from `shell.toml` at build time.

use std::{sync::OnceLock, time::Duration};

use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::{generated::SHELL_CONFIG_JSON, scheduler::ScheduledTask};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellTimings {
    /// Delay between a close request and the window's removal.
    pub close_delay_ms: u64,
    /// Delay between the shutdown request and the shutdown view.
    pub shutdown_delay_ms: u64,
    /// Delay between revealed lines of the shutdown script.
    pub shutdown_line_interval_ms: u64,
}

impl Default for ShellTimings {
    fn default() -> Self {
        Self {
            close_delay_ms: 100,
            shutdown_delay_ms: 600,
            shutdown_line_interval_ms: 1200,
        }
    }
}

/// Column layout for desktop shortcuts, one row per registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub spacing_y: i32,
    /// Hit-box size; `None` falls back to the 64x80 default.
    pub icon_width: Option<i32>,
    pub icon_height: Option<i32>,
}

impl Default for ShortcutLayout {
    fn default() -> Self {
        Self {
            origin_x: 6,
            origin_y: 16,
            spacing_y: 104,
            icon_width: None,
            icon_height: None,
        }
    }
}

impl ShortcutLayout {
    /// Top-left corner of the shortcut at `index`.
    pub fn position(&self, index: usize) -> (i32, i32) {
        let row = i32::try_from(index).unwrap_or(i32::MAX);
        (
            self.origin_x,
            self.origin_y.saturating_add(row.saturating_mul(self.spacing_y)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub timings: ShellTimings,
    pub shortcuts: ShortcutLayout,
}

impl ShellConfig {
    /// Parses a JSON config body, filling omitted fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Delay before `task` fires.
    pub fn delay_for(&self, task: &ScheduledTask) -> Duration {
        let millis = match task {
            ScheduledTask::RemoveWindow { .. } => self.timings.close_delay_ms,
            ScheduledTask::EnterShutdown => self.timings.shutdown_delay_ms,
        };
        Duration::from_millis(millis)
    }

    pub fn shutdown_line_interval(&self) -> Duration {
        Duration::from_millis(self.timings.shutdown_line_interval_ms)
    }
}

/// Returns the embedded shell config, or defaults when the embedded body fails to parse.
pub fn shell_config() -> &'static ShellConfig {
    static CONFIG: OnceLock<ShellConfig> = OnceLock::new();
    CONFIG.get_or_init(|| match ShellConfig::from_json(SHELL_CONFIG_JSON) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("shell config parse failed, using defaults: {err}");
            ShellConfig::default()
        }
    })
}
