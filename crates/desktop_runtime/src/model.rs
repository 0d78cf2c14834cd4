use desktop_app_contract::AppKey;
use serde::{Deserialize, Serialize};

/// Shortcut hit-box width used when a shortcut declares none.
pub const DEFAULT_SHORTCUT_WIDTH: i32 = 64;
/// Shortcut hit-box height used when a shortcut declares none.
pub const DEFAULT_SHORTCUT_HEIGHT: i32 = 80;
/// Shutdown counter value before the first shutdown.
pub const INITIAL_SHUTDOWN_COUNT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned box in desktop client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoxRect {
    /// Normalized box spanning two corners, valid for any drag direction.
    pub fn from_corners(a: PointerPosition, b: PointerPosition) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Inclusive overlap test; boxes that only touch along an edge intersect.
    pub fn intersects(self, other: BoxRect) -> bool {
        !(self.x > other.right()
            || self.right() < other.x
            || self.y > other.bottom()
            || self.bottom() < other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub key: AppKey,
    pub name: String,
    pub icon_id: String,
    pub z_index: u32,
    pub minimized: bool,
    /// Delayed removal is pending.
    pub closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    pub key: AppKey,
    pub name: String,
    pub icon_id: String,
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub selected: bool,
}

impl ShortcutRecord {
    pub fn bounds(&self) -> BoxRect {
        BoxRect {
            x: self.x,
            y: self.y,
            width: self.width.unwrap_or(DEFAULT_SHORTCUT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_SHORTCUT_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRect {
    pub active: bool,
    pub origin: PointerPosition,
    pub bounds: BoxRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Booting,
    Desktop,
    ShuttingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownState {
    /// Starts at [`INITIAL_SHUTDOWN_COUNT`] and grows by one per completed shutdown.
    pub shutdown_count: u32,
    /// A delayed shutdown entry is pending.
    pub requested: bool,
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self {
            shutdown_count: INITIAL_SHUTDOWN_COUNT,
            requested: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopState {
    pub phase: SessionPhase,
    /// Open windows in the order they were opened (taskbar order).
    pub windows: Vec<WindowRecord>,
    pub shortcuts: Vec<ShortcutRecord>,
    pub shutdown: ShutdownState,
}

impl DesktopState {
    pub fn window(&self, key: &AppKey) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.key == key)
    }

    pub fn is_shutting_down(&self) -> bool {
        self.phase == SessionPhase::ShuttingDown
    }

    /// Key of the window with the highest z-index, if any window is open.
    pub fn top_window_key(&self) -> Option<&AppKey> {
        self.windows
            .iter()
            .max_by_key(|w| w.z_index)
            .map(|w| &w.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub selection: SelectionRect,
}
