//! Rubber-band selection over desktop shortcuts.

use crate::model::{BoxRect, PointerPosition, SelectionRect, ShortcutRecord};

/// Starts a fresh drag at `pointer` and clears every shortcut's selection.
pub fn begin_selection(
    selection: &mut SelectionRect,
    shortcuts: &mut [ShortcutRecord],
    pointer: PointerPosition,
) {
    *selection = SelectionRect {
        active: true,
        origin: pointer,
        bounds: BoxRect {
            x: pointer.x,
            y: pointer.y,
            width: 0,
            height: 0,
        },
    };
    for shortcut in shortcuts {
        shortcut.selected = false;
    }
}

/// Stretches the active drag to `pointer`. Returns `false` when no drag is active.
pub fn update_selection(selection: &mut SelectionRect, pointer: PointerPosition) -> bool {
    if !selection.active {
        return false;
    }
    selection.bounds = BoxRect::from_corners(selection.origin, pointer);
    true
}

/// Marks every shortcut whose box meets the final drag box, then ends the drag.
pub fn end_selection(selection: &mut SelectionRect, shortcuts: &mut [ShortcutRecord]) -> bool {
    if !selection.active {
        return false;
    }
    for shortcut in shortcuts.iter_mut() {
        shortcut.selected = selection.bounds.intersects(shortcut.bounds());
    }
    selection.active = false;
    true
}

/// Abandons the active drag, leaving shortcut selection as it was.
pub fn cancel_selection(selection: &mut SelectionRect) -> bool {
    if !selection.active {
        return false;
    }
    selection.active = false;
    true
}
