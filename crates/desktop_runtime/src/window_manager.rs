//! Shared window-manager transition helpers used by the desktop reducer.
//!
//! Stacking uses raw z-index values: every raise assigns `highest + 1`, so the window touched
//! last always sorts on top. Unknown keys are ignored and reported through the `bool` returns.

use desktop_app_contract::AppKey;

use crate::model::{DesktopState, WindowRecord};

/// Maximum z-index over all windows, or 0 when none are open.
pub fn highest_z_index(state: &DesktopState) -> u32 {
    state.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
}

fn next_z_index(state: &DesktopState) -> u32 {
    highest_z_index(state).saturating_add(1)
}

pub fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    key: &AppKey,
) -> Option<&'a mut WindowRecord> {
    state.windows.iter_mut().find(|w| &w.key == key)
}

/// Appends a fresh window on top of the stack.
pub fn push_window(state: &mut DesktopState, key: AppKey, name: String, icon_id: String) {
    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        key,
        name,
        icon_id,
        z_index,
        minimized: false,
        closing: false,
    });
}

/// Raises `key` to `highest + 1` without touching its minimized flag.
pub fn bring_to_front(state: &mut DesktopState, key: &AppKey) -> bool {
    let z_index = next_z_index(state);
    let Some(window) = find_window_mut(state, key) else {
        return false;
    };
    window.z_index = z_index;
    true
}

/// Taskbar focus/minimize policy.
///
/// A minimized window, or the current top window, has its minimized flag flipped. Any other
/// window only gets raised. Every case ends with the window at `highest + 1`.
pub fn toggle_minimize(state: &mut DesktopState, key: &AppKey) -> bool {
    let highest = highest_z_index(state);
    let Some(window) = find_window_mut(state, key) else {
        return false;
    };
    if window.minimized || window.z_index == highest {
        window.minimized = !window.minimized;
    }
    window.z_index = highest.saturating_add(1);
    true
}

pub fn minimize(state: &mut DesktopState, key: &AppKey) -> bool {
    let Some(window) = find_window_mut(state, key) else {
        return false;
    };
    window.minimized = true;
    true
}

/// Removes `key` from the collection. Returns `false` when it was already gone.
pub fn remove_window(state: &mut DesktopState, key: &AppKey) -> bool {
    let before_len = state.windows.len();
    state.windows.retain(|w| &w.key != key);
    state.windows.len() != before_len
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(raw: &str) -> AppKey {
        AppKey::trusted(raw)
    }

    fn state_with(keys: &[&str]) -> DesktopState {
        let mut state = DesktopState::default();
        for raw in keys {
            push_window(&mut state, key(raw), raw.to_string(), raw.to_string());
        }
        state
    }

    fn z_of(state: &DesktopState, raw: &str) -> u32 {
        state.window(&key(raw)).expect("window").z_index
    }

    #[test]
    fn highest_z_index_is_zero_without_windows() {
        assert_eq!(highest_z_index(&DesktopState::default()), 0);
    }

    #[test]
    fn pushed_windows_stack_in_open_order() {
        let state = state_with(&["showcase", "about", "contact"]);
        assert_eq!(
            state.windows.iter().map(|w| w.z_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(state.top_window_key(), Some(&key("contact")));
    }

    #[test]
    fn bring_to_front_keeps_minimized_flag() {
        let mut state = state_with(&["showcase", "about"]);
        assert!(minimize(&mut state, &key("showcase")));
        assert!(bring_to_front(&mut state, &key("showcase")));

        let window = state.window(&key("showcase")).unwrap();
        assert_eq!(window.z_index, 3);
        assert!(window.minimized);
    }

    #[test]
    fn toggle_on_top_window_minimizes_and_raises() {
        let mut state = state_with(&["showcase", "about"]);
        assert!(toggle_minimize(&mut state, &key("about")));

        let window = state.window(&key("about")).unwrap();
        assert!(window.minimized);
        assert_eq!(window.z_index, 3);
    }

    #[test]
    fn toggle_on_background_window_only_raises() {
        let mut state = state_with(&["showcase", "about"]);
        assert!(toggle_minimize(&mut state, &key("showcase")));

        let window = state.window(&key("showcase")).unwrap();
        assert!(!window.minimized);
        assert_eq!(window.z_index, 3);
        assert_eq!(state.top_window_key(), Some(&key("showcase")));
    }

    #[test]
    fn toggle_on_minimized_background_window_restores() {
        let mut state = state_with(&["showcase", "about"]);
        minimize(&mut state, &key("showcase"));
        assert!(toggle_minimize(&mut state, &key("showcase")));

        let window = state.window(&key("showcase")).unwrap();
        assert!(!window.minimized);
        assert_eq!(z_of(&state, "showcase"), 3);
    }

    #[test]
    fn unknown_keys_leave_state_untouched() {
        let mut state = state_with(&["showcase"]);
        let before = state.clone();

        assert!(!bring_to_front(&mut state, &key("missing")));
        assert!(!toggle_minimize(&mut state, &key("missing")));
        assert!(!minimize(&mut state, &key("missing")));
        assert!(!remove_window(&mut state, &key("missing")));
        assert_eq!(state, before);
    }
}
