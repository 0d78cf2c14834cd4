//! Shared contract types between the portfolio desktop shell and the apps it hosts.
//!
//! Hosted content is opaque to the shell. The only capabilities an app relies on are the three
//! window lifecycle callbacks in [`WindowCallbacks`], which the shell binds to the owning
//! window's key at mount time.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, Signal, View};
use serde::{Deserialize, Serialize};

const MAX_APP_KEY_LEN: usize = 48;

/// Stable registry key for an application (and for its single desktop window).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppKey(String);

impl AppKey {
    /// Returns a key when `raw` is 1..=48 chars of lowercase ASCII, digits, or `-`, starting
    /// with a letter.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_app_key(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid app key `{raw}`; expected lowercase letters, digits, or `-`"
            ))
        }
    }

    /// Creates a key without validation for trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_app_key(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_APP_KEY_LEN {
        return false;
    }
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Clone, Copy)]
/// Window lifecycle callbacks injected by the shell into every mounted app.
///
/// Apps call these at user-driven moments: any pointer interaction inside the window
/// (`on_interact`), the title bar minimize button (`on_minimize`), and the close button
/// (`on_close`).
pub struct WindowCallbacks {
    /// Raise the window to the top of the stack.
    pub on_interact: Callback<()>,
    /// Hide the window while keeping it mounted.
    pub on_minimize: Callback<()>,
    /// Start the delayed close sequence.
    pub on_close: Callback<()>,
}

impl WindowCallbacks {
    /// Requests that the owning window be raised.
    pub fn interact(&self) {
        self.on_interact.call(());
    }

    /// Requests that the owning window be minimized.
    pub fn minimize(&self) {
        self.on_minimize.call(());
    }

    /// Requests that the owning window be closed.
    pub fn close(&self) {
        self.on_close.call(());
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop shell per window.
pub struct AppMountContext {
    /// Key of the window hosting this app.
    pub key: AppKey,
    /// Display name from the registry, used for the window title.
    pub title: String,
    /// Registry icon id for the window title bar.
    pub icon_id: String,
    /// Lifecycle callbacks bound to this window by the shell.
    pub callbacks: WindowCallbacks,
    /// Whether the window currently holds the top of the stack.
    pub is_focused: Signal<bool>,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module entry in the runtime's key-indexed dispatch table.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a shell-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn app_key_accepts_lowercase_words() {
        assert!(AppKey::new("showcase").is_ok());
        assert!(AppKey::new("my-showcase2").is_ok());
        assert!(AppKey::new("").is_err());
        assert!(AppKey::new("Showcase").is_err());
        assert!(AppKey::new("2showcase").is_err());
        assert!(AppKey::new("showcase-").is_err());
        assert!(AppKey::new("show case").is_err());
        assert!(AppKey::new("a".repeat(49)).is_err());
    }

    #[test]
    fn app_key_serializes_as_plain_string() {
        let key = AppKey::trusted("showcase");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"showcase\"");
        let parsed: AppKey = serde_json::from_str("\"showcase\"").unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn window_callbacks_route_to_their_handlers() {
        let runtime = leptos::create_runtime();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let record = |name: &'static str| {
            let calls = calls.clone();
            Callback::new(move |_: ()| calls.borrow_mut().push(name))
        };
        let callbacks = WindowCallbacks {
            on_interact: record("interact"),
            on_minimize: record("minimize"),
            on_close: record("close"),
        };

        callbacks.interact();
        callbacks.close();
        callbacks.minimize();

        assert_eq!(*calls.borrow(), vec!["interact", "close", "minimize"]);
        runtime.dispose();
    }
}
