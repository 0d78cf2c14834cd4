//! Static application registry and the key-indexed app module table.

use std::sync::OnceLock;

use desktop_app_contract::{AppKey, AppModule};
use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::{
    config::ShortcutLayout, generated::APP_MANIFEST_CATALOG_JSON, model::ShortcutRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub key: AppKey,
    pub display_name: String,
    pub icon_id: String,
    #[serde(default)]
    pub show_on_desktop: bool,
    #[serde(default)]
    pub open_on_boot: bool,
}

const APP_MODULES: [(&str, AppModule); 1] = [(
    "showcase",
    AppModule::new(desktop_app_showcase::mount_showcase),
)];

/// Parses a manifest catalog, dropping entries whose keys fail validation.
pub fn parse_catalog(raw: &str) -> Result<Vec<AppDescriptor>, serde_json::Error> {
    let entries = serde_json::from_str::<Vec<AppDescriptor>>(raw)?;
    Ok(entries
        .into_iter()
        .filter(|entry| match AppKey::new(entry.key.as_str()) {
            Ok(_) => true,
            Err(err) => {
                logging::warn!("skipping app manifest: {err}");
                false
            }
        })
        .collect())
}

pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        parse_catalog(APP_MANIFEST_CATALOG_JSON).unwrap_or_else(|err| {
            logging::warn!("app manifest catalog parse failed: {err}");
            Vec::new()
        })
    })
}

pub fn app_descriptor(key: &AppKey) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| &entry.key == key)
}

pub fn app_module(key: &AppKey) -> Option<AppModule> {
    APP_MODULES
        .iter()
        .find(|(raw, _)| *raw == key.as_str())
        .map(|(_, module)| *module)
}

/// Keys the desktop opens right after boot, in registry order.
pub fn boot_app_keys() -> Vec<AppKey> {
    app_registry()
        .iter()
        .filter(|entry| entry.open_on_boot)
        .map(|entry| entry.key.clone())
        .collect()
}

/// Builds one unselected shortcut per desktop-visible registry entry.
pub fn build_shortcuts(entries: &[AppDescriptor], layout: ShortcutLayout) -> Vec<ShortcutRecord> {
    entries
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .enumerate()
        .map(|(index, entry)| {
            let (x, y) = layout.position(index);
            ShortcutRecord {
                key: entry.key.clone(),
                name: entry.display_name.clone(),
                icon_id: entry.icon_id.clone(),
                x,
                y,
                width: layout.icon_width,
                height: layout.icon_height,
                selected: false,
            }
        })
        .collect()
}

pub fn icon_asset_url(icon_id: &str) -> String {
    format!("/assets/icons/{icon_id}.png")
}
