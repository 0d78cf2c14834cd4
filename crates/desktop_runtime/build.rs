use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    schema_version: u32,
    key: String,
    display_name: String,
    icon_id: String,
    #[serde(default)]
    show_on_desktop: bool,
    #[serde(default)]
    open_on_boot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShellConfigFile {
    schema_version: u32,
    #[serde(flatten)]
    body: toml::Table,
}

fn app_manifest_paths(root: &Path) -> Vec<PathBuf> {
    ["showcase"]
        .iter()
        .map(|name| {
            root.join("..")
                .join("apps")
                .join(name)
                .join("app.manifest.toml")
        })
        .collect()
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<AppManifest>::new();

    for path in app_manifest_paths(&crate_root) {
        let manifest: AppManifest = read_toml(&path);
        if manifest.schema_version != 1 {
            panic!(
                "manifest schema mismatch in {}: expected 1 found {}",
                path.display(),
                manifest.schema_version
            );
        }
        if manifests.iter().any(|m| m.key == manifest.key) {
            panic!("duplicate app key `{}` in {}", manifest.key, path.display());
        }
        manifests.push(manifest);
    }

    let shell_path = crate_root.join("shell.toml");
    let shell: ShellConfigFile = read_toml(&shell_path);
    if shell.schema_version != 1 {
        panic!(
            "shell config schema mismatch in {}: expected 1 found {}",
            shell_path.display(),
            shell.schema_version
        );
    }

    let catalog_json =
        serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let shell_json = serde_json::to_string_pretty(&shell.body).expect("serialize shell config");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON (registry order).\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n\
/// Build-time generated shell configuration JSON.\n\
pub const SHELL_CONFIG_JSON: &str = r##\"{}\"##;\n",
        catalog_json, shell_json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
