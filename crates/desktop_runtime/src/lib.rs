//! Desktop shell runtime for the portfolio site: window registry, rubber-band selection,
//! shutdown sequencing, and the Leptos components that render them.

pub mod apps;
pub mod components;
pub mod config;
mod effect_executor;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod scheduler;
pub mod selection;
pub mod shutdown;
pub mod window_manager;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));
}

pub use components::DesktopShell;
pub use config::{shell_config, ShellConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
