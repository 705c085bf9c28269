// ============================================================================
// SHARE ME - image/video sharing client (Rust + Yew, PocketBase backend)
// ============================================================================
// - pocketbase: client handle, credential store, context provider
// - services:   backend calls (auth refresh, uploads, posts)
// - state:      pure upload reducer
// - context:    auth + uploader providers
// - hooks:      auth state for views
// - components: views
// - shell:      page metadata
// ============================================================================

pub mod components;
pub mod config;
pub mod context;
pub mod env_keys;
pub mod error;
pub mod hooks;
pub mod models;
pub mod pocketbase;
pub mod services;
pub mod shell;
pub mod state;

use crate::components::App;
use crate::config::CONFIG;
use crate::shell::PageMeta;

/// Installs logging and page metadata, then mounts the app on `<body>`
pub fn run() {
    console_error_panic_hook::set_once();

    if CONFIG.enable_logging {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level));
    }
    log::info!("🚀 Share Me starting ({})", CONFIG.environment);

    if let Err(e) = shell::install_head(&PageMeta::default()) {
        log::error!("❌ Could not write page metadata: {:?}", e);
    }

    yew::Renderer::<App>::new().render();
}
