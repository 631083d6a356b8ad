pub mod compile;
pub mod error;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod state;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tauri")]
use std::sync::Arc;

#[cfg(feature = "tauri")]
use runtime::{MinicRuntime, TauriRuntime};
#[cfg(feature = "tauri")]
use state::AppState;

#[cfg(feature = "tauri")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("minic=debug".parse().expect("valid directive")),
        )
        .init();

    tauri::Builder::default()
        .setup(|app| {
            use tauri::Manager;

            let runtime: Arc<dyn MinicRuntime> = Arc::new(TauriRuntime::new(app.handle().clone()));
            let state = tauri::async_runtime::block_on(AppState::initialize(runtime, None))?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session commands
            session::session_snapshot,
            session::session_set_source,
            session::session_run,
            session::session_accept_correction,
            session::session_teardown,
            // Settings commands
            settings::commands::get_settings,
            settings::commands::update_settings,
            settings::commands::get_setting,
            settings::commands::set_setting,
            settings::commands::reset_settings,
            settings::commands::reload_settings,
            settings::commands::get_settings_path,
            // Theme commands
            settings::commands::get_theme,
            settings::commands::set_theme,
            settings::commands::toggle_theme,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
