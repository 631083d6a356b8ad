//! Tauri commands for the compile session.

use tauri::State;

use crate::error::Result;
use crate::state::AppState;

use super::store::SessionSnapshot;

/// Get a full snapshot of the session for rendering.
#[tauri::command]
pub async fn session_snapshot(state: State<'_, AppState>) -> Result<SessionSnapshot> {
    Ok(state.store.snapshot().await)
}

/// Replace the source buffer with the editor's current text.
#[tauri::command]
pub async fn session_set_source(state: State<'_, AppState>, source: String) -> Result<()> {
    state.store.set_source(source).await;
    Ok(())
}

/// Submit the current source for compilation and analysis.
///
/// No-op when a run is already in flight; the result arrives as session
/// events plus a refreshed snapshot.
#[tauri::command]
pub async fn session_run(state: State<'_, AppState>) -> Result<()> {
    state.controller.run().await;
    Ok(())
}

/// Replace the source with the offered correction, if a real one is on
/// offer. Returns whether the correction was applied.
#[tauri::command]
pub async fn session_accept_correction(state: State<'_, AppState>) -> Result<bool> {
    Ok(state.controller.accept_correction().await)
}

/// Tear the session down when the window goes away. A still-pending result
/// is discarded on arrival instead of landing in a stale store.
#[tauri::command]
pub async fn session_teardown(state: State<'_, AppState>) -> Result<()> {
    state.controller.teardown().await;
    Ok(())
}
