//! CLI execution runner.
//!
//! Drives one compile run through the shared workflow controller and
//! renders the settled session afterwards.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::runtime::{CliRuntime, RuntimeEvent};
use crate::session::{CompileStatus, SessionSnapshot};

use super::bootstrap::CliContext;
use super::output::run_event_loop;

/// Submit `source` once and wait for the run to settle.
///
/// Spawns the event loop in a background task, drives the controller, and
/// returns the final status for the process exit code.
pub async fn execute_once(ctx: &mut CliContext, source: &str) -> Result<CompileStatus> {
    // Create a fresh channel for this execution
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RuntimeEvent>();

    // Update the runtime's sender so events flow to our new receiver.
    // We need to downcast to CliRuntime to access replace_event_tx
    if let Some(cli_runtime) = ctx.state.runtime.as_any().downcast_ref::<CliRuntime>() {
        cli_runtime.replace_event_tx(event_tx);
    } else {
        tracing::warn!("Runtime is not CliRuntime, events may not be received");
    }

    // Spawn the event loop handler
    let json_mode = ctx.args.json;
    let quiet_mode = ctx.args.quiet;

    let output_handle: JoinHandle<Result<Option<CompileStatus>>> =
        tokio::spawn(async move { run_event_loop(event_rx, json_mode, quiet_mode).await });

    ctx.state.store.set_source(source.to_string()).await;
    ctx.state.controller.run().await;

    // The run has settled by the time run() returns; the loop exits on the
    // terminal event it produced.
    let status = match output_handle.await {
        Ok(Ok(status)) => status.unwrap_or(CompileStatus::Unknown),
        Ok(Err(e)) => {
            tracing::warn!("Output handler error: {}", e);
            CompileStatus::Unknown
        }
        Err(e) => {
            tracing::warn!("Output handler panicked: {}", e);
            CompileStatus::Unknown
        }
    };

    let snapshot = ctx.state.store.snapshot().await;
    if !json_mode {
        render_panes(&snapshot, quiet_mode);
    }

    if ctx.args.apply_fix {
        apply_fix(ctx, &snapshot).await?;
    }

    Ok(status)
}

/// Render the settled panes to stdout.
fn render_panes(snapshot: &SessionSnapshot, quiet_mode: bool) {
    if quiet_mode {
        // Quiet mode: program output only, the pane a script most wants
        println!("{}", snapshot.program_output);
        return;
    }

    println!("=== Status: {} ===", snapshot.status_label);
    println!("\n--- Compiler output ---\n{}", snapshot.compiler_output);
    println!("\n--- Program output ---\n{}", snapshot.program_output);
    println!("\n--- Feedback ---\n{}", snapshot.critique);

    if snapshot.correction_offered {
        println!("\n--- Suggested fix ---\n{}", snapshot.corrected_code);
        if let Some(ref diff) = snapshot.correction_diff {
            println!("\n--- Diff ---\n{}", diff);
        }
    }
}

/// Accept the offered correction and write it back to the input file.
async fn apply_fix(ctx: &mut CliContext, snapshot: &SessionSnapshot) -> Result<()> {
    if !snapshot.correction_offered {
        if !ctx.args.quiet {
            eprintln!("[fix] no correction offered, source unchanged");
        }
        return Ok(());
    }

    if !ctx.state.controller.accept_correction().await {
        return Ok(());
    }

    if let Some(ref file) = ctx.args.file {
        let corrected = ctx.state.store.source().await;
        tokio::fs::write(file, &corrected).await?;
        if !ctx.args.quiet {
            eprintln!("[fix] corrected source written to {}", file.display());
        }
    }

    Ok(())
}
