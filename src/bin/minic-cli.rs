//! minic CLI - Headless compile/analyze runs
//!
//! This binary submits Mini-C source to the compile service through the same
//! workflow controller as the GUI application, enabling automated grading,
//! scripting, and CI usage.
//!
//! # Usage
//!
//! ```bash
//! # Build the CLI binary
//! cargo build --package minic --features cli --no-default-features --bin minic-cli
//!
//! # Compile a source file
//! ./target/debug/minic-cli prog.c
//!
//! # Compile inline source
//! ./target/debug/minic-cli -e 'int main() { return 0; }'
//!
//! # JSON output for scripting
//! ./target/debug/minic-cli prog.c --json | jq .
//!
//! # Accept the suggested fix and write it back to the file
//! ./target/debug/minic-cli prog.c --apply-fix
//! ```
//!
//! Exits non-zero unless the run settles with a success status.
//!
//! # Features
//!
//! This binary requires the `cli` feature flag and is mutually exclusive
//! with the `tauri` feature (GUI application).

use anyhow::Result;
use clap::Parser;

use minic_lib::cli::{execute_once, initialize, Args};
use minic_lib::session::CompileStatus;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let source = args.read_source()?;

    // Initialize the full stack
    let mut ctx = initialize(&args).await?;

    let status = execute_once(&mut ctx, &source).await?;

    // Graceful shutdown
    ctx.shutdown().await?;

    if !status.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
