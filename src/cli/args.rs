//! CLI argument parsing using clap.
//!
//! Defines the command-line interface for minic-cli.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

/// minic CLI - Headless compile/analyze runs against the compile service
#[derive(Parser, Debug, Clone)]
#[command(name = "minic-cli")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Mini-C source file to compile (reads stdin when omitted)
    #[arg(conflicts_with = "execute")]
    pub file: Option<PathBuf>,

    /// Compile source given inline and exit
    #[arg(short = 'e', long, conflicts_with = "file")]
    pub execute: Option<String>,

    /// Override the compile service endpoint from settings
    #[arg(long, env = "MINIC_SERVICE_URL")]
    pub endpoint: Option<String>,

    /// Accept the offered correction, writing it back to the source file
    #[arg(long)]
    pub apply_fix: bool,

    /// Output events as JSON lines (for scripting/parsing)
    #[arg(long)]
    pub json: bool,

    /// Only output the final panes (suppress progress)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Read the source text to submit.
    ///
    /// Priority: inline `-e` text, then the positional file, then stdin.
    /// Reading stdin from an interactive terminal is rejected rather than
    /// hanging silently.
    pub fn read_source(&self) -> anyhow::Result<String> {
        if let Some(ref source) = self.execute {
            return Ok(source.clone());
        }

        if let Some(ref file) = self.file {
            return std::fs::read_to_string(file).map_err(|e| {
                anyhow::anyhow!("Failed to read source file '{}': {}", file.display(), e)
            });
        }

        if atty::is(atty::Stream::Stdin) {
            anyhow::bail!("No source given: pass a file, use -e, or pipe source on stdin");
        }

        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    }
}
