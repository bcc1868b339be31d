//! slsgen — serverless descriptor generator CLI.
//!
//! # Usage
//!
//! ```text
//! slsgen --appId <ID> [--runtime <RUNTIME>]
//!        --host <HOST> --port <PORT> --name <NAME>
//!        --username <USER> --password <PASSWORD>
//!        [--outputPath <FILE>] [--dry-run]
//! ```

mod writer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use slsgen_core::{RawParams, DEFAULT_OUTPUT_PATH, DEFAULT_RUNTIME};
use slsgen_renderer::engine;

use writer::WriteResult;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "slsgen",
    version,
    about = "Generate a Serverless Framework descriptor for a GraphQL subscriptions backend",
    long_about = None,
)]
struct Cli {
    /// Application id; becomes the service name and the table-name prefix.
    #[arg(long = "appId", short = 'a', value_name = "ID")]
    app_id: Option<String>,

    /// Execution runtime for the deployed functions.
    #[arg(long, short = 'r', value_name = "RUNTIME", default_value = DEFAULT_RUNTIME)]
    runtime: String,

    /// Database host (also accepted as --hn).
    #[arg(long, alias = "hn", value_name = "HOST")]
    host: Option<String>,

    /// Database port.
    #[arg(long, short = 'p', value_name = "PORT")]
    port: Option<String>,

    /// Database name.
    #[arg(long, short = 'n', value_name = "NAME")]
    name: Option<String>,

    /// Database username.
    #[arg(long, short = 'u', value_name = "USER")]
    username: Option<String>,

    /// Database password (also accepted as --pw).
    #[arg(long, alias = "pw", value_name = "PASSWORD")]
    password: Option<String>,

    /// Destination file for the rendered descriptor.
    #[arg(
        long = "outputPath",
        short = 'o',
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_PATH
    )]
    output_path: PathBuf,

    /// Print the rendered descriptor to stdout without writing any file.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let dry_run = self.dry_run;
        let params = RawParams {
            app_id: self.app_id,
            runtime: Some(self.runtime),
            host: self.host,
            port: self.port,
            name: self.name,
            username: self.username,
            password: self.password,
            output_path: Some(self.output_path),
        };

        let config = params.validate().context("invalid parameters")?;
        let rendered = engine::render(&config).context("failed to render descriptor")?;

        let result = writer::write_descriptor(&config.output_path, &rendered, dry_run)
            .with_context(|| format!("failed to write '{}'", config.output_path.display()))?;

        match result {
            WriteResult::Written { path } => {
                println!("{} wrote {}", "✓".green().bold(), path.display());
            }
            WriteResult::WouldWrite { path } => {
                print!("{rendered}");
                eprintln!("[dry-run] would write: {}", path.display());
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cli.run()
}
