//! Jenerator: render a pipeline file next to every config under the
//! working directory.
//!
//! # Usage
//!
//! ```text
//! jenerator [-c jenerator.yaml] [-t Jenkinsfile.jinja2] [-o Jenkinsfile] [-f] [-v]
//!           [-n] [--max-depth N] [-x DIR]... [-L]
//! jenerator --version
//! ```

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jenerator_core::types::{DEFAULT_CONFIG_NAME, DEFAULT_OUTPUT_NAME, DEFAULT_TEMPLATE_NAME};
use jenerator_core::{Settings, WalkOptions};
use jenerator_sync::pipeline;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "jenerator",
    about = "Render a shared template once per discovered YAML config",
    long_about = None,
    disable_version_flag = true,
)]
struct Cli {
    /// Config file name to search for (there may be several).
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    config: String,

    /// Template file name, looked up next to each config, then in ./templates.
    #[arg(short, long, default_value = DEFAULT_TEMPLATE_NAME)]
    template: String,

    /// Output file name, written next to each config.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    output: String,

    /// Overwrite output files that already exist.
    #[arg(short, long)]
    force: bool,

    /// Print each parsed config payload.
    #[arg(short, long)]
    verbose: bool,

    /// Show version.
    #[arg(long)]
    version: bool,

    /// Show what would be written without writing any files.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Maximum directory depth to search (0 is the working directory itself).
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Directory name to skip while searching (repeatable), e.g. `.git`.
    #[arg(short = 'x', long = "exclude", value_name = "DIR")]
    exclude: Vec<String>,

    /// Follow symbolic links to directories (loops are detected and skipped).
    #[arg(short = 'L', long)]
    follow_links: bool,
}

impl Cli {
    fn into_settings(self, root: PathBuf) -> Settings {
        Settings {
            root,
            config_name: self.config,
            template_name: self.template,
            output_name: self.output,
            force: self.force,
            verbose: self.verbose,
            dry_run: self.dry_run,
            walk: WalkOptions {
                max_depth: self.max_depth,
                exclude: self.exclude,
                follow_links: self.follow_links,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(cli.verbose);
    let settings = cli.into_settings(PathBuf::from("."));
    tracing::debug!(
        config = %settings.config_name,
        template = %settings.template_name,
        output = %settings.output_name,
        "searching {}",
        settings.root.display()
    );

    let mut failed = 0usize;
    let processed = pipeline::run_with(&settings, |r| {
        if r.outcome.is_err() {
            failed += 1;
        }
        report::print(&r, &settings);
    })
    .with_context(|| format!("cannot search {}", settings.root.display()))?;

    if failed > 0 {
        tracing::warn!("{failed} of {processed} config(s) failed");
    } else {
        tracing::debug!("processed {processed} config(s)");
    }
    Ok(())
}
