//! User-facing output for each processed config.

use colored::Colorize;

use jenerator_core::types::containing_dir;
use jenerator_core::Settings;
use jenerator_sync::{ConfigReport, WriteResult};

pub fn print(report: &ConfigReport, settings: &Settings) {
    if settings.verbose {
        if let Some(rec) = &report.record {
            println!("Payload from {}:\n{}", report.config.display(), rec.to_pretty_string());
        }
    }

    let prefix = if settings.dry_run { "[dry-run] " } else { "" };
    let dir = containing_dir(&report.config).display();
    let name = &settings.output_name;

    match &report.outcome {
        Ok(WriteResult::Created { path }) => println!(
            "{prefix}{}  {name} not found in {dir}. Created {}",
            "✎".green(),
            path.display()
        ),
        Ok(WriteResult::Overwritten { path }) => println!(
            "{prefix}{}  {name} overwritten in {dir} (--force): {}",
            "✎".yellow(),
            path.display()
        ),
        Ok(WriteResult::Preserved { path }) => println!(
            "{prefix}{}  {} already exists and '--force' flag is not set. Skipping...",
            "·".dimmed(),
            path.display()
        ),
        Ok(WriteResult::WouldCreate { path }) => println!(
            "{prefix}{}  {name} not found in {dir}. Would create {}",
            "~".cyan(),
            path.display()
        ),
        Ok(WriteResult::WouldOverwrite { path }) => println!(
            "{prefix}{}  {name} would be overwritten in {dir} (--force): {}",
            "~".cyan(),
            path.display()
        ),
        Err(e) => println!(
            "{prefix}{}  {}: {e}",
            "✗".red().bold(),
            report.config.display()
        ),
    }
}
