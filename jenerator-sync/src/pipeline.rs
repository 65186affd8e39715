//! Per-config pipeline: discover → parse → render → write.
//!
//! Every config gets its own [`ConfigReport`]. A failing step ends that
//! config's processing; the remaining configs are still processed.

use std::path::{Path, PathBuf};

use jenerator_core::{record, ConfigRecord, Settings};
use jenerator_discovery::locate_configs;
use jenerator_renderer::Renderer;

use crate::error::SyncError;
use crate::writer::{write_output, WriteResult};

/// Outcome of processing one discovered config.
#[derive(Debug)]
pub struct ConfigReport {
    pub config: PathBuf,
    /// The parsed record, when parsing got that far.
    pub record: Option<ConfigRecord>,
    pub outcome: Result<WriteResult, SyncError>,
}

/// Parse, render, and write a single config.
pub fn process_config(config: &Path, settings: &Settings, renderer: &Renderer) -> ConfigReport {
    match record::load(config) {
        Ok(rec) => ConfigReport {
            config: config.to_path_buf(),
            outcome: render_and_write(config, &rec, settings, renderer),
            record: Some(rec),
        },
        Err(e) => ConfigReport {
            config: config.to_path_buf(),
            record: None,
            outcome: Err(e.into()),
        },
    }
}

fn render_and_write(
    config: &Path,
    rec: &ConfigRecord,
    settings: &Settings,
    renderer: &Renderer,
) -> Result<WriteResult, SyncError> {
    let rendered = renderer.render(config, rec)?;
    let target = settings.output_path_for(config);
    write_output(&target, &rendered, settings.force, settings.dry_run)
}

/// Discover every config under `settings.root` and process each one in walk
/// order, handing each report to `on_report` as soon as it is ready.
///
/// Returns the number of configs processed. Only discovery failure is an
/// error; per-config failures live in the reports.
pub fn run_with(
    settings: &Settings,
    mut on_report: impl FnMut(ConfigReport),
) -> Result<usize, SyncError> {
    let configs = locate_configs(&settings.root, &settings.config_name, &settings.walk)?;
    tracing::debug!("discovered {} config(s)", configs.len());

    let renderer = Renderer::new(settings);
    for config in &configs {
        let report = process_config(config, settings, &renderer);
        if let Err(e) = &report.outcome {
            tracing::debug!("{}: {e}", config.display());
        }
        on_report(report);
    }
    Ok(configs.len())
}

/// [`run_with`], collecting every report.
pub fn run(settings: &Settings) -> Result<Vec<ConfigReport>, SyncError> {
    let mut reports = Vec::new();
    run_with(settings, |report| reports.push(report))?;
    Ok(reports)
}
