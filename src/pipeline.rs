//! Parse → select → write grids → write manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::ConverterConfig;
use crate::data::model::{RevolutionStats, Section};
use crate::data::{parser, select};
use crate::export::pvd::{self, ManifestEntry};
use crate::export::vtk::{self, GridLabels};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: RevolutionStats,
    /// Grid file names, relative to `output_dir`, in timestep order.
    pub grid_files: Vec<String>,
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
}

/// Run the whole conversion described by `config`.
pub fn run(config: &ConverterConfig) -> Result<RunSummary> {
    config.validate()?;
    let sections = parser::load_file(&config.input)?;
    convert_sections(&sections, config)
}

/// Export already parsed sections.
pub fn convert_sections(sections: &[Section], config: &ConverterConfig) -> Result<RunSummary> {
    config.validate()?;

    let selection = select::select_last_revolution(sections, config.sections_per_revolution);
    let stats = selection.stats.clone();
    report_selection(&stats);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;

    let labels = GridLabels {
        title: &config.title,
        scalar_name: &config.scalar_name,
    };

    let mut entries = Vec::with_capacity(selection.len());
    for selected in &selection.sections {
        debug!(
            "phi={} index={} shape={:?}",
            selected.section.phi,
            selected.index,
            selected.section.shape()
        );
        let file =
            vtk::write_grid_file(&config.output_dir, &config.file_prefix, selected, &labels)?;
        info!("Created: {file}");
        entries.push(ManifestEntry {
            timestep: selected.index,
            file,
        });
    }

    let manifest_path = config.manifest_path();
    pvd::write_manifest_file(&manifest_path, &entries)?;

    info!("Total files created: {}", entries.len());
    info!("Files saved in folder: {}", config.output_dir.display());
    info!("Animation file created: {}", config.manifest_name);
    info!(
        "Load '{}' in ParaView and press Play to see the animation",
        config.manifest_name
    );

    Ok(RunSummary {
        stats,
        grid_files: entries.into_iter().map(|e| e.file).collect(),
        output_dir: config.output_dir.clone(),
        manifest_path,
    })
}

fn report_selection(stats: &RevolutionStats) {
    if stats.total_sections == 0 {
        info!("No %PHI sections with data found; writing an empty collection");
        return;
    }
    info!("Total files: {}", stats.total_sections);
    info!("Total revolutions: {:.1}", stats.revolutions);
    info!(
        "Last revolution starts at index: {} (degree {})",
        stats.start_index, stats.start_degree
    );
    if let Some(estimated) = stats.estimated_per_revolution {
        debug!(
            "Estimated sections per revolution: {estimated} (using {})",
            stats.sections_per_revolution
        );
    }
    info!(
        "Processing {} files from last revolution",
        stats.selected_count
    );
}
