//! Converter configuration.
//!
//! Built-in defaults reproduce the classic `Piston_Gap_Pressure.txt` →
//! `piston_pressure_phi/` conversion. A JSON file can override any subset of
//! fields, and command line flags override both.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::select::DEFAULT_SECTIONS_PER_REVOLUTION;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Pressure text file to read.
    pub input: PathBuf,

    /// Directory receiving the grid files and the manifest (created if absent).
    pub output_dir: PathBuf,

    /// Grid file stem: `<file_prefix>.<index>.vtk`
    pub file_prefix: String,

    /// Collection manifest file name inside `output_dir`.
    pub manifest_name: String,

    /// Sections making up one revolution; the last this many are exported.
    pub sections_per_revolution: usize,

    /// Name of the scalar field in each grid file.
    pub scalar_name: String,

    /// Title line prefix in each grid file.
    pub title: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Piston_Gap_Pressure.txt"),
            output_dir: PathBuf::from("piston_pressure_phi"),
            file_prefix: "piston_pressure_phi".to_string(),
            manifest_name: "piston_pressure_animation.pvd".to_string(),
            sections_per_revolution: DEFAULT_SECTIONS_PER_REVOLUTION,
            scalar_name: "Pressure_bar".to_string(),
            title: "Piston Gap Pressure".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sections_per_revolution == 0 {
            bail!("sections_per_revolution must be at least 1");
        }
        check_file_name("file_prefix", &self.file_prefix)?;
        check_file_name("manifest_name", &self.manifest_name)?;
        if self.title.chars().any(char::is_control) {
            // the title is one header line of the grid file
            bail!("title must not contain control characters");
        }
        if self.scalar_name.split_whitespace().count() != 1 {
            // VTK reads the field name as a single token
            bail!("scalar_name must be a single word, got '{}'", self.scalar_name);
        }
        Ok(())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_name)
    }
}

/// Characters that would need escaping inside the manifest's `file="..."`.
const XML_SPECIAL: &[char] = &['&', '<', '>', '"', '\''];

/// Bare file name, written verbatim into the manifest.
fn check_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || std::path::is_separator(*c) || XML_SPECIAL.contains(c))
    {
        bail!("{field} '{}' contains invalid character {c:?}", name.escape_debug());
    }
    Ok(())
}
