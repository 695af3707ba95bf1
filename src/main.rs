use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use piston_vtk::config::ConverterConfig;
use piston_vtk::pipeline;

#[derive(Parser, Debug)]
#[command(name = "piston-vtk")]
#[command(about = "Export the last revolution of piston gap pressure sections as a VTK time series")]
struct Args {
    /// Pressure text file (default: Piston_Gap_Pressure.txt)
    input: Option<PathBuf>,

    /// Pressure text file, same as the positional argument
    #[arg(long = "input", value_name = "INPUT", conflicts_with = "input")]
    input_flag: Option<PathBuf>,

    /// JSON file with converter settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for grid files and the manifest
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Sections per revolution; the last this many are exported
    #[arg(long = "revolution-size")]
    revolution_size: Option<usize>,

    /// Grid file name prefix
    #[arg(long)]
    prefix: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<ConverterConfig> {
        let mut config = match &self.config {
            Some(path) => ConverterConfig::from_json_file(path)?,
            None => ConverterConfig::default(),
        };
        if let Some(input) = self.input.or(self.input_flag) {
            config.input = input;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(size) = self.revolution_size {
            config.sections_per_revolution = size;
        }
        if let Some(prefix) = self.prefix {
            config.file_prefix = prefix;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    log::debug!("{config:?}");

    pipeline::run(&config)?;
    Ok(())
}
