use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::SelectedSection;

/// Text that varies between runs of the writer; everything else in the
/// file is fixed legacy VTK layout.
#[derive(Debug, Clone, Copy)]
pub struct GridLabels<'a> {
    /// Title line prefix, followed by ` at <index>.0 deg`.
    pub title: &'a str,
    /// Name of the point scalar field.
    pub scalar_name: &'a str,
}

/// `<prefix>.<index>.vtk`
pub fn grid_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}.{index}.vtk")
}

/// Shortest round-trip form, integral values keep a trailing `.0`.
pub fn format_scalar(value: f64) -> String {
    format!("{value:?}")
}

/// Write one section as a legacy ASCII `STRUCTURED_POINTS` dataset.
///
/// The grid is `M` wide and `N` tall (`DIMENSIONS M N 1`), values follow
/// in row-major order, one per line.
pub fn write_structured_points<W: Write>(
    out: &mut W,
    selected: &SelectedSection<'_>,
    labels: &GridLabels<'_>,
) -> io::Result<()> {
    let section = selected.section;
    let (n, m) = section.shape();

    writeln!(out, "# vtk DataFile Version 2.0")?;
    writeln!(out, "{} at {:.1} deg", labels.title, selected.index as f64)?;
    writeln!(out, "ASCII")?;
    writeln!(out, "DATASET STRUCTURED_POINTS")?;
    writeln!(out, "DIMENSIONS {m} {n} 1")?;
    writeln!(out, "ORIGIN 0 0 0")?;
    writeln!(out, "SPACING 1 1 1")?;
    writeln!(out, "POINT_DATA {}", n * m)?;
    writeln!(out, "SCALARS {} double 1", labels.scalar_name)?;
    writeln!(out, "LOOKUP_TABLE default")?;

    for row in section.rows() {
        for &value in row {
            writeln!(out, "{}", format_scalar(value))?;
        }
    }
    Ok(())
}

/// Write `<dir>/<prefix>.<index>.vtk` and return the bare file name.
pub fn write_grid_file(
    dir: &Path,
    prefix: &str,
    selected: &SelectedSection<'_>,
    labels: &GridLabels<'_>,
) -> Result<String> {
    let file_name = grid_file_name(prefix, selected.index);
    let path = dir.join(&file_name);

    let file =
        File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_structured_points(&mut out, selected, labels)
        .and_then(|_| out.flush())
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(file_name)
}
