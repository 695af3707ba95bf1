use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// One time step of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub timestep: usize,
    /// Path relative to the manifest.
    pub file: String,
}

/// Write a ParaView `Collection` listing `entries` in the given order.
pub fn write_collection<W: Write>(out: &mut W, entries: &[ManifestEntry]) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0"?>"#)?;
    writeln!(out, r#"<VTKFile type="Collection" version="0.1">"#)?;
    writeln!(out, "  <Collection>")?;
    for entry in entries {
        writeln!(
            out,
            r#"    <DataSet timestep="{}" group="" part="0" file="{}"/>"#,
            entry.timestep, entry.file
        )?;
    }
    writeln!(out, "  </Collection>")?;
    writeln!(out, "</VTKFile>")?;
    Ok(())
}

/// Write the manifest to `path`. Referenced files are not checked.
pub fn write_manifest_file(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_collection(&mut out, entries)
        .and_then(|_| out.flush())
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn render(entries: &[ManifestEntry]) -> String {
        let mut buf = Vec::new();
        write_collection(&mut buf, entries).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_two_entries() {
        let entries = vec![
            ManifestEntry {
                timestep: 0,
                file: "piston_pressure_phi.0.vtk".to_string(),
            },
            ManifestEntry {
                timestep: 1,
                file: "piston_pressure_phi.1.vtk".to_string(),
            },
        ];
        let expected = r#"<?xml version="1.0"?>
<VTKFile type="Collection" version="0.1">
  <Collection>
    <DataSet timestep="0" group="" part="0" file="piston_pressure_phi.0.vtk"/>
    <DataSet timestep="1" group="" part="0" file="piston_pressure_phi.1.vtk"/>
  </Collection>
</VTKFile>
"#;
        assert_eq!(render(&entries), expected);
    }

    #[test]
    fn test_empty_collection() {
        let text = render(&[]);
        assert!(!text.contains("<DataSet"));
        assert!(text.contains("  <Collection>\n  </Collection>\n"));
    }

    #[test]
    fn test_timestep_is_not_padded() {
        let text = render(&[ManifestEntry {
            timestep: 1075,
            file: "a.vtk".to_string(),
        }]);
        assert!(text.contains(r#"timestep="1075""#));
    }

    #[test]
    fn test_write_manifest_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anim.pvd");
        write_manifest_file(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.ends_with("</VTKFile>\n"));
    }
}
