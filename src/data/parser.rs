use std::path::Path;

use anyhow::{Context, Result};

use super::error::ParseError;
use super::model::Section;

/// Prefix of the line that opens a new section.
pub const SECTION_MARKER: &str = "%PHI";

/// Any other line starting with this is a comment.
const COMMENT_PREFIX: char = '%';

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse a pressure file from disk.
pub fn load_file(path: &Path) -> Result<Vec<Section>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading pressure file {}", path.display()))?;
    let sections =
        parse_sections(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::debug!("{}: {} sections", path.display(), sections.len());
    Ok(sections)
}

/// Split pressure text into sections, in file order.
///
/// Expected layout:
///
/// ```text
/// % comment lines are skipped
/// %PHI: 0.0 deg
/// 1.0 2.0 3.0
/// 4.0 5.0 6.0
/// %PHI: 1.0 deg
/// ...
/// ```
///
/// Sections without data rows are dropped. Every row of a section must have
/// the width of its first row. Rows above the first marker are parsed like
/// any other and become the leading rows of the first section.
pub fn parse_sections(text: &str) -> Result<Vec<Section>, ParseError> {
    let mut sections = Vec::new();
    let mut open = OpenSection::leading();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();

        if line.starts_with(SECTION_MARKER) {
            let phi = parse_label(line, line_no)?;
            if let Some(done) = open.start(phi) {
                sections.push(done);
            }
        } else if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        } else {
            open.push_row(parse_row(line, line_no)?, line_no)?;
        }
    }

    sections.extend(open.finish());

    Ok(sections)
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

/// `%PHI: 12.0 deg` → `12.0`. The label is the first token between the
/// first and second colon.
fn parse_label(line: &str, line_no: usize) -> Result<f64, ParseError> {
    let token = line
        .split(':')
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or(ParseError::MissingLabel { line: line_no })?;

    token.parse::<f64>().map_err(|_| ParseError::InvalidLabel {
        line: line_no,
        token: token.to_string(),
    })
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>, ParseError> {
    line.split_whitespace()
        .enumerate()
        .map(|(j, tok)| {
            tok.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                line: line_no,
                column: j + 1,
                token: tok.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Accumulator for the section currently being read
// ---------------------------------------------------------------------------

/// `phi` is `None` until the first marker; rows read before it are kept
/// and adopted by that marker's section.
struct OpenSection {
    phi: Option<f64>,
    rows: Vec<Vec<f64>>,
}

impl OpenSection {
    fn leading() -> Self {
        OpenSection {
            phi: None,
            rows: Vec::new(),
        }
    }

    /// Open the section labelled `phi`, returning the one it closes.
    fn start(&mut self, phi: f64) -> Option<Section> {
        if self.phi.is_none() {
            if !self.rows.is_empty() {
                log::debug!("phi={phi}: adopting {} leading rows", self.rows.len());
            }
            self.phi = Some(phi);
            return None;
        }
        let done = std::mem::replace(
            self,
            OpenSection {
                phi: Some(phi),
                rows: Vec::new(),
            },
        );
        done.finish()
    }

    fn push_row(&mut self, row: Vec<f64>, line_no: usize) -> Result<(), ParseError> {
        if let Some(first) = self.rows.first() {
            if first.len() != row.len() {
                return Err(ParseError::InconsistentRowWidth {
                    line: line_no,
                    phi: self.phi,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> Option<Section> {
        let Some(phi) = self.phi else {
            if !self.rows.is_empty() {
                log::warn!("{} data rows but no {SECTION_MARKER} marker, dropped", self.rows.len());
            }
            return None;
        };
        if self.rows.is_empty() {
            log::debug!("phi={phi}: no data rows, dropped");
            return None;
        }
        Section::from_rows(phi, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const TWO_SECTIONS: &str = "\
%PHI: 0.0 deg
1.0 2.0
3.0 4.0
%PHI: 1.0 deg
5.0 6.0
7.0 8.0
";

    #[test]
    fn test_parse_two_sections() {
        let sections = parse_sections(TWO_SECTIONS).unwrap();
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].phi, 0.0);
        assert_eq!(sections[0].shape(), (2, 2));
        assert_eq!(sections[0].values(), &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(sections[1].phi, 1.0);
        assert_eq!(sections[1].values(), &[5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = "\
% Model: piston gap
%PHI: 3.5 deg

  1.0   2.0   3.0
% mid-section comment
\t4.0 5.0 6.0
";
        let sections = parse_sections(text).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].phi, 3.5);
        assert_eq!(sections[0].shape(), (2, 3));
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let text = "\
%PHI: 0.0
%PHI: 1.0
9.0
%PHI: 2.0
";
        let sections = parse_sections(text).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].phi, 1.0);
    }

    #[test]
    fn test_order_is_file_order() {
        let text = "%PHI: 5.0\n1\n%PHI: 2.0\n2\n%PHI: 9.0\n3\n";
        let phis: Vec<f64> = parse_sections(text)
            .unwrap()
            .iter()
            .map(|s| s.phi)
            .collect();
        assert_eq!(phis, vec![5.0, 2.0, 9.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_sections("").unwrap().is_empty());
        assert!(parse_sections("% only a header\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_label_uses_first_token_after_colon() {
        let sections = parse_sections("%PHI: -12.25 deg: extra\n1 2\n").unwrap();
        assert_eq!(sections[0].phi, -12.25);
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(
            parse_sections("%PHI 1.0\n1 2\n"),
            Err(ParseError::MissingLabel { line: 1 })
        );
        assert_eq!(
            parse_sections("% header\n%PHI:   \n"),
            Err(ParseError::MissingLabel { line: 2 })
        );
    }

    #[test]
    fn test_invalid_label() {
        assert_eq!(
            parse_sections("%PHI: abc\n1 2\n"),
            Err(ParseError::InvalidLabel {
                line: 1,
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            parse_sections("%PHI: 0\n1.0 x2 3.0\n"),
            Err(ParseError::InvalidNumber {
                line: 2,
                column: 2,
                token: "x2".to_string()
            })
        );
    }

    #[test]
    fn test_inconsistent_row_width() {
        let err = parse_sections("%PHI: 4.0\n1 2 3\n4 5 6\n7 8\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InconsistentRowWidth {
                line: 4,
                phi: Some(4.0),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_width_resets_per_section() {
        let sections = parse_sections("%PHI: 0\n1 2 3\n%PHI: 1\n1 2\n").unwrap();
        assert_eq!(sections[0].shape().1, 3);
        assert_eq!(sections[1].shape().1, 2);
    }

    #[test]
    fn test_leading_rows_join_first_section() {
        let sections = parse_sections("9 9\n%PHI: 0\n1 2\n%PHI: 1\n3 4\n").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].shape(), (2, 2));
        assert_eq!(sections[0].values(), &[9.0, 9.0, 1.0, 2.0]);
        assert_eq!(sections[1].values(), &[3.0, 4.0]);
    }

    #[test]
    fn test_leading_text_line_is_fatal() {
        assert_eq!(
            parse_sections("Time step results\n%PHI: 0\n1 2\n"),
            Err(ParseError::InvalidNumber {
                line: 1,
                column: 1,
                token: "Time".to_string()
            })
        );
    }

    #[test]
    fn test_leading_rows_width_checked_against_section() {
        let err = parse_sections("1 2 3\n%PHI: 0\n1 2\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InconsistentRowWidth {
                line: 3,
                phi: Some(0.0),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_rows_without_any_marker_are_dropped() {
        assert!(parse_sections("1 2\n3 4\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Piston_Gap_Pressure.txt");
        let mut file = File::create(&path).unwrap();
        write!(file, "{TWO_SECTIONS}").unwrap();

        let sections = load_file(&path).unwrap();
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
