// ---------------------------------------------------------------------------
// Section – one %PHI block of the pressure file
// ---------------------------------------------------------------------------

/// A single angular section: the phi label and an N×M pressure grid.
///
/// `N` is the number of data rows (circumferential samples) and `M` the
/// number of values per row (radial samples). Values are stored flat in
/// row-major order, rows outer and columns inner.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Angle label parsed from the marker line.
    pub phi: f64,
    n_rows: usize,
    n_cols: usize,
    values: Vec<f64>,
}

impl Section {
    /// Build a section from its rows.
    ///
    /// Returns `None` when there are no rows or the rows differ in width;
    /// the parser checks widths itself and reports the offending line.
    pub fn from_rows(phi: f64, rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_cols = rows.first()?.len();
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        let n_rows = rows.len();
        let values = rows.into_iter().flatten().collect();
        Some(Section {
            phi,
            n_rows,
            n_cols,
            values,
        })
    }

    /// `(N, M)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics; a section always has at least one column
        self.values.chunks(self.n_cols.max(1))
    }
}

// ---------------------------------------------------------------------------
// Selection – the sections of the last revolution
// ---------------------------------------------------------------------------

/// A section picked for export together with its absolute position in the
/// full parsed sequence.
#[derive(Debug, Clone, Copy)]
pub struct SelectedSection<'a> {
    pub index: usize,
    pub section: &'a Section,
}

/// Figures reported to the operator about the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionStats {
    /// Sections found in the input.
    pub total_sections: usize,
    /// Configured sections per revolution.
    pub sections_per_revolution: usize,
    /// `total_sections / sections_per_revolution`.
    pub revolutions: f64,
    /// Absolute index of the first selected section.
    pub start_index: usize,
    /// Degree of the first selected section, one section per degree.
    pub start_degree: usize,
    /// Number of selected sections.
    pub selected_count: usize,
    /// `total / floor(total / per_revolution)`, only when more than one
    /// revolution's worth of sections is present.
    pub estimated_per_revolution: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub sections: Vec<SelectedSection<'a>>,
    pub stats: RevolutionStats,
}

impl Selection<'_> {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
