use super::model::{RevolutionStats, Section, SelectedSection, Selection};

/// One section per degree.
pub const DEFAULT_SECTIONS_PER_REVOLUTION: usize = 360;

/// Pick the trailing `per_revolution` sections (or all of them when there
/// are fewer) and tag each with its absolute index.
///
/// `per_revolution` must be non-zero; configuration validates this before
/// the pipeline runs.
pub fn select_last_revolution(sections: &[Section], per_revolution: usize) -> Selection<'_> {
    let total = sections.len();
    let start = total.saturating_sub(per_revolution);

    let selected: Vec<SelectedSection<'_>> = sections[start..]
        .iter()
        .enumerate()
        .map(|(pos, section)| SelectedSection {
            index: start + pos,
            section,
        })
        .collect();

    let stats = RevolutionStats {
        total_sections: total,
        sections_per_revolution: per_revolution,
        revolutions: revolutions(total, per_revolution),
        start_index: start,
        start_degree: start,
        selected_count: selected.len(),
        estimated_per_revolution: estimate_per_revolution(total, per_revolution),
    };

    Selection {
        sections: selected,
        stats,
    }
}

fn revolutions(total: usize, per_revolution: usize) -> f64 {
    if per_revolution == 0 {
        return 0.0;
    }
    total as f64 / per_revolution as f64
}

/// `total / floor(total / per_revolution)` once the input spans more than
/// one revolution.
fn estimate_per_revolution(total: usize, per_revolution: usize) -> Option<usize> {
    if per_revolution == 0 || total <= per_revolution {
        return None;
    }
    Some(total / (total / per_revolution))
}
