use thiserror::Error;

/// Errors raised while splitting the pressure text into sections.
///
/// Line numbers are 1-based and refer to the input text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// `%PHI` marker without a `:` separated label
    #[error("line {line}: %PHI marker has no label")]
    MissingLabel { line: usize },

    /// Label token after the colon is not a number
    #[error("line {line}: '{token}' is not a valid phi label")]
    InvalidLabel { line: usize, token: String },

    /// Data token is not a number
    #[error("line {line}, column {column}: '{token}' is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
    },

    /// Data row width differs from the first row of its section.
    /// `phi` is `None` for rows above the first marker.
    #[error(
        "line {line}: {} expects {expected} values per row, found {found}",
        section_name(.phi)
    )]
    InconsistentRowWidth {
        line: usize,
        phi: Option<f64>,
        expected: usize,
        found: usize,
    },
}

fn section_name(phi: &Option<f64>) -> String {
    match phi {
        Some(phi) => format!("section phi={phi}"),
        None => "leading data".to_string(),
    }
}
