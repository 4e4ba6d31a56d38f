//! Test-type code map
//!
//! Catalog rows carry a space-separated list of single-letter category codes
//! (e.g. `"A K P"`). This module expands them to the labels shown to users.
//! Unknown codes pass through unchanged so nothing in the source data is lost.

/// The fixed code table, ordered by code
const TEST_TYPES: [(&str, &str); 8] = [
    ("A", "Ability & Aptitude"),
    ("B", "Biodata & Situational Judgement"),
    ("C", "Competencies"),
    ("D", "Development & 360"),
    ("E", "Assessment Exercises"),
    ("K", "Knowledge & Skills"),
    ("P", "Personality & Behaviour"),
    ("S", "Simulations"),
];

/// Separator used when a label list has to become a single cell
pub const LABEL_SEPARATOR: &str = ", ";

/// Look up the label for a code, if it is one of the known codes
pub fn label_for(code: &str) -> Option<&'static str> {
    TEST_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Resolve a single code to its label, falling back to the code itself
pub fn resolve_code(code: &str) -> String {
    let code = code.trim();
    label_for(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

/// Expand a raw whitespace-separated code string into labels
///
/// An empty or whitespace-only field yields an empty list.
pub fn expand_codes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(resolve_code).collect()
}

/// Join expanded labels for single-cell presentation (table, CSV)
pub fn join_labels(labels: &[String]) -> String {
    labels.join(LABEL_SEPARATOR)
}

/// Split a joined label cell back into labels
pub fn split_labels(cell: &str) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    cell.split(LABEL_SEPARATOR)
        .map(|s| s.trim().to_string())
        .collect()
}

/// All known `(code, label)` pairs
pub fn all() -> &'static [(&'static str, &'static str)] {
    &TEST_TYPES
}
