//! CSV export of a result set
//!
//! RFC 4180 quoting via the `csv` crate, header row always present. The
//! name/URL link is split into two columns and test types are joined into a
//! single cell, so an export can be read back field for field.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{format_flag, parse_flag};
use crate::resolver::Recommendation;
use crate::test_types::{join_labels, split_labels};

pub const HEADERS: [&str; 8] = [
    "Rank",
    "Assessment Name",
    "URL",
    "Description",
    "Remote Testing",
    "Adaptive/IRT",
    "Duration",
    "Test Type",
];

/// One exported CSV row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Assessment Name")]
    pub name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Remote Testing")]
    pub remote_testing: String,
    #[serde(rename = "Adaptive/IRT")]
    pub adaptive_irt: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Test Type")]
    pub test_type: String,
}

impl From<&Recommendation> for ExportRow {
    fn from(rec: &Recommendation) -> Self {
        Self {
            rank: rec.rank,
            name: rec.assessment.name.clone(),
            url: rec.assessment.url.clone(),
            description: rec.description.clone(),
            remote_testing: format_flag(rec.remote_testing).to_string(),
            adaptive_irt: format_flag(rec.adaptive_irt).to_string(),
            duration: rec.duration.clone(),
            test_type: join_labels(&rec.test_types),
        }
    }
}

impl ExportRow {
    pub fn test_types(&self) -> Vec<String> {
        split_labels(&self.test_type)
    }

    pub fn remote_testing(&self) -> Option<bool> {
        parse_flag(&self.remote_testing)
    }

    pub fn adaptive_irt(&self) -> Option<bool> {
        parse_flag(&self.adaptive_irt)
    }
}

/// Write recommendations as CSV to any writer
pub fn write_to<W: Write>(writer: W, recommendations: &[Recommendation]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Explicit header so an empty result set still produces one
    csv_writer.write_record(HEADERS)?;
    for rec in recommendations {
        csv_writer.serialize(ExportRow::from(rec))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write recommendations to a CSV file, replacing it if present
pub fn write_file(path: &Path, recommendations: &[Recommendation]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_to(file, recommendations)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(rows = recommendations.len(), path = %path.display(), "results exported");
    Ok(())
}

/// Parse an exported CSV back into rows
pub fn read_from<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (i, row) in csv_reader.deserialize::<ExportRow>().enumerate() {
        rows.push(row.with_context(|| format!("Malformed export row {}", i))?);
    }
    Ok(rows)
}

/// Read an exported CSV file
pub fn read_file(path: &Path) -> Result<Vec<ExportRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path.display()))?;
    read_from(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AssessmentLink;

    fn rec(rank: usize, description: &str) -> Recommendation {
        Recommendation {
            rank,
            id: rank - 1,
            assessment: AssessmentLink {
                name: format!("Assessment {}", rank),
                url: format!("https://example.com/{}", rank),
            },
            description: description.to_string(),
            remote_testing: rank % 2 == 0,
            adaptive_irt: true,
            duration: "Approximate Completion Time in minutes = 30".to_string(),
            test_types: vec!["Ability & Aptitude".to_string(), "Competencies".to_string()],
        }
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut buf = Vec::new();
        write_to(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            "Rank,Assessment Name,URL,Description,Remote Testing,Adaptive/IRT,Duration,Test Type"
        );
    }

    #[test]
    fn test_quoting_of_commas_quotes_and_newlines() {
        let tricky = "Measures \"numeracy\", charts\nand tables";
        let mut buf = Vec::new();
        write_to(&mut buf, &[rec(1, tricky)]).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("\"Measures \"\"numeracy\"\", charts\nand tables\""));
        assert!(text.contains("\"Ability & Aptitude, Competencies\""));

        let rows = read_from(buf.as_slice()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, tricky);
    }

    #[test]
    fn test_row_accessors() {
        let row = ExportRow::from(&rec(2, "d"));
        assert_eq!(row.remote_testing(), Some(true));
        assert_eq!(row.adaptive_irt(), Some(true));
        assert_eq!(row.test_types(), vec!["Ability & Aptitude", "Competencies"]);
    }
}
