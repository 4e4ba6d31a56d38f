//! Presentation of query results: terminal table, JSON, CSV export

pub mod export;
pub mod table;

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::catalog::{format_flag, AssessmentRecord};
use crate::resolver::Resolution;
use crate::test_types::join_labels;

/// Write a resolution as a table, followed by any skipped rows
pub fn write_resolution<W: Write>(out: &mut W, resolution: &Resolution) -> io::Result<()> {
    writeln!(out, "{}", "📋 Top Recommendations".bold())?;
    writeln!(out)?;

    if resolution.recommendations.is_empty() {
        writeln!(out, "No results found.")?;
    } else {
        writeln!(out, "{}", table::render(&resolution.recommendations))?;
    }

    if !resolution.failures.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("⚠️  {} result(s) skipped:", resolution.failures.len()).yellow()
        )?;
        for failure in &resolution.failures {
            writeln!(out, "   {}", failure)?;
        }
    }
    Ok(())
}

/// Print a resolution to stdout
pub fn print_resolution(resolution: &Resolution) -> Result<()> {
    write_resolution(&mut io::stdout().lock(), resolution)?;
    Ok(())
}

/// Print a resolution as pretty JSON
pub fn print_json(resolution: &Resolution) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(resolution)?);
    Ok(())
}

/// Print a single catalog record with expanded test types
pub fn print_record(id: usize, record: &AssessmentRecord) {
    println!("{} {}", format!("#{}", id).dimmed(), record.name.bold());
    println!("  URL:            {}", record.url);
    println!("  Description:    {}", record.description);
    println!("  Remote Testing: {}", format_flag(record.remote_testing));
    println!("  Adaptive/IRT:   {}", format_flag(record.adaptive_irt));
    println!("  Duration:       {}", record.duration);
    println!("  Test Type:      {}", join_labels(&record.test_types()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{RowFailure, RowFailureReason};

    #[test]
    fn test_write_resolution_reports_skipped_rows() {
        colored::control::set_override(false);
        let resolution = Resolution {
            query: "java".to_string(),
            top_k: 2,
            recommendations: Vec::new(),
            failures: vec![RowFailure {
                rank: 2,
                key: 500,
                reason: RowFailureReason::OutOfRange { catalog_len: 3 },
            }],
        };

        let mut buf = Vec::new();
        write_resolution(&mut buf, &resolution).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("No results found."));
        assert!(text.contains("1 result(s) skipped"));
        assert!(text.contains("#2 (key 500)"));
    }
}
