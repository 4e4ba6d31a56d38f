//! Terminal table rendering

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::catalog::format_flag;
use crate::resolver::Recommendation;
use crate::test_types::join_labels;

/// Column headers, in display order
pub const COLUMNS: [&str; 6] = [
    "Assessment Name",
    "Description",
    "Remote Testing",
    "Adaptive/IRT",
    "Duration",
    "Test Type",
];

/// Longest description shown in the terminal (export keeps the full text)
const MAX_DESCRIPTION_CHARS: usize = 160;

/// Render recommendations as a table, name cell carrying the URL beneath it
pub fn render(recommendations: &[Recommendation]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            COLUMNS
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

    for rec in recommendations {
        table.add_row(vec![
            Cell::new(format!("{}\n{}", rec.assessment.name, rec.assessment.url)),
            Cell::new(truncate(&rec.description, MAX_DESCRIPTION_CHARS)),
            Cell::new(format_flag(rec.remote_testing)),
            Cell::new(format_flag(rec.adaptive_irt)),
            Cell::new(&rec.duration),
            Cell::new(join_labels(&rec.test_types)),
        ]);
    }

    table.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AssessmentLink;

    fn rec() -> Recommendation {
        Recommendation {
            rank: 1,
            id: 0,
            assessment: AssessmentLink {
                name: "Java 8 (New)".to_string(),
                url: "https://example.com/java-8".to_string(),
            },
            description: "Multi-choice test".to_string(),
            remote_testing: true,
            adaptive_irt: false,
            duration: "18 minutes".to_string(),
            test_types: vec!["Knowledge & Skills".to_string(), "X".to_string()],
        }
    }

    #[test]
    fn test_render_contains_all_fields() {
        let out = render(&[rec()]);
        for header in COLUMNS {
            assert!(out.contains(header), "missing header {}", header);
        }
        assert!(out.contains("Java 8 (New)"));
        assert!(out.contains("https://example.com/java-8"));
        assert!(out.contains("Yes"));
        assert!(out.contains("No"));
        assert!(out.contains("Knowledge & Skills, X"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }
}
