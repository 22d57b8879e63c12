use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{ResultRow, RiskLabel};

/// Render one analyzed source (a file or the manual entry) with its summary line.
pub fn render(source: &str, rows: &[ResultRow], quiet: bool) {
    let risky = rows.iter().filter(|r| r.is_risky()).count();
    let summary = summary_line(rows.len(), risky);

    if quiet {
        println!("{}: {}", source, summary);
        return;
    }

    println!("\n {} {}", "▶".cyan(), source.bold());
    if let Some(provenance) = rows.first().map(|r| r.provenance.as_str()) {
        println!("   Source: {}\n", provenance);
    }

    println!("{}", build_table(rows));
    println!(" {}\n", summary);
}

/// Print a non-fatal warning for a source without any license.
pub fn render_nothing_found(source: &str, provenance: &str) {
    eprintln!(
        " {} {}: no license found ({})",
        "[WARN]".yellow().bold(),
        source,
        provenance
    );
}

fn summary_line(total: usize, risky: usize) -> String {
    let counts = format!("Analyzed {} licenses", total);
    if risky > 0 {
        format!("{} — {} {}", counts, "✗".red(), format!("{} risky", risky).red().bold())
    } else {
        format!("{} — {} {}", counts, "✓".green(), "all safe".green())
    }
}

fn build_table(rows: &[ResultRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Safer alternative").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        let (status, color) = match row.label {
            RiskLabel::Safe => ("✓ safe", Color::Green),
            RiskLabel::Risky => ("✗ risky", Color::Red),
            RiskLabel::Unknown => ("? unknown", Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(&row.identifier),
            Cell::new(status).fg(color),
            Cell::new(row.confidence_percent()).set_alignment(CellAlignment::Right),
            Cell::new(row.alternative_or_dash()).fg(if row.is_risky() {
                Color::Yellow
            } else {
                Color::Reset
            }),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassificationVerdict;

    #[test]
    fn test_table_lists_every_row() {
        colored::control::set_override(false);
        let rows = vec![
            ResultRow::new(
                ClassificationVerdict::new("GPL-3.0", RiskLabel::Risky, 0.85),
                Some("MIT or Apache-2.0"),
                "manual entry",
            ),
            ResultRow::new(
                ClassificationVerdict::new("MIT", RiskLabel::Safe, 0.95),
                None,
                "manual entry",
            ),
        ];
        let rendered = build_table(&rows).to_string();
        assert!(rendered.contains("GPL-3.0"));
        assert!(rendered.contains("85.0%"));
        assert!(rendered.contains("MIT or Apache-2.0"));
        assert!(rendered.contains("—"));
    }

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);
        assert_eq!(summary_line(3, 1), "Analyzed 3 licenses — ✗ 1 risky");
        assert_eq!(summary_line(2, 0), "Analyzed 2 licenses — ✓ all safe");
    }
}
