// Colored terminal output for batch summaries, per-document tables and the
// pattern table.
//
// main.rs delegates all formatting here.

use colored::Colorize;

use super::summary::Summary;
use crate::patterns::PatternTable;
use crate::pipeline::AnalyzedDocument;

/// Display counts per category, per concentration flag, and combinations.
pub fn display_summary(summary: &Summary) {
    if summary.total == 0 {
        println!("No documents analyzed.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Keyword Detection ({} documents) ===", summary.total).bold()
    );

    println!("\n  {}", "Categories".dimmed());
    for c in &summary.presence {
        print_count(&c.name, c.count, summary.total);
    }

    if !summary.concentration.is_empty() {
        println!("\n  {}", "With concentration context".dimmed());
        for c in &summary.concentration {
            print_count(&format!("{} concentration", c.name), c.count, summary.total);
        }
    }

    if !summary.pairs.is_empty() {
        println!("\n  {}", "Combinations".dimmed());
        for p in &summary.pairs {
            print_count(&format!("{} + {}", p.first, p.second), p.count, summary.total);
        }
        print_count("All matrices", summary.all_matrices, summary.total);
    }
    println!();
}

fn print_count(label: &str, count: usize, total: usize) {
    let ratio = format!("{count}/{total}");
    let colored_ratio = if count == 0 {
        ratio.dimmed()
    } else if count * 2 >= total {
        ratio.bright_green()
    } else {
        ratio.bright_yellow()
    };
    println!("    {:<34} {}", label, colored_ratio);
}

/// Display one line per document with a check or cross per category.
///
/// Used for PDF folder scans, where there are few enough documents to list.
pub fn display_document_table(table: &PatternTable, rows: &[AnalyzedDocument]) {
    if rows.is_empty() {
        return;
    }

    let names: Vec<&str> = table.categories.iter().map(|c| c.name.as_str()).collect();

    let header: String = names.iter().map(|n| format!(" {:^12}", n)).collect();
    println!("\n  {:<40}{}", "Document".dimmed(), header.dimmed());
    println!("  {}", "-".repeat(40 + names.len() * 13).dimmed());

    for row in rows {
        let label = super::truncate_chars(&row.document.title, 36);
        let mut line = format!("  {:<40}", label);
        for name in &names {
            let cell = match row.result.get(name) {
                Some(f) if f.concentration() == Some(true) => {
                    format!("{:^12}", "✓ conc").green().bold()
                }
                Some(f) if f.present() => format!("{:^12}", "✓").green(),
                _ => format!("{:^12}", "✗").dimmed(),
            };
            line.push_str(&format!(" {cell}"));
        }
        if row.document.text().is_none() {
            line.push_str(&format!("  {}", "(unreadable)".red()));
        }
        println!("{line}");
    }
}

/// Display the active pattern table: categories, pattern counts, and
/// whether each category tracks concentration context.
pub fn display_pattern_table(table: &PatternTable, source: &str) {
    println!("\n{}", format!("=== Pattern Table ({source}) ===").bold());
    println!();
    for category in &table.categories {
        let aware = if category.concentration_aware {
            "concentration-aware".green()
        } else {
            "presence only".dimmed()
        };
        println!(
            "  {:<16} {:>4} patterns  {}",
            category.name.bold(),
            category.patterns.len(),
            aware
        );
    }
    println!(
        "  {:<16} {:>4} patterns",
        "Concentration".bold(),
        table.concentration_patterns.len()
    );
    println!();
}
