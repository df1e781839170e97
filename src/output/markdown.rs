//! Markdown summary generation
//!
//! This module renders a human-readable audit of a crawl: overall statistics,
//! a page table, duplicate-content groups and per-page warnings.

use crate::crawler::CrawlOutcome;
use crate::output::{CrawlStatistics, Report};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of a crawl to `output_path`
pub fn generate_markdown_summary(
    outcome: &CrawlOutcome,
    report: &Report,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_summary(outcome, report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats the crawl as markdown
pub fn format_markdown_summary(outcome: &CrawlOutcome, report: &Report) -> String {
    let stats = CrawlStatistics::from_outcome(outcome);
    let mut md = String::new();

    md.push_str("# SEO Crawl Summary\n\n");

    if let Some(first) = outcome.pages.first() {
        md.push_str(&format!("- **Site**: {}\n", first.scope.origin()));
    }
    md.push_str(&format!("- **Total Time**: {:.2} seconds\n\n", report.total_time));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", stats.total_pages));
    md.push_str(&format!("- **URLs Visited**: {}\n", stats.urls_visited));
    md.push_str(&format!("- **Total Words**: {}\n", stats.total_words));
    md.push_str(&format!("- **Outbound Links**: {}\n", stats.total_links));
    md.push_str(&format!(
        "- **Duplicate Groups**: {} ({} pages)\n",
        stats.duplicate_groups, stats.duplicate_pages
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    md.push_str("## Pages\n\n");
    md.push_str("| URL | Title | Description | Words | Links | Status |\n");
    md.push_str("|-----|-------|-------------|-------|-------|--------|\n");
    for page in &outcome.pages {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            page.url,
            escape_cell(&page.title),
            escape_cell(&page.description),
            page.word_count,
            page.outbound_links.len(),
            page.state
        ));
    }
    md.push('\n');

    md.push_str("## Duplicate Content\n\n");
    if report.duplicate_pages.is_empty() {
        md.push_str("No duplicate content found.\n\n");
    } else {
        for (i, group) in report.duplicate_pages.iter().enumerate() {
            md.push_str(&format!("### Group {}\n\n", i + 1));
            for url in group {
                md.push_str(&format!("- {}\n", url));
            }
            md.push('\n');
        }
    }

    let warned: Vec<_> = outcome
        .pages
        .iter()
        .filter(|p| !p.warnings.is_empty())
        .collect();
    if !warned.is_empty() {
        md.push_str("## Warnings\n\n");
        for page in warned {
            md.push_str(&format!("- **{}**\n", page.url));
            for warning in &page.warnings {
                md.push_str(&format!("  - {}\n", warning));
            }
        }
        md.push('\n');
    }

    if !report.errors.is_empty() {
        md.push_str("## Errors\n\n");
        for error in &report.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

/// Keeps table cells on one line and pipes from splitting columns
fn escape_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
