//! CLI output formatting.
//!
//! Each `format_*` function is pure and returns display lines; the binary
//! prints them. Paths are shown relative to the output root when possible.
//!
//! ```text
//! Created 2019/
//! Created 2019/06/
//! index.html (2 dates)
//! 2019-06-10 Example Arena → 2019/06/10.html
//! 2019-06-12 Second Hall → 2019/06/12.html
//! Generated 2 pages in docs
//! ```
//!
//! `check` prints an inventory instead:
//!
//! ```text
//! 001 2019-06-10 Example Arena (1843 bytes)
//! 002 2019-06-12 Second Hall (1790 bytes)
//! 2 pages OK
//! ```

use crate::generate::{CheckedPage, GenerateEvent, GenerateSummary};
use std::path::Path;

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Lines for a single generation event.
pub fn format_generate_event(event: &GenerateEvent, output_dir: &Path) -> Vec<String> {
    match event {
        GenerateEvent::DirectoryCreated { path } => {
            vec![format!("Created {}/", relative(path, output_dir))]
        }
        // Existing directories are not news.
        GenerateEvent::DirectoryExisted { .. } => Vec::new(),
        GenerateEvent::IndexWritten { path, entries } => vec![format!(
            "{} ({})",
            relative(path, output_dir),
            plural(*entries, "date", "dates")
        )],
        GenerateEvent::PageWritten { path, date, venue } => vec![format!(
            "{date} {venue} \u{2192} {}",
            relative(path, output_dir)
        )],
    }
}

/// Closing line of a successful build.
pub fn format_summary(summary: &GenerateSummary, output_dir: &Path) -> String {
    format!(
        "Generated {} in {}",
        plural(summary.pages, "page", "pages"),
        output_dir.display()
    )
}

/// Inventory printed by `check`.
pub fn format_check_output(pages: &[CheckedPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "{:03} {} {} ({})",
                i + 1,
                page.date,
                page.venue,
                plural(page.bytes, "byte", "bytes")
            )
        })
        .collect();
    lines.push(format!("{} OK", plural(pages.len(), "page", "pages")));
    lines
}

pub fn print_generate_event(event: &GenerateEvent, output_dir: &Path) {
    for line in format_generate_event(event, output_dir) {
        println!("{}", line);
    }
}

pub fn print_check_output(pages: &[CheckedPage]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}
