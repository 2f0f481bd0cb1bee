//! Shared test utilities: small datasets and on-disk site fixtures.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let data = sample_dataset();
//! assert_eq!(date_strings(&data), vec!["2019-06-10", "2019-06-12", "2019-07-01"]);
//! ```

use std::path::Path;

use crate::config::SiteConfig;
use crate::dataset::Dataset;

/// A concert with no embed and an empty setlist, for splicing into JSON.
pub const PLAIN_CONCERT_JSON: &str = r#"{"venue": "V", "setlist": [], "embed": {"type": "none"}}"#;

// =========================================================================
// Datasets
// =========================================================================

/// Three shows over two months; the last one embeds an iframe.
pub fn sample_dataset_json() -> String {
    r#"{
  "concerts": {
    "2019": {
      "06": {
        "10": {
          "venue": "Example Arena",
          "setlist": ["Song A", "Song B"],
          "embed": {"type": "none"}
        },
        "12": {
          "venue": "Second Hall",
          "setlist": [],
          "embed": {"type": "none"}
        }
      },
      "07": {
        "01": {
          "venue": "Summer Stage",
          "setlist": ["Opener"],
          "embed": {"type": "iframe", "href": "https://video.example/live"}
        }
      }
    }
  }
}"#
    .to_string()
}

pub fn sample_dataset() -> Dataset {
    Dataset::from_json_str(&sample_dataset_json()).unwrap()
}

/// A dataset holding one concert with the given embed object.
pub fn single_concert_dataset(
    year: &str,
    month: &str,
    day: &str,
    venue: &str,
    embed_json: &str,
) -> Dataset {
    let json = format!(
        r#"{{"concerts": {{"{year}": {{"{month}": {{"{day}": {{
            "venue": "{venue}", "setlist": ["Song A", "Song B"], "embed": {embed_json}
        }}}}}}}}}}"#
    );
    Dataset::from_json_str(&json).unwrap()
}

/// Dates as `YYYY-MM-DD` strings in enumeration order.
pub fn date_strings(data: &Dataset) -> Vec<String> {
    data.dates()
        .map(|d| format!("{}-{}-{}", d.year, d.month, d.day))
        .collect()
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Write a dataset and templates under `root` and return a config pointing
/// at them. `page_template: None` leaves the page template missing.
pub fn write_site(
    root: &Path,
    dataset_json: &str,
    index_template: &str,
    page_template: Option<&str>,
) -> SiteConfig {
    let config = SiteConfig {
        data: root.join("data.json"),
        index_template: root.join("index.html.template"),
        page_template: root.join("XX.html.template"),
        output_dir: root.join("docs"),
    };
    std::fs::write(&config.data, dataset_json).unwrap();
    std::fs::write(&config.index_template, index_template).unwrap();
    if let Some(page) = page_template {
        std::fs::write(&config.page_template, page).unwrap();
    }
    config
}

/// Read a generated file. Panics with the path on failure.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}
