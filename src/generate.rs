//! Site generation.
//!
//! Drives the whole run: load the dataset and both templates, lay out the
//! directory tree, then write the index and one page per date.
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── index.html          # index template + Generator, Content
//! └── 2019/
//!     ├── 06/
//!     │   ├── 10.html     # page template + Generator, DY, DM, DD, Dp, ...
//!     │   └── 12.html
//!     └── 07/
//!         └── 01.html
//! ```
//!
//! ## Failure Behavior
//!
//! Work is strictly sequential: directories, then the index, then pages in
//! dataset order. The first error stops the run. Files written before the
//! failure stay on disk; nothing is rolled back. Progress is reported through
//! a [`GenerateEvent`] callback as each step completes, so the caller can
//! show exactly how far a failed run got.

use crate::config::SiteConfig;
use crate::dataset::{Dataset, DatasetError, ShowDate};
use crate::index::build_index_macros;
use crate::macros::combine;
use crate::page::{PageError, build_page_macros, generator_macros};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("Error reading template {path}: {source}")]
    Template { path: PathBuf, source: io::Error },
    #[error("Error generating directory structure ({path}): {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Error writing {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The two operator-supplied templates, loaded once per run.
#[derive(Debug, Clone)]
pub struct Templates {
    pub index: String,
    pub page: String,
}

impl Templates {
    pub fn load(index_path: &Path, page_path: &Path) -> Result<Self, GenerateError> {
        Ok(Self {
            index: read_template(index_path)?,
            page: read_template(page_path)?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::Template {
        path: path.to_path_buf(),
        source,
    })
}

/// Progress reported while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    DirectoryCreated { path: PathBuf },
    DirectoryExisted { path: PathBuf },
    IndexWritten { path: PathBuf, entries: usize },
    PageWritten {
        path: PathBuf,
        date: String,
        venue: String,
    },
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub directories_created: usize,
    pub pages: usize,
}

/// A page rendered by [`check`] but not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedPage {
    pub date: String,
    pub venue: String,
    pub bytes: usize,
}

/// Load inputs named by `config` and write the site.
pub fn build(
    config: &SiteConfig,
    on_event: impl FnMut(&GenerateEvent),
) -> Result<GenerateSummary, GenerateError> {
    let dataset = Dataset::load(&config.data)?;
    let templates = Templates::load(&config.index_template, &config.page_template)?;
    generate_site(&dataset, &templates, &config.output_dir, on_event)
}

/// Render every output in memory without touching the output directory.
///
/// Fails on the same conditions, in the same order, as [`build`].
pub fn check(config: &SiteConfig) -> Result<Vec<CheckedPage>, GenerateError> {
    let dataset = Dataset::load(&config.data)?;
    let templates = Templates::load(&config.index_template, &config.page_template)?;

    let mut pages = Vec::new();
    for (date, concert) in dataset.entries() {
        let html = render_page(&dataset, date, &templates.page)?;
        pages.push(CheckedPage {
            date: display_date(date),
            venue: concert.venue.clone(),
            bytes: html.len(),
        });
    }
    Ok(pages)
}

/// Write the directory tree, index and pages under `output_dir`.
pub fn generate_site(
    dataset: &Dataset,
    templates: &Templates,
    output_dir: &Path,
    mut on_event: impl FnMut(&GenerateEvent),
) -> Result<GenerateSummary, GenerateError> {
    let mut summary = GenerateSummary::default();

    fs::create_dir_all(output_dir).map_err(|source| GenerateError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    for path in directory_tree(dataset, output_dir) {
        let event = if ensure_dir(&path)? {
            summary.directories_created += 1;
            GenerateEvent::DirectoryCreated { path }
        } else {
            GenerateEvent::DirectoryExisted { path }
        };
        on_event(&event);
    }

    let index_path = output_dir.join("index.html");
    write_file(&index_path, &render_index(dataset, &templates.index))?;
    on_event(&GenerateEvent::IndexWritten {
        path: index_path,
        entries: dataset.len(),
    });

    for (date, concert) in dataset.entries() {
        let html = render_page(dataset, date, &templates.page)?;
        let path = output_dir.join(date.page_path());
        write_file(&path, &html)?;
        summary.pages += 1;
        on_event(&GenerateEvent::PageWritten {
            path,
            date: display_date(date),
            venue: concert.venue.clone(),
        });
    }

    Ok(summary)
}

/// Apply the generator and index macros to the index template.
pub fn render_index(dataset: &Dataset, template: &str) -> String {
    combine([&generator_macros(), &build_index_macros(dataset)]).apply(template)
}

/// Apply the generator and page macros for `date` to the page template.
pub fn render_page(
    dataset: &Dataset,
    date: ShowDate<'_>,
    template: &str,
) -> Result<String, PageError> {
    let macros = combine([&generator_macros(), &build_page_macros(dataset, date)?]);
    Ok(macros.apply(template))
}

/// One directory per year, then one per month inside it, in dataset order.
fn directory_tree(dataset: &Dataset, output_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for (year, months) in &dataset.concerts {
        let year_dir = output_dir.join(year);
        dirs.push(year_dir.clone());
        dirs.extend(months.keys().map(|month| year_dir.join(month)));
    }
    dirs
}

/// Create `path` unless it already exists. Returns whether it was created.
fn ensure_dir(path: &Path) -> Result<bool, GenerateError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(source) => Err(GenerateError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn display_date(date: ShowDate<'_>) -> String {
    format!("{}-{}-{}", date.year, date.month, date.day)
}
