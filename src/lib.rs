//! # tourgen
//!
//! A static site generator for a band's tour archive. One hand-maintained
//! JSON file lists every show by year, month and day; two plain HTML
//! templates decide how the index and the per-show pages look. tourgen
//! produces `index.html` plus one `YYYY/MM/DD.html` per show.
//!
//! # Pipeline
//!
//! ```text
//! data.json ─┐
//!            ├─ Dataset ─ dates() ─┬─ build_index_macros ─┐
//! templates ─┘                     └─ build_page_macros  ─┴─ combine + apply ─ docs/
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`macros`] | Ordered macro sets, `combine`, literal `!Name!` substitution |
//! | [`dataset`] | JSON loading with path-named errors; date enumeration |
//! | [`page`] | Per-date macros: dates, venue, embed, setlist; the generator tag |
//! | [`index`] | The index `Content` list |
//! | [`generate`] | Directory tree, file writing, dry-run check |
//! | [`config`] | `tourgen.toml` loading and layering |
//! | [`templates`] | Starter templates for `tourgen init` |
//! | [`output`] | Terminal output formatting |
//!
//! # Design Decisions
//!
//! ## Literal Substitution Only
//!
//! Templates are not a language. There are no loops or conditionals; a
//! template is text with `!Name!` tokens, and anything structured (the index
//! list, the setlist) is assembled in Rust and handed over as one macro
//! value. Someone editing the templates only has to know the token names.
//!
//! ## Order Is Data
//!
//! Nothing is sorted. The dataset's key order drives the index, the
//! directory layout and the page order, and macro sets keep insertion order
//! because substitution passes run in that order (see [`macros`]).
//!
//! ## Stop On First Error
//!
//! Every failure is fatal and reported as a single line. A half-built site
//! is left as it is rather than rolled back.

pub mod config;
pub mod dataset;
pub mod generate;
pub mod index;
pub mod macros;
pub mod output;
pub mod page;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_helpers;
