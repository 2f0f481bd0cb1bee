//! Per-date macro sets.
//!
//! [`build_page_macros`] projects one concert onto the macros a page template
//! can use. Entries come out in this order:
//!
//! | Macro | Value |
//! |-------|-------|
//! | `DY`, `DM`, `DD` | year, month and day keys as written |
//! | `Dp` | `10 June 2019` |
//! | `Venue` | venue text, unescaped |
//! | `Embed` | iframe markup; absent when the embed type is `none` |
//! | `Setlist` | `<OL>` with one `<LI>` per song |
//!
//! `Generator` is not produced here. Callers merge [`generator_macros`] in
//! front of every set with [`crate::macros::combine`].

use crate::dataset::{Dataset, EmbedRecord, ShowDate};
use crate::macros::MacroSet;
use chrono::NaiveDate;
use thiserror::Error;

/// Identifies generated pages; exposed to templates as `!Generator!`.
pub const GENERATOR_TAG: &str =
    r#"<META CONTENT="tourgen site generator" NAME="generator" />"#;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("no concert at {date}")]
    DateNotFound { date: String },
    #[error("What embed type is {kind}? ({date}/embed/type)")]
    UnknownEmbed { kind: String, date: String },
    #[error("KeyError: missing {date}/embed/href")]
    MissingHref { date: String },
    #[error("{date} is not a calendar date")]
    InvalidDate { date: String },
}

/// The macros shared by every output file.
pub fn generator_macros() -> MacroSet {
    MacroSet::from_iter([("Generator", GENERATOR_TAG)])
}

/// Media shown on a concert page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    None,
    Iframe { href: String },
}

impl Embed {
    /// Interpret a raw embed record, naming `date` on failure.
    pub fn resolve(record: &EmbedRecord, date: ShowDate<'_>) -> Result<Self, PageError> {
        match record.kind.as_str() {
            "none" => Ok(Embed::None),
            "iframe" => match &record.href {
                Some(href) => Ok(Embed::Iframe { href: href.clone() }),
                None => Err(PageError::MissingHref {
                    date: date.to_string(),
                }),
            },
            other => Err(PageError::UnknownEmbed {
                kind: other.to_string(),
                date: date.to_string(),
            }),
        }
    }

    /// Markup for the `Embed` macro, or `None` when nothing is embedded.
    pub fn markup(&self) -> Option<String> {
        match self {
            Embed::None => None,
            Embed::Iframe { href } => Some(iframe_markup(href)),
        }
    }
}

fn iframe_markup(href: &str) -> String {
    format!(
        r#"<IFRAME
ALLOWFULLSCREEN
FRAMEBORDER="0"
HEIGHT="480"
MOZALLOWFULLSCREEN="true"
SRC="{href}"
WEBKITALLOWFULLSCREEN="true"
WIDTH="640"
><P><A HREF="{href}">iframe</A></P></IFRAME>"#
    )
}

/// Format a date as `DD MonthName YYYY`, e.g. `10 June 2019`.
///
/// The keys must parse as integers forming a real calendar date in years
/// 1 through 9999.
pub fn format_date(date: ShowDate<'_>) -> Result<String, PageError> {
    let invalid = || PageError::InvalidDate {
        date: date.to_string(),
    };
    let year: i32 = date.year.trim().parse().map_err(|_| invalid())?;
    if !(1..=9999).contains(&year) {
        return Err(invalid());
    }
    let month: u32 = date.month.trim().parse().map_err(|_| invalid())?;
    let day: u32 = date.day.trim().parse().map_err(|_| invalid())?;
    let parsed = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(parsed.format("%d %B %Y").to_string())
}

/// Render a setlist as an ordered list, one line per song.
pub fn render_setlist(songs: &[String]) -> String {
    let mut html = String::from("<OL>\n");
    for song in songs {
        html.push_str("<LI>");
        html.push_str(song);
        html.push_str("</LI>\n");
    }
    html.push_str("</OL>\n");
    html
}

/// Build the macro set for the concert at `date`.
pub fn build_page_macros(dataset: &Dataset, date: ShowDate<'_>) -> Result<MacroSet, PageError> {
    let concert = dataset
        .concert(date)
        .ok_or_else(|| PageError::DateNotFound {
            date: date.to_string(),
        })?;

    let mut macros = MacroSet::new();
    macros.insert("DY", date.year);
    macros.insert("DM", date.month);
    macros.insert("DD", date.day);
    macros.insert("Dp", format_date(date)?);
    macros.insert("Venue", concert.venue.as_str());

    if let Some(markup) = Embed::resolve(&concert.embed, date)?.markup() {
        macros.insert("Embed", markup);
    }

    macros.insert("Setlist", render_setlist(&concert.setlist));
    Ok(macros)
}
