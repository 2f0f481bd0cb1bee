//! Tour dataset loading and date enumeration.
//!
//! The dataset is a single JSON file maintained by hand:
//!
//! ```json
//! {
//!   "concerts": {
//!     "2019": {
//!       "06": {
//!         "10": {
//!           "venue": "Example Arena",
//!           "setlist": ["Song A", "Song B"],
//!           "embed": { "type": "iframe", "href": "https://example.com/v" }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Year, month and day keys are opaque strings. The order in which they are
//! written is the order of the index and of page generation, so a file that
//! lists dates chronologically produces a chronological site. Nothing here
//! sorts or checks the calendar; that happens only when a page formats its
//! date.
//!
//! Required fields are checked at load time and reported with their full
//! path (`concerts/2019/06/10/venue`). The embed `type` is kept as written
//! and only interpreted when a page is built (see [`crate::page`]).

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON file. ({0})")]
    Syntax(#[from] serde_json::Error),
    #[error("KeyError: missing {path}")]
    MissingField { path: String },
    #[error("{path}: expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}

/// Concerts keyed by year, then month, then day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub concerts: IndexMap<String, IndexMap<String, IndexMap<String, Concert>>>,
}

/// One show, owned by its year/month/day slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Concert {
    pub venue: String,
    pub setlist: Vec<String>,
    pub embed: EmbedRecord,
}

/// The embed record exactly as written in the dataset.
///
/// `kind` is the raw `type` field. `href` is only required for iframes, so
/// its absence is reported when the page is built, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedRecord {
    pub kind: String,
    pub href: Option<String>,
}

/// A (year, month, day) coordinate into a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShowDate<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
}

impl<'a> ShowDate<'a> {
    pub fn new(year: &'a str, month: &'a str, day: &'a str) -> Self {
        Self { year, month, day }
    }

    /// Page path relative to the output root: `2019/06/10.html`.
    pub fn page_path(&self) -> String {
        format!("{}/{}/{}.html", self.year, self.month, self.day)
    }

    /// Site-absolute link to the page: `/2019/06/10.html`.
    pub fn href(&self) -> String {
        format!("/{}", self.page_path())
    }
}

/// Renders the dataset path, `concerts/2019/06/10`.
impl fmt::Display for ShowDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "concerts/{}/{}/{}", self.year, self.month, self.day)
    }
}

impl Dataset {
    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(&root)
    }

    /// Build a dataset from parsed JSON, keeping object order at every level.
    pub fn from_value(root: &Value) -> Result<Self, DatasetError> {
        let root = as_object(root, "")?;
        let concerts_path = "concerts".to_string();
        let years = as_object(field(root, &concerts_path, "concerts")?, &concerts_path)?;

        let mut concerts = IndexMap::new();
        for (year, months_value) in years {
            let year_path = format!("{concerts_path}/{year}");
            let months = as_object(months_value, &year_path)?;
            let mut by_month = IndexMap::new();
            for (month, days_value) in months {
                let month_path = format!("{year_path}/{month}");
                let days = as_object(days_value, &month_path)?;
                let mut by_day = IndexMap::new();
                for (day, concert_value) in days {
                    let day_path = format!("{month_path}/{day}");
                    by_day.insert(day.clone(), parse_concert(concert_value, &day_path)?);
                }
                by_month.insert(month.clone(), by_day);
            }
            concerts.insert(year.clone(), by_month);
        }
        Ok(Self { concerts })
    }

    /// Every show date, years then months then days, in file order.
    ///
    /// Borrowing iterator: call again for a fresh walk.
    pub fn dates(&self) -> impl Iterator<Item = ShowDate<'_>> + '_ {
        self.entries().map(|(date, _)| date)
    }

    /// Every show with its concert, in the same order as [`Dataset::dates`].
    pub fn entries(&self) -> impl Iterator<Item = (ShowDate<'_>, &Concert)> + '_ {
        self.concerts.iter().flat_map(|(year, months)| {
            months.iter().flat_map(move |(month, days)| {
                days.iter().map(move |(day, concert)| {
                    (
                        ShowDate::new(year.as_str(), month.as_str(), day.as_str()),
                        concert,
                    )
                })
            })
        })
    }

    /// Every (year, month) pair that holds at least one key, in file order.
    pub fn months(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.concerts.iter().flat_map(|(year, months)| {
            months
                .keys()
                .map(move |month| (year.as_str(), month.as_str()))
        })
    }

    pub fn years(&self) -> impl Iterator<Item = &str> + '_ {
        self.concerts.keys().map(String::as_str)
    }

    pub fn concert(&self, date: ShowDate<'_>) -> Option<&Concert> {
        self.concerts
            .get(date.year)?
            .get(date.month)?
            .get(date.day)
    }

    pub fn len(&self) -> usize {
        self.dates().count()
    }

    pub fn is_empty(&self) -> bool {
        self.dates().next().is_none()
    }
}

fn parse_concert(value: &Value, path: &str) -> Result<Concert, DatasetError> {
    let obj = as_object(value, path)?;

    let venue_path = format!("{path}/venue");
    let venue = as_str(field(obj, &venue_path, "venue")?, &venue_path)?.to_string();

    let setlist_path = format!("{path}/setlist");
    let setlist = field(obj, &setlist_path, "setlist")?
        .as_array()
        .ok_or_else(|| wrong_type(&setlist_path, "an array of song titles"))?
        .iter()
        .enumerate()
        .map(|(i, song)| {
            as_str(song, &format!("{setlist_path}/{i}")).map(str::to_string)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let embed_path = format!("{path}/embed");
    let embed = parse_embed(field(obj, &embed_path, "embed")?, &embed_path)?;

    Ok(Concert {
        venue,
        setlist,
        embed,
    })
}

fn parse_embed(value: &Value, path: &str) -> Result<EmbedRecord, DatasetError> {
    let obj = as_object(value, path)?;
    let kind_path = format!("{path}/type");
    let kind = as_str(field(obj, &kind_path, "type")?, &kind_path)?.to_string();
    let href = match obj.get("href") {
        Some(v) => Some(as_str(v, &format!("{path}/href"))?.to_string()),
        None => None,
    };
    Ok(EmbedRecord { kind, href })
}

fn field<'v>(
    obj: &'v Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'v Value, DatasetError> {
    obj.get(key).ok_or_else(|| DatasetError::MissingField {
        path: path.to_string(),
    })
}

fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, DatasetError> {
    value.as_object().ok_or_else(|| {
        wrong_type(if path.is_empty() { "<root>" } else { path }, "an object")
    })
}

fn as_str<'v>(value: &'v Value, path: &str) -> Result<&'v str, DatasetError> {
    value.as_str().ok_or_else(|| wrong_type(path, "a string"))
}

fn wrong_type(path: &str, expected: &'static str) -> DatasetError {
    DatasetError::WrongType {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn dates_follow_file_order_not_sorted_order() {
        let data = Dataset::from_json_str(
            r#"{"concerts": {
                "2020": {"01": {"05": CONCERT}},
                "2019": {"12": {"31": CONCERT, "01": CONCERT}, "03": {"02": CONCERT}}
            }}"#
            .replace("CONCERT", PLAIN_CONCERT_JSON)
            .as_str(),
        )
        .unwrap();

        assert_eq!(
            date_strings(&data),
            vec!["2020-01-05", "2019-12-31", "2019-12-01", "2019-03-02"]
        );
    }

    #[test]
    fn dates_are_restartable() {
        let data = sample_dataset();
        let first: Vec<_> = data.dates().collect();
        let second: Vec<_> = data.dates().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn entries_pair_each_date_with_its_concert() {
        let data = sample_dataset();
        let venues: Vec<(String, &str)> = data
            .entries()
            .map(|(d, c)| (d.page_path(), c.venue.as_str()))
            .collect();
        assert_eq!(
            venues,
            vec![
                ("2019/06/10.html".to_string(), "Example Arena"),
                ("2019/06/12.html".to_string(), "Second Hall"),
                ("2019/07/01.html".to_string(), "Summer Stage"),
            ]
        );
        assert_eq!(
            data.entries().map(|(d, _)| d).collect::<Vec<_>>(),
            data.dates().collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_concerts_yield_no_dates() {
        let data = Dataset::from_json_str(r#"{"concerts": {}}"#).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.dates().count(), 0);
    }

    #[test]
    fn months_lists_each_year_month_pair_once() {
        let data = sample_dataset();
        assert_eq!(
            data.months().collect::<Vec<_>>(),
            vec![("2019", "06"), ("2019", "07")]
        );
        assert_eq!(data.years().collect::<Vec<_>>(), vec!["2019"]);
    }

    #[test]
    fn concert_lookup() {
        let data = sample_dataset();
        let concert = data.concert(ShowDate::new("2019", "06", "10")).unwrap();
        assert_eq!(concert.venue, "Example Arena");
        assert_eq!(concert.setlist, vec!["Song A", "Song B"]);
        assert_eq!(concert.embed.kind, "none");
        assert!(data.concert(ShowDate::new("2019", "06", "11")).is_none());
        assert!(data.concert(ShowDate::new("1999", "06", "10")).is_none());
    }

    #[test]
    fn keys_are_opaque_strings() {
        let data = Dataset::from_json_str(
            &r#"{"concerts": {"19": {"June": {"tenth": CONCERT}}}}"#
                .replace("CONCERT", PLAIN_CONCERT_JSON),
        )
        .unwrap();
        assert_eq!(date_strings(&data), vec!["19-June-tenth"]);
    }

    #[test]
    fn iframe_href_is_kept() {
        let data = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "venue": "V", "setlist": [],
                "embed": {"type": "iframe", "href": "https://x/y"}
            }}}}}"#,
        )
        .unwrap();
        let concert = data.concert(ShowDate::new("2019", "06", "10")).unwrap();
        assert_eq!(concert.embed.kind, "iframe");
        assert_eq!(concert.embed.href.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn unknown_embed_type_loads() {
        let data = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "venue": "V", "setlist": [], "embed": {"type": "bogus"}
            }}}}}"#,
        )
        .unwrap();
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn malformed_json_is_syntax_error() {
        let err = Dataset::from_json_str(r#"{"concerts": {"#).unwrap_err();
        assert!(matches!(err, DatasetError::Syntax(_)));
        assert!(err.to_string().starts_with("Invalid JSON file."));
    }

    #[test]
    fn missing_concerts_key() {
        let err = Dataset::from_json_str(r#"{"shows": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "KeyError: missing concerts");
    }

    #[test]
    fn missing_venue_names_path() {
        let err = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "setlist": [], "embed": {"type": "none"}
            }}}}}"#,
        )
        .unwrap_err();
        assert!(
            matches!(&err, DatasetError::MissingField { path } if path == "concerts/2019/06/10/venue"),
            "{err}"
        );
    }

    #[test]
    fn missing_setlist_names_path() {
        let err = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "venue": "V", "embed": {"type": "none"}
            }}}}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "KeyError: missing concerts/2019/06/10/setlist");
    }

    #[test]
    fn missing_embed_type_names_path() {
        let err = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "venue": "V", "setlist": [], "embed": {}
            }}}}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "KeyError: missing concerts/2019/06/10/embed/type"
        );
    }

    #[test]
    fn setlist_entries_must_be_strings() {
        let err = Dataset::from_json_str(
            r#"{"concerts": {"2019": {"06": {"10": {
                "venue": "V", "setlist": ["ok", 7], "embed": {"type": "none"}
            }}}}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "concerts/2019/06/10/setlist/1: expected a string");
    }

    #[test]
    fn month_level_must_be_object() {
        let err = Dataset::from_json_str(r#"{"concerts": {"2019": []}}"#).unwrap_err();
        assert!(matches!(err, DatasetError::WrongType { ref path, .. } if path == "concerts/2019"));
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Dataset::load(&tmp.path().join("data.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn show_date_paths() {
        let date = ShowDate::new("2019", "06", "10");
        assert_eq!(date.page_path(), "2019/06/10.html");
        assert_eq!(date.href(), "/2019/06/10.html");
        assert_eq!(date.to_string(), "concerts/2019/06/10");
    }
}
