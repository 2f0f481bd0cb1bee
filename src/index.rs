//! Index page macros.
//!
//! The index gets a single `Content` macro: an unordered list with one link
//! per show, in dataset order.
//!
//! ```text
//! <UL>
//! <LI><A HREF="/2019/06/10.html">2019-06-10: Example Arena</A></LI>
//! </UL>
//! ```

use crate::dataset::{Concert, Dataset, ShowDate};
use crate::macros::MacroSet;

/// Build the index macro set (without `Generator`).
pub fn build_index_macros(dataset: &Dataset) -> MacroSet {
    let mut content = String::from("<UL>\n");
    for (date, concert) in dataset.entries() {
        content.push_str(&index_entry(date, concert));
    }
    content.push_str("</UL>\n");

    let mut macros = MacroSet::new();
    macros.insert("Content", content);
    macros
}

fn index_entry(date: ShowDate<'_>, concert: &Concert) -> String {
    format!(
        "<LI><A HREF=\"{}\">{}-{}-{}: {}</A></LI>\n",
        date.href(),
        date.year,
        date.month,
        date.day,
        concert.venue
    )
}
