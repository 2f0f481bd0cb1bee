//! Starter templates written by `tourgen init`.
//!
//! Rendered with maud so the markup is checked at compile time. Macro tokens
//! go in as [`PreEscaped`] text and come out verbatim, ready for
//! substitution.

use crate::macros::token;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::io;
use std::path::Path;

fn macro_token(name: &str) -> PreEscaped<String> {
    PreEscaped(token(name))
}

fn base_document(title: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (macro_token("Generator"))
                title { (title) }
            }
            body { (body) }
        }
    }
}

/// Index template: a heading and the `Content` list.
pub fn stock_index_template() -> String {
    base_document(
        html! { "Tour dates" },
        html! {
            h1 { "Tour dates" }
            main { (macro_token("Content")) }
        },
    )
    .into_string()
}

/// Page template using every per-date macro.
pub fn stock_page_template() -> String {
    base_document(
        html! { (macro_token("Dp")) ", " (macro_token("Venue")) },
        html! {
            nav { a href="/index.html" { "All dates" } }
            h1 { (macro_token("Venue")) }
            p {
                time datetime={ (macro_token("DY")) "-" (macro_token("DM")) "-" (macro_token("DD")) } {
                    (macro_token("Dp"))
                }
            }
            (macro_token("Embed"))
            h2 { "Setlist" }
            (macro_token("Setlist"))
        },
    )
    .into_string()
}

/// Write both starter templates, refusing to replace existing files.
pub fn write_stock_templates(index_path: &Path, page_path: &Path) -> io::Result<()> {
    for path in [index_path, page_path] {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
    }
    fs::write(index_path, stock_index_template())?;
    fs::write(page_path, stock_page_template())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ShowDate;
    use crate::generate::{render_index, render_page};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn index_template_has_tokens_verbatim() {
        let t = stock_index_template();
        assert!(t.starts_with("<!DOCTYPE html>"));
        assert!(t.contains("!Content!"));
        assert!(t.contains("!Generator!"));
    }

    #[test]
    fn page_template_uses_every_page_macro() {
        let t = stock_page_template();
        for name in ["Generator", "DY", "DM", "DD", "Dp", "Venue", "Embed", "Setlist"] {
            assert!(t.contains(&token(name)), "missing !{name}!");
        }
        assert!(t.contains(r#"datetime="!DY!-!DM!-!DD!""#));
    }

    #[test]
    fn stock_templates_render_cleanly() {
        let data = sample_dataset();
        let index = render_index(&data, &stock_index_template());
        assert!(!index.contains("!Content!"));
        assert!(index.contains(r#"<A HREF="/2019/06/10.html">"#));

        let page = render_page(&data, ShowDate::new("2019", "07", "01"), &stock_page_template())
            .unwrap();
        assert!(page.contains("<title>01 July 2019, Summer Stage</title>"));
        assert!(page.contains("<IFRAME"));
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let index = tmp.path().join("index.html.template");
        let page = tmp.path().join("XX.html.template");
        fs::write(&page, "mine").unwrap();

        let err = write_stock_templates(&index, &page).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(!index.exists());
        assert_eq!(fs::read_to_string(&page).unwrap(), "mine");
    }

    #[test]
    fn write_creates_both() {
        let tmp = TempDir::new().unwrap();
        let index = tmp.path().join("index.html.template");
        let page = tmp.path().join("XX.html.template");
        write_stock_templates(&index, &page).unwrap();
        assert_eq!(fs::read_to_string(&index).unwrap(), stock_index_template());
        assert_eq!(fs::read_to_string(&page).unwrap(), stock_page_template());
    }
}
