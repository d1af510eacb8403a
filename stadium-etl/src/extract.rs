//! Extraction of stadium rows from the source HTML.
//!
//! The source article contains several tables; the one of interest is the
//! first whose caption mentions "football". Cell text is noisy: footnote
//! brackets, a diamond marker for closed stadiums, and "(formerly)" suffixes
//! all get truncated away.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::errors::ParseError;
use crate::records::RawStadiumRow;

/// Markers that cut a cell text short; the text from the first marker on is
/// dropped.
const NOISE_MARKERS: [&str; 3] = ["\u{2666}", "[", "(formerly)"];

/// Number of data cells a stadium row carries.
const EXPECTED_CELLS: usize = 7;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Cleans a single table cell text.
///
/// Trims whitespace, strips stray `&nbsp` markers, truncates at the first
/// noise marker, and removes embedded newlines.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.trim().replace("&nbsp", "");
    for marker in NOISE_MARKERS {
        if let Some(index) = cleaned.find(marker) {
            cleaned.truncate(index);
        }
    }
    cleaned.trim().replace('\n', "")
}

/// Cleans a capacity cell, additionally stripping thousands separators.
///
/// Both `,` and `.` appear as separators depending on the row's locale.
#[must_use]
pub fn clean_capacity(text: &str) -> String {
    clean_text(text).replace([',', '.'], "")
}

/// Builds a secure image URL from the cell's `img` element, if any.
///
/// The source uses protocol-relative `src` attributes; everything after the
/// first `//` is kept and prefixed with `https://`. Returns `None` when the
/// cell has no image or the `src` is not protocol-qualified.
fn image_url(cell: ElementRef<'_>, img_selector: &Selector) -> Option<String> {
    let img = cell.select(img_selector).next()?;
    let src = img.value().attr("src")?;
    let (_, host_and_path) = src.split_once("//")?;
    Some(format!("https://{host_and_path}"))
}

fn caption_mentions_football(table: ElementRef<'_>, caption_selector: &Selector) -> bool {
    table.select(caption_selector).next().is_some_and(|caption| {
        caption
            .text()
            .collect::<String>()
            .to_lowercase()
            .contains("football")
    })
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>()
}

/// Extracts stadium rows from the page HTML.
///
/// Locates the football table, skips its header row, and reads the seven
/// fixed-position cells of each data row. Rows without data cells (nested
/// header rows) are skipped silently; rank is the 1-based source row index.
///
/// A matched table with no data rows yields `Ok` with an empty vector; a page
/// with no tables, or no football caption, is a [`ParseError`].
pub fn extract_rows(html: &str) -> Result<Vec<RawStadiumRow>, ParseError> {
    let document = Html::parse_document(html);
    let table_selector = selector("table");
    let caption_selector = selector("caption");
    let row_selector = selector("tr");
    let cell_selector = selector("td");
    let img_selector = selector("img");

    let mut tables = document.select(&table_selector).peekable();
    if tables.peek().is_none() {
        warn!("no tables found on the source page");
        return Err(ParseError::NoTables);
    }

    let Some(table) = tables.find(|t| caption_mentions_football(*t, &caption_selector))
    else {
        warn!("no table with a football caption found");
        return Err(ParseError::NoFootballTable);
    };

    let mut rows = Vec::new();
    for (index, row) in table.select(&row_selector).enumerate().skip(1) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() < EXPECTED_CELLS {
            warn!(row = index, cells = cells.len(), "skipping short table row");
            continue;
        }

        rows.push(RawStadiumRow {
            rank: u32::try_from(index).unwrap_or(u32::MAX),
            stadium: clean_text(&cell_text(cells[0])),
            capacity: clean_capacity(&cell_text(cells[1])),
            region: clean_text(&cell_text(cells[2])),
            country: clean_text(&cell_text(cells[3])),
            city: clean_text(&cell_text(cells[4])),
            image: image_url(cells[5], &img_selector),
            home_team: clean_text(&cell_text(cells[6])),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stadium_table(rows: &str) -> String {
        format!(
            "<html><body>\
             <table><caption>Unrelated rankings</caption>\
             <tr><th>Other</th></tr></table>\
             <table><caption>List of association football stadiums</caption>\
             <tr><th>Stadium</th><th>Capacity</th><th>Region</th>\
             <th>Country</th><th>City</th><th>Image</th><th>Home team</th></tr>\
             {rows}\
             </table></body></html>"
        )
    }

    fn row(
        stadium: &str,
        capacity: &str,
        country: &str,
        city: &str,
        image: &str,
        team: &str,
    ) -> String {
        format!(
            "<tr><td>{stadium}</td><td>{capacity}</td><td>Europe</td>\
             <td>{country}</td><td>{city}</td><td>{image}</td><td>{team}</td></tr>"
        )
    }

    #[test]
    fn test_clean_text_truncates_at_noise_markers() {
        assert_eq!(clean_text("Old Trafford\u{2666}"), "Old Trafford");
        assert_eq!(clean_text("Stadium (formerly)"), "Stadium");
        assert_eq!(clean_text("Arena[1]"), "Arena");
    }

    #[test]
    fn test_clean_text_trims_and_strips() {
        assert_eq!(clean_text("  Wembley \n"), "Wembley");
        assert_eq!(clean_text("Camp&nbsp Nou"), "Camp Nou");
        assert_eq!(clean_text("\n"), "");
    }

    #[test]
    fn test_clean_capacity_strips_separators() {
        assert_eq!(clean_capacity("81,365"), "81365");
        assert_eq!(clean_capacity("81.365"), "81365");
        assert_eq!(clean_capacity(" 99,354[2] "), "99354");
    }

    #[test]
    fn test_extract_rows_basic() {
        let html = stadium_table(&format!(
            "{}{}",
            row(
                "Camp Nou",
                "99,354",
                "Spain",
                "Barcelona",
                r#"<img src="//upload.wikimedia.org/campnou.jpg">"#,
                "Barcelona"
            ),
            row("Wembley Stadium", "90.000", "England", "London", "", "England"),
        ));

        let rows = extract_rows(&html).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].stadium, "Camp Nou");
        assert_eq!(rows[0].capacity, "99354");
        assert_eq!(
            rows[0].image.as_deref(),
            Some("https://upload.wikimedia.org/campnou.jpg")
        );

        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].capacity, "90000");
        assert_eq!(rows[1].image, None);
    }

    #[test]
    fn test_extract_rows_image_url_is_secure() {
        let html = stadium_table(&row(
            "Camp Nou",
            "99,354",
            "Spain",
            "Barcelona",
            r#"<img src="https://upload.wikimedia.org/campnou.jpg">"#,
            "Barcelona",
        ));

        let rows = extract_rows(&html).unwrap();
        let image = rows[0].image.as_deref().unwrap();
        assert!(image.starts_with("https://"));
        assert!(image.contains("upload.wikimedia.org/campnou.jpg"));
    }

    #[test]
    fn test_extract_rows_skips_short_rows() {
        let html = stadium_table(&format!(
            "<tr><td>Only one cell</td></tr>{}",
            row("Camp Nou", "99,354", "Spain", "Barcelona", "", "Barcelona"),
        ));

        let rows = extract_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stadium, "Camp Nou");
        // Rank follows source row order, including skipped rows.
        assert_eq!(rows[0].rank, 2);
    }

    #[test]
    fn test_extract_rows_no_tables() {
        let err = extract_rows("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::NoTables));
    }

    #[test]
    fn test_extract_rows_no_football_caption() {
        let html = "<html><body><table><caption>Basketball arenas</caption>\
                    <tr><th>Arena</th></tr></table></body></html>";
        let err = extract_rows(html).unwrap_err();
        assert!(matches!(err, ParseError::NoFootballTable));
    }

    #[test]
    fn test_extract_rows_matched_but_empty() {
        let html = stadium_table("");
        let rows = extract_rows(&html).unwrap();
        assert!(rows.is_empty());
    }
}
