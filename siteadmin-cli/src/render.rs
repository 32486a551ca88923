//! Plain-text output for tables and records.

use std::fmt::Write;

use siteadmin_lib::Record;
use siteadmin_lib::table::Alignment;
use siteadmin_lib::table::HeaderCell;
use siteadmin_lib::table::RenderedPage;
use siteadmin_lib::table::SortDirection;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Cells wider than this are cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 48;
const COLUMN_GAP: &str = "  ";

fn display_width(s: &str) -> usize {
    s.width()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn pad(s: &str, width: usize, align: Alignment) -> String {
    let fill = width.saturating_sub(display_width(s));
    match align {
        Alignment::Left => format!("{}{}", s, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), s),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), s, " ".repeat(fill - left))
        }
    }
}

/// Cells are single-line; newlines in backend text would break the grid.
fn flatten(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn header_label(header: &HeaderCell) -> String {
    match header.direction {
        Some(SortDirection::Asc) => format!("{} ▲", header.label),
        Some(SortDirection::Desc) => format!("{} ▼", header.label),
        None => header.label.clone(),
    }
}

fn line(cells: &[String], widths: &[usize], headers: &[HeaderCell]) -> String {
    cells
        .iter()
        .zip(widths)
        .zip(headers)
        .map(|((cell, width), header)| pad(cell, *width, header.align))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Draws a rendered page as an aligned text grid followed by its summary.
pub fn table(page: &RenderedPage) -> String {
    let labels: Vec<String> = page.headers.iter().map(header_label).collect();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate_to_width(&flatten(cell), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = page
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| display_width(cell))
                .chain([display_width(&labels[i]), header.min_width.min(MAX_CELL_WIDTH)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&labels, &widths, &page.headers));
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join(COLUMN_GAP));

    match &page.empty_message {
        Some(message) => {
            let _ = writeln!(out, "{}", message);
        }
        None => {
            for row in &rows {
                let _ = writeln!(out, "{}", line(row, &widths, &page.headers));
            }
        }
    }

    let _ = write!(
        out,
        "{}  (page {} of {})",
        page.summary,
        if page.page_count == 0 { 0 } else { page.page_index + 1 },
        page.page_count
    );
    out
}

/// Lists every field of a record, id first, the rest by name.
pub fn record(record: &Record) -> String {
    let names = record.field_names();

    let width = names
        .iter()
        .map(|n| display_width(n))
        .chain([display_width("_id")])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    if let Some(id) = record.id() {
        let _ = writeln!(out, "{}  {}", pad("_id", width, Alignment::Left), id);
    }
    for name in names {
        let _ = writeln!(
            out,
            "{}  {}",
            pad(name, width, Alignment::Left),
            record.display(name)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(label: &str, align: Alignment, direction: Option<SortDirection>) -> HeaderCell {
        HeaderCell {
            key: label.to_lowercase(),
            label: label.to_string(),
            sortable: true,
            direction,
            align,
            min_width: 0,
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_pad_alignment() {
        assert_eq!(pad("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(pad("ab", 4, Alignment::Right), "  ab");
        assert_eq!(pad("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(pad("abcdef", 4, Alignment::Left), "abcdef");
    }

    #[test]
    fn test_table_layout() {
        let page = RenderedPage {
            headers: vec![
                header("#", Alignment::Right, None),
                header("Name", Alignment::Left, Some(SortDirection::Asc)),
            ],
            rows: vec![
                vec!["1".to_string(), "Alpha".to_string()],
                vec!["10".to_string(), "B".to_string()],
            ],
            summary: "1–2 of 2".to_string(),
            empty_message: None,
            page_index: 0,
            page_count: 1,
        };

        let text = table(&page);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " #  Name ▲");
        assert_eq!(lines[2], " 1  Alpha");
        assert_eq!(lines[3], "10  B");
        assert_eq!(lines[4], "1–2 of 2  (page 1 of 1)");
    }

    #[test]
    fn test_table_empty_state() {
        let page = RenderedPage {
            headers: vec![header("Name", Alignment::Left, None)],
            rows: vec![],
            summary: "0–0 of 0".to_string(),
            empty_message: Some("No records found".to_string()),
            page_index: 0,
            page_count: 0,
        };

        let text = table(&page);
        assert!(text.contains("No records found"));
        assert!(text.ends_with("0–0 of 0  (page 0 of 0)"));
    }

    #[test]
    fn test_multiline_cells_are_flattened() {
        assert_eq!(flatten("line one\n  line two"), "line one line two");
    }

    #[test]
    fn test_record_lists_id_first() {
        let r = Record::with_id("42").set("role", "Engineer").set("experience", "3 years");
        let text = record(&r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "_id         42");
        assert_eq!(lines[1], "experience  3 years");
        assert_eq!(lines[2], "role        Engineer");
    }
}
