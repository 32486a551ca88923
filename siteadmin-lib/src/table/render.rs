//! Rendering the current page into plain cells.

use super::column::Alignment;
use super::column::TableRecord;
use super::state::SortDirection;
use super::view::TableView;

/// A column header as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Set on the column the view is sorted by.
    pub direction: Option<SortDirection>,
    pub align: Alignment,
    pub min_width: usize,
}

/// The current page of a [`TableView`] as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
    /// `"{from}–{to} of {count}"`, one-based and inclusive.
    pub summary: String,
    /// Set instead of rows when nothing matches.
    pub empty_message: Option<String>,
    pub page_index: usize,
    pub page_count: usize,
}

impl<R: TableRecord> TableView<'_, R> {
    /// Renders headers, the current page's cells and the paging summary.
    ///
    /// Render functions receive each record's position in the filtered
    /// order, not its position on the page.
    pub fn render(&self) -> RenderedPage {
        let state = self.state();
        let headers = self
            .columns()
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                direction: (state.sort_key() == Some(column.key.as_str()))
                    .then_some(state.sort_direction()),
                align: column.align,
                min_width: column.min_width,
            })
            .collect();

        let start = self.page_start();
        let rows: Vec<Vec<String>> = self
            .page()
            .into_iter()
            .enumerate()
            .map(|(offset, record)| {
                self.columns()
                    .iter()
                    .map(|column| column.cell(record, start + offset))
                    .collect()
            })
            .collect();

        let count = self.filtered_count();
        let hidden = self.total_count() - count;
        let summary = if rows.is_empty() && hidden > 0 {
            format!("0–0 of 0 ({} hidden by search)", hidden)
        } else if rows.is_empty() {
            "0–0 of 0".to_string()
        } else {
            format!("{}–{} of {}", start + 1, start + rows.len(), count)
        };
        let empty_message = rows.is_empty().then(|| self.empty_message().to_string());

        RenderedPage {
            headers,
            rows,
            summary,
            empty_message,
            page_index: state.page_index(),
            page_count: self.page_count(),
        }
    }
}
