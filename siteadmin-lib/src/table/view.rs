//! Tabular list view
//!
//! Filters, sorts and pages a borrowed slice of records. The view never
//! copies records: it keeps the filtered order as indices into the slice.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::column::Column;
use super::column::TableRecord;
use super::state::PageSize;
use super::state::SortDirection;
use super::state::ViewState;
use crate::model::Record;
use crate::model::Value;

/// Message shown when the filtered set is empty.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No records found";

/// A searchable, sortable, paged view over records.
///
/// # Example
///
/// ```
/// use siteadmin_lib::Record;
/// use siteadmin_lib::table::{Column, TableView};
///
/// let records: Vec<Record> = (0..12)
///     .map(|i| Record::with_id(i.to_string()).set("n", i))
///     .collect();
/// let mut view = TableView::new(&records, vec![Column::new("n", "N").sortable()]);
///
/// view.set_page(1);
/// assert_eq!(view.page().len(), 2);
///
/// view.set_search_term("11");
/// assert_eq!(view.filtered_count(), 1);
/// ```
pub struct TableView<'a, R: TableRecord = Record> {
    records: &'a [R],
    columns: Vec<Column<R>>,
    state: ViewState,
    searchable: bool,
    empty_message: String,
    /// Indices into `records` of the filtered rows, in display order.
    order: Vec<usize>,
}

impl<'a, R: TableRecord> TableView<'a, R> {
    pub fn new(records: &'a [R], columns: Vec<Column<R>>) -> Self {
        let mut view = Self {
            records,
            columns,
            state: ViewState::default(),
            searchable: true,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            order: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Starts with a page size other than the default.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.state.page_size = size;
        self.clamp_page();
        self
    }

    /// Disables searching; search terms are then ignored.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self.recompute();
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Swaps in a fresh set of records (after a refetch), keeping the view state.
    pub fn set_records(&mut self, records: &'a [R]) {
        self.records = records;
        self.recompute();
        self.clamp_page();
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Filters to records where any field contains `text`, ignoring case.
    ///
    /// Empty text matches everything. Returns to the first page.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.state.search_term = text.into();
        self.state.page_index = 0;
        self.recompute();
    }

    /// Sorts by `key`.
    ///
    /// Repeating the active key flips the direction; a new key sorts
    /// ascending. Columns not marked sortable are ignored. Returns to the
    /// first page.
    pub fn set_sort(&mut self, key: &str) {
        if self.columns.iter().any(|c| c.key == key && !c.sortable) {
            log::debug!("Ignoring sort on non-sortable column '{}'", key);
            return;
        }
        self.state.sort_direction = match self.state.sort_key.as_deref() {
            Some(current) if current == key => self.state.sort_direction.toggle(),
            _ => SortDirection::Asc,
        };
        self.state.sort_key = Some(key.to_string());
        self.state.page_index = 0;
        self.recompute();
    }

    /// Sorts by `key` in an explicit direction.
    pub fn set_sort_direction(&mut self, key: &str, direction: SortDirection) {
        self.set_sort(key);
        if self.state.sort_key.as_deref() == Some(key) && self.state.sort_direction != direction {
            self.set_sort(key);
        }
    }

    /// Removes the sort, restoring the records' original order.
    pub fn clear_sort(&mut self) {
        self.state.sort_key = None;
        self.state.sort_direction = SortDirection::Asc;
        self.state.page_index = 0;
        self.recompute();
    }

    /// Moves to page `index`, clamped to the available pages.
    pub fn set_page(&mut self, index: usize) {
        self.state.page_index = index;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.page_index.saturating_sub(1));
    }

    /// Changes the page size, staying on the page that holds the first
    /// record currently shown.
    pub fn set_page_size(&mut self, size: PageSize) {
        let first_shown = self.state.page_index * self.state.page_size.get();
        self.state.page_size = size;
        self.state.page_index = first_shown / size.get();
        self.clamp_page();
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.order.len()
    }

    /// Number of pages; zero when nothing matches.
    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.state.page_size.get())
    }

    /// Absolute index (in filtered order) of the first row on the current page.
    pub fn page_start(&self) -> usize {
        self.state.page_index * self.state.page_size.get()
    }

    /// The records on the current page.
    pub fn page(&self) -> Vec<&'a R> {
        let records = self.records;
        self.page_indices().iter().map(|&i| &records[i]).collect()
    }

    /// Positions in the underlying slice of the records on the current page.
    pub fn page_indices(&self) -> &[usize] {
        let start = self.page_start().min(self.order.len());
        let end = (start + self.state.page_size.get()).min(self.order.len());
        &self.order[start..end]
    }

    /// Every filtered record in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &'a R> + '_ {
        let records = self.records;
        self.order.iter().map(move |&i| &records[i])
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.state.page_index = self.state.page_index.min(last);
    }

    fn recompute(&mut self) {
        let needle = if self.searchable {
            self.state.search_term.to_lowercase()
        } else {
            String::new()
        };

        self.order = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| needle.is_empty() || matches_search(*record, &needle))
            .map(|(i, _)| i)
            .collect();

        if let Some(key) = self.state.sort_key.as_deref() {
            let records = self.records;
            let keys: Vec<Option<Cow<'_, Value>>> =
                records.iter().map(|record| record.field(key)).collect();
            let direction = self.state.sort_direction;
            // sort_by is stable, so equal keys keep their original order
            self.order.sort_by(|&a, &b| {
                let ordering = compare_values(keys[a].as_deref(), keys[b].as_deref());
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        self.clamp_page();
    }
}

fn matches_search<R: TableRecord>(record: &R, needle: &str) -> bool {
    record
        .values()
        .iter()
        .any(|value| value.to_string().to_lowercase().contains(needle))
}

/// Numeric when both sides are numbers, otherwise by display string.
/// Missing values compare as the empty string.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(x), Some(y)) = (a.and_then(Value::as_number), b.and_then(Value::as_number)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    let a = a.map(ToString::to_string).unwrap_or_default();
    let b = b.map(ToString::to_string).unwrap_or_default();
    a.cmp(&b)
}
