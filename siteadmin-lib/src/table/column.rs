//! Column descriptors

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::model::Record;
use crate::model::Value;
use crate::model::record_serde::ID_KEY;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A row the table view can filter, sort and display.
pub trait TableRecord {
    /// Returns the value of a field. Missing fields are `None`.
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Returns every value the search term is matched against.
    fn values(&self) -> Vec<Cow<'_, Value>>;
}

impl TableRecord for Record {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        if key == ID_KEY {
            return self.id().map(|id| Cow::Owned(Value::from(id)));
        }
        self.get(key).map(Cow::Borrowed)
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        let mut values: Vec<Cow<'_, Value>> = self.fields().values().map(Cow::Borrowed).collect();
        if let Some(id) = self.id() {
            values.push(Cow::Owned(Value::from(id)));
        }
        values
    }
}

/// Produces a cell from a record and its absolute row index.
pub type RenderFn<R> = Arc<dyn Fn(&R, usize) -> String + Send + Sync>;

/// A table column.
///
/// Without a render function the cell shows the field's display string.
///
/// # Example
///
/// ```
/// use siteadmin_lib::Record;
/// use siteadmin_lib::table::Column;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::<Record>::new("index", "#").render(|_, i| (i + 1).to_string()),
///     Column::new("projectName", "Project").sortable(),
/// ];
/// assert!(columns[1].sortable);
/// ```
pub struct Column<R = Record> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub min_width: usize,
    pub align: Alignment,
    render: Option<RenderFn<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            min_width: 0,
            align: Alignment::Left,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Sets a custom cell renderer.
    pub fn render(mut self, f: impl Fn(&R, usize) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<R: TableRecord> Column<R> {
    /// Produces the cell text for `record` at absolute row `index`.
    pub fn cell(&self, record: &R, index: usize) -> String {
        match &self.render {
            Some(render) => render(record, index),
            None => record
                .field(&self.key)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            min_width: self.min_width,
            align: self.align,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("min_width", &self.min_width)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish()
    }
}
