//! View state: search, sort and paging

use std::fmt;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Asc
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Error for a page size outside [`PageSize::OPTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page size must be one of 5, 10, 25 or 50 (got {0})")]
pub struct InvalidPageSize(pub usize);

/// Number of rows per page, restricted to a fixed set of choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// The selectable page sizes.
    pub const OPTIONS: [usize; 4] = [5, 10, 25, 50];

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        if Self::OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(InvalidPageSize(size))
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-controlled state of a table view.
///
/// Changed only through [`TableView`](super::TableView), which keeps
/// `page_index` in range of the filtered records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub(super) search_term: String,
    pub(super) sort_key: Option<String>,
    pub(super) sort_direction: SortDirection,
    pub(super) page_index: usize,
    pub(super) page_size: PageSize,
}

impl ViewState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_options() {
        assert_eq!(PageSize::default().get(), 10);
        assert_eq!(PageSize::try_from(25).unwrap().get(), 25);
        assert_eq!(PageSize::try_from(7), Err(InvalidPageSize(7)));
        assert!(PageSize::try_from(0).is_err());
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
    }
}
