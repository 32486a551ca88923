//! Status chips for boolean and workflow columns.

use std::fmt;

/// Visual tone of a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Neutral,
}

/// A status label with its tone.
///
/// Built from the loose status vocabulary the backend and screens use
/// ("active", "draft", "cancelled", ...).
///
/// # Example
///
/// ```
/// use siteadmin_lib::model::{Status, Tone};
///
/// let status = Status::from_label("published");
/// assert_eq!(status.tone(), Tone::Success);
/// assert_eq!(status.label(), "Active");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    tone: Tone,
    label: String,
}

impl Status {
    /// Maps a status word to a chip. Matching ignores case.
    pub fn from_label(status: &str) -> Self {
        let (tone, label) = match status.to_lowercase().as_str() {
            "active" | "published" | "completed" | "shown" => (Tone::Success, "Active"),
            "inactive" | "draft" | "pending" | "hidden" => (Tone::Warning, "Inactive"),
            "deleted" | "cancelled" | "error" => (Tone::Error, "Error"),
            _ => (Tone::Neutral, status),
        };
        Self {
            tone,
            label: label.to_string(),
        }
    }

    /// Maps a boolean flag to an active/inactive chip.
    pub fn from_flag(active: bool) -> Self {
        Self::from_label(if active { "active" } else { "inactive" })
    }

    /// Overrides the displayed label, keeping the tone.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the tone.
    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Returns the displayed label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
