//! Tabular list view: search, sort and paging over fetched records.

mod column;
mod render;
mod state;
mod view;

pub use column::*;
pub use render::*;
pub use state::*;
pub use view::*;
