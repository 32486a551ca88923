//! Typed models

mod record;
pub(crate) mod record_serde;
mod resource;
mod status;
mod value;

pub use record::*;
pub use resource::*;
pub use status::*;
pub use value::*;
