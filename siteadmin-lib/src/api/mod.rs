//! Backend operations

mod crud;
mod dashboard;
mod execute;
mod multipart;
mod toggle;

pub use crud::*;
pub use dashboard::*;
pub use multipart::*;
pub use toggle::*;
