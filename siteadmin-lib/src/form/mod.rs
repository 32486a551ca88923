//! Add/edit forms
//!
//! One [`FormState`] type drives every resource's form; what differs per
//! resource is its [`FormSchema`].

mod schema;
mod schemas;
mod state;

pub use schema::*;
pub use schemas::*;
pub use state::*;
