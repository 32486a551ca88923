//! Site content administration client library
//!
//! An async client for the corporate website's content backend: banners,
//! projects, clients, awards, testimonials, careers, galleries, spotlights
//! and the contact/career inboxes. Alongside the client it provides the
//! shared pieces every admin screen is built from: per-resource form
//! schemas with validation, and a searchable, sortable, paged table view.

pub mod api;
pub mod auth;
pub mod error;
pub mod form;
pub mod model;
pub mod table;

mod client;
mod retry;

pub use client::*;
pub use model::Record;
pub use model::Resource;
pub use model::Value;
pub use retry::Idempotency;
pub use retry::RetryConfig;
