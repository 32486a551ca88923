//! Operations on backend resources
//!
//! Every call the console makes is an [`Operation`]. Operations are built
//! with [`Op`] and run with [`AdminClient::execute`](crate::AdminClient::execute),
//! or through the convenience methods on the client.
//!
//! # Example
//!
//! ```ignore
//! use siteadmin_lib::api::{Op, Payload};
//! use siteadmin_lib::{Record, Resource};
//!
//! let op = Op::create(Resource::Careers, Payload::Json(record)).build();
//! client.execute(op).await?;
//!
//! let images = Op::list(Resource::GalleryImages).under(gallery_id).build();
//! let result = client.execute(images).await?;
//! ```

use super::multipart::MultipartForm;
use crate::model::PayloadKind;
use crate::model::Record;
use crate::model::Resource;

// =============================================================================
// Payload
// =============================================================================

/// A request body for create and update operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as `application/json`.
    Json(Record),
    /// Sent as `multipart/form-data`.
    Multipart(MultipartForm),
}

impl Payload {
    /// Builds the payload kind a resource expects from a record.
    ///
    /// Multipart resources get the record's fields as text parts.
    pub fn for_resource(resource: Resource, record: Record) -> Self {
        match resource.payload_kind() {
            PayloadKind::Json => Self::Json(record),
            PayloadKind::Multipart => Self::Multipart(MultipartForm::from_record(&record)),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Json(_) => PayloadKind::Json,
            Self::Multipart(_) => PayloadKind::Multipart,
        }
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Self::Json(record)
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Self::Multipart(form)
    }
}

// =============================================================================
// Operation
// =============================================================================

/// A single request against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fetch a collection, optionally scoped to a parent record.
    List {
        resource: Resource,
        parent: Option<String>,
    },
    /// Fetch one record.
    Retrieve { resource: Resource, id: String },
    /// Create a record.
    Create {
        resource: Resource,
        parent: Option<String>,
        payload: Payload,
    },
    /// Replace a record.
    Update {
        resource: Resource,
        id: String,
        payload: Payload,
    },
    /// Delete a record.
    Delete { resource: Resource, id: String },
    /// Flip a boolean flag on a record.
    Toggle {
        resource: Resource,
        record: Record,
        flag: String,
    },
    /// Reorder a gallery image.
    SetPriority { id: String, priority: i64 },
    /// Change a gallery image's caption.
    SetCaption { id: String, caption: String },
    /// Read a counter endpoint.
    Count { resource: Resource },
}

impl Operation {
    /// Returns the resource this operation targets.
    pub fn resource(&self) -> Resource {
        match self {
            Self::List { resource, .. }
            | Self::Retrieve { resource, .. }
            | Self::Create { resource, .. }
            | Self::Update { resource, .. }
            | Self::Delete { resource, .. }
            | Self::Toggle { resource, .. }
            | Self::Count { resource } => *resource,
            Self::SetPriority { .. } | Self::SetCaption { .. } => Resource::GalleryImages,
        }
    }

    /// Returns `true` if this operation changes backend state.
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Self::List { .. } | Self::Retrieve { .. } | Self::Count { .. }
        )
    }
}

/// The outcome of an executed [`Operation`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    List(Vec<Record>),
    Retrieve(Record),
    /// The created record when the backend echoes it back.
    Create(Option<Record>),
    /// The updated record when the backend echoes it back.
    Update(Option<Record>),
    Delete,
    Toggle(Option<Record>),
    SetPriority,
    SetCaption,
    Count(u64),
}

impl OperationResult {
    /// Returns the records if this was a List operation.
    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            Self::List(records) => Some(records),
            _ => None,
        }
    }

    /// Returns the record carried by this result, if any.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Retrieve(record) => Some(record),
            Self::Create(record) | Self::Update(record) | Self::Toggle(record) => record,
            _ => None,
        }
    }

    /// Returns the count if this was a Count operation.
    pub fn count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Entry point for building operations.
pub struct Op;

impl Op {
    /// Creates a List operation builder.
    pub fn list(resource: Resource) -> ListBuilder {
        ListBuilder {
            resource,
            parent: None,
        }
    }

    /// Creates a Retrieve operation.
    pub fn retrieve(resource: Resource, id: impl Into<String>) -> Operation {
        Operation::Retrieve {
            resource,
            id: id.into(),
        }
    }

    /// Creates a Create operation builder.
    pub fn create(resource: Resource, payload: impl Into<Payload>) -> CreateBuilder {
        CreateBuilder {
            resource,
            parent: None,
            payload: payload.into(),
        }
    }

    /// Creates an Update operation.
    pub fn update(resource: Resource, id: impl Into<String>, payload: impl Into<Payload>) -> Operation {
        Operation::Update {
            resource,
            id: id.into(),
            payload: payload.into(),
        }
    }

    /// Creates a Delete operation.
    pub fn delete(resource: Resource, id: impl Into<String>) -> Operation {
        Operation::Delete {
            resource,
            id: id.into(),
        }
    }

    /// Creates a Toggle operation for `flag` on `record`.
    pub fn toggle(resource: Resource, record: Record, flag: impl Into<String>) -> Operation {
        Operation::Toggle {
            resource,
            record,
            flag: flag.into(),
        }
    }

    /// Creates a SetPriority operation for a gallery image.
    pub fn set_priority(id: impl Into<String>, priority: i64) -> Operation {
        Operation::SetPriority {
            id: id.into(),
            priority,
        }
    }

    /// Creates a SetCaption operation for a gallery image.
    pub fn set_caption(id: impl Into<String>, caption: impl Into<String>) -> Operation {
        Operation::SetCaption {
            id: id.into(),
            caption: caption.into(),
        }
    }

    /// Creates a Count operation.
    pub fn count(resource: Resource) -> Operation {
        Operation::Count { resource }
    }
}

/// Builder for List operations.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    resource: Resource,
    parent: Option<String>,
}

impl ListBuilder {
    /// Scopes the list to a parent record (gallery images of a gallery).
    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn build(self) -> Operation {
        Operation::List {
            resource: self.resource,
            parent: self.parent,
        }
    }
}

impl From<ListBuilder> for Operation {
    fn from(builder: ListBuilder) -> Self {
        builder.build()
    }
}

/// Builder for Create operations.
#[derive(Debug, Clone)]
pub struct CreateBuilder {
    resource: Resource,
    parent: Option<String>,
    payload: Payload,
}

impl CreateBuilder {
    /// Creates the record under a parent (images uploaded into a gallery).
    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn build(self) -> Operation {
        Operation::Create {
            resource: self.resource,
            parent: self.parent,
            payload: self.payload,
        }
    }
}

impl From<CreateBuilder> for Operation {
    fn from(builder: CreateBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_for_resource() {
        let record = Record::new().set("role", "Engineer");
        assert_eq!(
            Payload::for_resource(Resource::Careers, record.clone()).kind(),
            PayloadKind::Json
        );
        let payload = Payload::for_resource(Resource::Clients, record.set("active", true));
        match payload {
            Payload::Multipart(form) => assert_eq!(form.text_value("active"), Some("true")),
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn test_builders() {
        let op: Operation = Op::list(Resource::GalleryImages).under("g1").into();
        assert_eq!(
            op,
            Operation::List {
                resource: Resource::GalleryImages,
                parent: Some("g1".to_string()),
            }
        );
        assert!(!op.is_write());

        let op = Op::set_caption("img", "Lobby");
        assert_eq!(op.resource(), Resource::GalleryImages);
        assert!(op.is_write());
    }

    #[test]
    fn test_result_accessors() {
        let record = Record::with_id("a1");
        assert_eq!(
            OperationResult::Create(Some(record.clone())).into_record(),
            Some(record)
        );
        assert_eq!(OperationResult::Delete.into_record(), None);
        assert_eq!(OperationResult::Count(4).count(), Some(4));
        assert!(OperationResult::List(vec![]).into_records().unwrap().is_empty());
    }
}
