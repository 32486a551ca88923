//! Form schema: the fields a resource's add/edit form has and how each is validated.

use crate::model::Resource;

/// The kind of input a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// A number entered as text.
    Number,
    /// One or more text entries.
    TextList,
    /// One or more numeric entries.
    NumberList,
    /// A single uploaded file.
    File,
    /// One or more uploaded files.
    Files,
}

impl FieldKind {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File | Self::Files)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::TextList | Self::NumberList | Self::Files)
    }
}

/// When a field must have a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Required when creating. On edit the existing value may be kept.
    RequiredOnCreate,
    Optional,
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Backend field / multipart part name.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: Rule,
    /// Message reported when the field fails validation.
    pub message: &'static str,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rule: Rule::Optional,
            message: "",
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn text_list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::TextList)
    }

    pub fn number_list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::NumberList)
    }

    pub fn file(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::File)
    }

    pub fn files(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Files)
    }

    /// Makes the field required, failing with `message`.
    pub fn required(mut self, message: &'static str) -> Self {
        self.rule = Rule::Required;
        self.message = message;
        self
    }

    /// Makes the field required on create only, failing with `message`.
    pub fn required_on_create(mut self, message: &'static str) -> Self {
        self.rule = Rule::RequiredOnCreate;
        self.message = message;
        self
    }

    /// Sets the message for an optional field whose value is malformed.
    pub fn invalid(mut self, message: &'static str) -> Self {
        self.message = message;
        self
    }
}

/// An ordered set of fields for one resource.
///
/// # Example
///
/// ```
/// use siteadmin_lib::Resource;
/// use siteadmin_lib::form::{FieldSpec, FormSchema};
///
/// let schema = FormSchema::new(Resource::Careers)
///     .field(FieldSpec::text("role", "Role").required("Please add a role."))
///     .field(FieldSpec::text("location", "Location").required("Please add a location."));
///
/// assert_eq!(schema.fields().len(), 2);
/// assert!(schema.get("role").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    resource: Resource,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if any field takes a file upload.
    pub fn has_files(&self) -> bool {
        self.fields.iter().any(|f| f.kind.is_file())
    }
}
