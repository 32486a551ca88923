//! Form state shared by every add/edit screen

use std::collections::HashMap;
use std::path::PathBuf;

use super::schema::FieldKind;
use super::schema::FieldSpec;
use super::schema::FormSchema;
use super::schema::Rule;
use crate::api::MultipartForm;
use crate::api::Payload;
use crate::error::Error;
use crate::error::FieldValidationError;
use crate::error::ValidationErrors;
use crate::model::PayloadKind;
use crate::model::Record;
use crate::model::Value;

/// The current input of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Files(Vec<PathBuf>),
}

impl FieldValue {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Number => Self::Text(String::new()),
            FieldKind::TextList | FieldKind::NumberList => Self::List(Vec::new()),
            FieldKind::File | FieldKind::Files => Self::Files(Vec::new()),
        }
    }
}

/// Input state of an add or edit form.
///
/// Values are held as entered; numbers are parsed when the form is
/// validated and converted into a payload.
///
/// # Example
///
/// ```
/// use siteadmin_lib::Resource;
/// use siteadmin_lib::form::{FormState, schema_for};
///
/// let schema = schema_for(Resource::Careers).unwrap();
/// let mut form = FormState::create(schema);
/// form.set("role", "Site Engineer").unwrap();
///
/// let errors = form.validate().unwrap_err();
/// assert_eq!(errors.get("position"), Some("Please add a position."));
/// assert_eq!(errors.get("role"), None);
/// ```
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    id: Option<String>,
    values: HashMap<&'static str, FieldValue>,
    /// File fields that already have a stored value on the record being edited.
    existing_files: HashMap<&'static str, String>,
    errors: ValidationErrors,
}

impl FormState {
    /// Starts an empty form for creating a record.
    pub fn create(schema: FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|f| (f.name, FieldValue::empty(f.kind)))
            .collect();
        Self {
            schema,
            id: None,
            values,
            existing_files: HashMap::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Starts a form prefilled from an existing record.
    pub fn edit(schema: FormSchema, id: impl Into<String>, record: &Record) -> Self {
        let mut state = Self::create(schema);
        state.id = Some(id.into());

        for spec in state.schema.fields() {
            let Some(value) = record.get(spec.name).filter(|v| !v.is_null()) else {
                continue;
            };
            match spec.kind {
                FieldKind::Text | FieldKind::Number => {
                    state.values.insert(spec.name, FieldValue::Text(value.to_string()));
                }
                FieldKind::TextList | FieldKind::NumberList => {
                    state.values.insert(spec.name, FieldValue::List(list_entries(value)));
                }
                FieldKind::File | FieldKind::Files => {
                    state.existing_files.insert(spec.name, value.to_string());
                }
            }
        }
        state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The id of the record being edited.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the stored file reference of a file field on the edited record.
    pub fn existing_file(&self, name: &str) -> Option<&str> {
        self.existing_files.get(name).map(String::as_str)
    }

    fn spec(&self, name: &str) -> Result<&FieldSpec, Error> {
        self.schema.get(name).ok_or_else(|| {
            Error::InvalidOperation(format!(
                "{} form has no field '{}'",
                self.schema.resource().label(),
                name
            ))
        })
    }

    /// Sets a text, number or list field. Clears that field's error.
    ///
    /// List fields take comma-separated entries.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), Error> {
        let spec = self.spec(name)?;
        let (key, kind) = (spec.name, spec.kind);
        let value = value.into();
        let field_value = match kind {
            FieldKind::Text | FieldKind::Number => FieldValue::Text(value),
            FieldKind::TextList | FieldKind::NumberList => {
                FieldValue::List(value.split(',').map(|s| s.trim().to_string()).collect())
            }
            FieldKind::File | FieldKind::Files => {
                return Err(Error::InvalidOperation(format!(
                    "'{}' takes a file; attach it instead",
                    name
                )));
            }
        };
        self.values.insert(key, field_value);
        self.errors.clear(name);
        Ok(())
    }

    /// Replaces the entries of a list field.
    pub fn set_list(&mut self, name: &str, entries: Vec<String>) -> Result<(), Error> {
        let spec = self.spec(name)?;
        if !matches!(spec.kind, FieldKind::TextList | FieldKind::NumberList) {
            return Err(Error::InvalidOperation(format!("'{}' is not a list field", name)));
        }
        let key = spec.name;
        self.values.insert(key, FieldValue::List(entries));
        self.errors.clear(name);
        Ok(())
    }

    /// Attaches a file. Single-file fields are replaced, multi-file fields appended to.
    pub fn attach(&mut self, name: &str, path: impl Into<PathBuf>) -> Result<(), Error> {
        let spec = self.spec(name)?;
        let (key, kind) = (spec.name, spec.kind);
        let path = path.into();
        match kind {
            FieldKind::File => {
                self.values.insert(key, FieldValue::Files(vec![path]));
            }
            FieldKind::Files => match self
                .values
                .entry(key)
                .or_insert_with(|| FieldValue::Files(Vec::new()))
            {
                FieldValue::Files(files) => files.push(path),
                other => *other = FieldValue::Files(vec![path]),
            },
            _ => {
                return Err(Error::InvalidOperation(format!(
                    "'{}' does not take a file",
                    name
                )));
            }
        }
        self.errors.clear(name);
        Ok(())
    }

    /// Errors from the last [`validate`](Self::validate), less fields edited since.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Checks every field against the schema.
    ///
    /// Each failing field is reported once, with its schema message, in
    /// schema order.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for spec in self.schema.fields() {
            if !self.field_is_valid(spec) {
                errors.push(FieldValidationError::new(spec.name, message_for(spec)));
            }
        }
        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn field_is_valid(&self, spec: &FieldSpec) -> bool {
        let value = self.values.get(spec.name);
        let required = match spec.rule {
            Rule::Required => true,
            Rule::RequiredOnCreate => !self.is_edit(),
            Rule::Optional => false,
        };

        match (spec.kind, value) {
            (FieldKind::Text, Some(FieldValue::Text(text))) => !required || !text.trim().is_empty(),
            (FieldKind::Number, Some(FieldValue::Text(text))) => {
                let text = text.trim();
                if text.is_empty() {
                    !required
                } else {
                    parse_number(text).is_some()
                }
            }
            (FieldKind::TextList, Some(FieldValue::List(entries))) => {
                if entries.is_empty() {
                    !required
                } else {
                    entries.iter().all(|e| !e.trim().is_empty())
                }
            }
            (FieldKind::NumberList, Some(FieldValue::List(entries))) => {
                if entries.is_empty() {
                    !required
                } else {
                    entries.iter().all(|e| parse_number(e.trim()).is_some())
                }
            }
            (FieldKind::File | FieldKind::Files, Some(FieldValue::Files(files))) => {
                !required || !files.is_empty()
            }
            _ => !required,
        }
    }

    /// Validates the form and converts it into the payload its resource expects.
    pub fn into_payload(mut self) -> Result<Payload, Error> {
        self.validate()?;
        match self.schema.resource().payload_kind() {
            PayloadKind::Json => Ok(Payload::Json(self.to_record())),
            PayloadKind::Multipart => Ok(Payload::Multipart(self.to_multipart())),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        for spec in self.schema.fields() {
            let Some(value) = self.values.get(spec.name) else {
                continue;
            };
            if let Some(value) = typed_value(spec.kind, value) {
                record.insert(spec.name, value);
            }
        }
        record
    }

    fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        for spec in self.schema.fields() {
            match self.values.get(spec.name) {
                Some(FieldValue::Files(files)) => {
                    for path in files {
                        form.push_file_path(spec.name, path.clone());
                    }
                }
                Some(value) => {
                    if let Some(value) = typed_value(spec.kind, value) {
                        form.push_value(spec.name, &value);
                    }
                }
                None => {}
            }
        }
        form
    }
}

fn message_for(spec: &FieldSpec) -> String {
    if spec.message.is_empty() {
        format!("{} is invalid.", spec.label)
    } else {
        spec.message.to_string()
    }
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Int(n));
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Value::Float)
}

/// Converts entered text into the value sent to the backend.
///
/// Blank optional numbers are omitted.
fn typed_value(kind: FieldKind, value: &FieldValue) -> Option<Value> {
    match (kind, value) {
        (FieldKind::Number, FieldValue::Text(text)) => parse_number(text.trim()),
        (_, FieldValue::Text(text)) => Some(Value::String(text.clone())),
        (FieldKind::NumberList, FieldValue::List(entries)) => Some(Value::List(
            entries
                .iter()
                .filter_map(|e| parse_number(e.trim()))
                .collect(),
        )),
        (_, FieldValue::List(entries)) => Some(Value::List(
            entries
                .iter()
                .map(|e| Value::String(e.trim().to_string()))
                .collect(),
        )),
        (_, FieldValue::Files(_)) => None,
    }
}

/// Reads list entries from a stored value.
///
/// Lists may come back as arrays or as the JSON text they were submitted as.
fn list_entries(value: &Value) -> Vec<String> {
    match value {
        Value::List(items) => items.iter().map(ToString::to_string).collect(),
        Value::String(text) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json @ serde_json::Value::Array(_)) => list_entries(&Value::from_json(json)),
            _ => text.split(',').map(|s| s.trim().to_string()).collect(),
        },
        other => vec![other.to_string()],
    }
}
