//! Field descriptors: the declarative record behind every schema table.

use serde::Serialize;
use serde_json::Value;

/// Runtime kind of a JSON value, classified the way the event payloads were
/// produced: arrays count as objects, `null` has no kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
}

impl FieldType {
    pub fn of(value: &Value) -> Option<FieldType> {
        match value {
            Value::Null => None,
            Value::String(_) => Some(FieldType::String),
            Value::Number(_) => Some(FieldType::Number),
            Value::Bool(_) => Some(FieldType::Boolean),
            Value::Array(_) | Value::Object(_) => Some(FieldType::Object),
        }
    }
}

/// Value rule applied once a value's type is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Value must be a string member of the set.
    OneOf(&'static [&'static str]),
    /// Value must be a number ≥ 0.
    Positive,
    /// Value must parse to a non-negative millisecond timestamp.
    Date,
}

/// One recognized external key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub canonical_name: &'static str,
    pub accepted_types: &'static [FieldType],
    pub validation: Option<Validation>,
}

impl FieldDescriptor {
    pub const fn new(
        key: &'static str,
        canonical_name: &'static str,
        accepted_types: &'static [FieldType],
    ) -> Self {
        assert!(!accepted_types.is_empty(), "accepted_types must not be empty");
        Self {
            key,
            canonical_name,
            accepted_types,
            validation: None,
        }
    }

    pub const fn validated(self, validation: Validation) -> Self {
        Self {
            validation: Some(validation),
            ..self
        }
    }

    pub fn accepts(&self, field_type: FieldType) -> bool {
        self.accepted_types.contains(&field_type)
    }
}

/// A schema the normalization engine can resolve keys against.
pub trait FieldSchema: Send + Sync {
    fn descriptor(&self, key: &str) -> Option<&FieldDescriptor>;

    fn contains(&self, key: &str) -> bool {
        self.descriptor(key).is_some()
    }
}

/// Schema backed by a static descriptor slice.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl FieldTable {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldSchema for FieldTable {
    fn descriptor(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }
}
