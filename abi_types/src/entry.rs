use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/* Name of the synthetic marker entry some inspectors emit next to the real ABI */
pub const SELECTORS_MARKER: &str = "selectors";

/* ============================================================================
   Entry Kind
   ============================================================================ */

/// The `type` tag of an ABI entry.
///
/// Tags outside the well-known Solidity set are kept verbatim in `Other`, so
/// inspector output with newer or synthetic kinds still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Function,
    Event,
    Constructor,
    Error,
    Fallback,
    Receive,
    Other(String),
}

impl EntryKind {
    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::Function => "function",
            EntryKind::Event => "event",
            EntryKind::Constructor => "constructor",
            EntryKind::Error => "error",
            EntryKind::Fallback => "fallback",
            EntryKind::Receive => "receive",
            EntryKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for EntryKind {
    fn from(tag: &str) -> Self {
        match tag {
            "function" => EntryKind::Function,
            "event" => EntryKind::Event,
            "constructor" => EntryKind::Constructor,
            "error" => EntryKind::Error,
            "fallback" => EntryKind::Fallback,
            "receive" => EntryKind::Receive,
            other => EntryKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ============================================================================
   Shape Errors
   ============================================================================ */

/* Structural problems with a raw entry record */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryShapeError {
    /* The record is not a JSON object */
    NotAnObject,
    /* The `type` field is absent */
    MissingType,
    /* The `type` field is not a string */
    InvalidType,
    /* The `name` field is present but not a string */
    InvalidName,
}

impl fmt::Display for EntryShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryShapeError::NotAnObject => write!(f, "ABI entry must be an object"),
            EntryShapeError::MissingType => write!(f, "ABI entry is missing the `type` field"),
            EntryShapeError::InvalidType => write!(f, "ABI entry `type` must be a string"),
            EntryShapeError::InvalidName => write!(f, "ABI entry `name` must be a string"),
        }
    }
}

impl std::error::Error for EntryShapeError {}

/* ============================================================================
   ABI Entry
   ============================================================================ */

/// A single ABI member as produced by the inspector.
///
/// The raw object is kept intact, including fields this crate does not
/// interpret (`inputs`, `outputs`, `stateMutability`, ...), and serializes
/// back with its original key order.
#[derive(Debug, Clone, PartialEq)]
pub struct AbiEntry {
    kind: EntryKind,
    fields: Map<String, Value>,
}

impl AbiEntry {
    /* Build an entry with just a type and an optional name */
    pub fn new(kind: EntryKind, name: Option<&str>) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        if let Some(name) = name {
            fields.insert("name".to_string(), Value::String(name.to_string()));
        }
        Self { kind, fields }
    }

    pub fn function(name: &str) -> Self {
        Self::new(EntryKind::Function, Some(name))
    }

    pub fn event(name: &str) -> Self {
        Self::new(EntryKind::Event, Some(name))
    }

    pub fn error(name: &str) -> Self {
        Self::new(EntryKind::Error, Some(name))
    }

    /* Append an extra field, replacing any existing value for the key.
       `type` and `name` are owned by the constructor and cannot be changed here. */
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        if key != "type" && key != "name" {
            self.fields.insert(key.to_string(), value);
        }
        self
    }

    /// Validate a raw object and wrap it.
    pub fn from_object(fields: Map<String, Value>) -> Result<Self, EntryShapeError> {
        let kind = match fields.get("type") {
            None => return Err(EntryShapeError::MissingType),
            Some(Value::String(tag)) => EntryKind::from(tag.as_str()),
            Some(_) => return Err(EntryShapeError::InvalidType),
        };

        match fields.get("name") {
            None | Some(Value::String(_)) => {}
            Some(_) => return Err(EntryShapeError::InvalidName),
        }

        Ok(Self { kind, fields })
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn is_function(&self) -> bool {
        self.kind == EntryKind::Function
    }

    /// Whether this is the synthetic `selectors` marker rather than a real
    /// ABI member: either its `type` or its `name` is `selectors`.
    pub fn is_selectors_marker(&self) -> bool {
        self.kind.as_str() == SELECTORS_MARKER || self.name() == Some(SELECTORS_MARKER)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for AbiEntry {
    type Error = EntryShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => AbiEntry::from_object(fields),
            _ => Err(EntryShapeError::NotAnObject),
        }
    }
}

impl Serialize for AbiEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AbiEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        AbiEntry::try_from(value).map_err(de::Error::custom)
    }
}
