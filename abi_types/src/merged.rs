use crate::entry::AbiEntry;
use serde::ser::Serializer;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/* A function name that is already defined by an earlier unit */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCollision {
    /* The colliding function name */
    pub name: String,
    /* Unit that defined the function first */
    pub first_unit: String,
}

impl fmt::Display for FunctionCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "function with same name found: {} (first defined by {})",
            self.name, self.first_unit
        )
    }
}

impl std::error::Error for FunctionCollision {}

/// The combined ABI of one logical contract.
///
/// Entries keep insertion order. No two `function` entries share a name;
/// `push` refuses the second one. Non-function entries are never checked.
#[derive(Debug, Clone)]
pub struct MergedAbi {
    name: String,
    entries: Vec<AbiEntry>,
    /* Function name -> unit that contributed it */
    functions: HashMap<String, String>,
}

impl MergedAbi {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            functions: HashMap::new(),
        }
    }

    /// Append an entry contributed by `unit`.
    ///
    /// Returns the collision, leaving `self` unchanged, when the entry is a
    /// named function that an earlier entry already defines.
    pub fn push(&mut self, unit: &str, entry: AbiEntry) -> Result<(), FunctionCollision> {
        if entry.is_function() {
            if let Some(name) = entry.name() {
                if let Some(first_unit) = self.functions.get(name) {
                    return Err(FunctionCollision {
                        name: name.to_string(),
                        first_unit: first_unit.clone(),
                    });
                }
                self.functions.insert(name.to_string(), unit.to_string());
            }
        }

        self.entries.push(entry);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<AbiEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /* Unit that contributed the named function, if any */
    pub fn function_source(&self, name: &str) -> Option<&str> {
        self.functions.get(name).map(String::as_str)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

/* Serializes as the bare entry list; the logical name is carried by the artifact path */
impl Serialize for MergedAbi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}
