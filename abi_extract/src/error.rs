//! Error types for ABI extraction

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The inspector could not produce an entry list for a unit.
#[derive(Error, Debug)]
pub enum InspectionError {
    /// The inspector program could not be started
    #[error("failed to run `{program}` for {unit}: {source}")]
    Spawn {
        unit: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The inspector exited unsuccessfully
    #[error("inspection of {unit} failed ({status}): {stderr}")]
    Failed {
        unit: String,
        status: String,
        stderr: String,
    },

    /// The inspector output is not a list of ABI entries
    #[error("inspection of {unit} returned unparseable output: {source}")]
    Parse {
        unit: String,
        #[source]
        source: serde_json::Error,
    },

    /// The unit is not known to the inspector
    #[error("unknown unit: {unit}")]
    UnknownUnit { unit: String },
}

impl InspectionError {
    /* Name of the unit that failed to inspect */
    pub fn unit(&self) -> &str {
        match self {
            InspectionError::Spawn { unit, .. }
            | InspectionError::Failed { unit, .. }
            | InspectionError::Parse { unit, .. }
            | InspectionError::UnknownUnit { unit } => unit,
        }
    }
}

/// Two facets merged under one contract define the same function, or one
/// facet defines it twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFunctionError {
    pub contract: String,
    pub name: String,
    pub first_unit: String,
    pub second_unit: String,
}

impl fmt::Display for DuplicateFunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function with same name found: {} ", self.name)?;
        if self.first_unit == self.second_unit {
            write!(f, "(defined twice by {} in {})", self.first_unit, self.contract)
        } else {
            write!(
                f,
                "(defined by both {} and {} in {})",
                self.first_unit, self.second_unit, self.contract
            )
        }
    }
}

impl std::error::Error for DuplicateFunctionError {}

/// Manifest loading and validation errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest format: {0}")]
    InvalidFormat(#[from] serde_yml::Error),

    #[error("manifest contract entry has an empty name")]
    EmptyName,

    #[error("contract {0} is listed more than once")]
    DuplicateContract(String),

    #[error("contract {0} has an empty facet list")]
    EmptyFacets(String),

    #[error("contract {0} sets both `unit` and `facets`")]
    AmbiguousSource(String),

    #[error("inspector program must not be empty")]
    EmptyProgram,
}

/// Main error type for ABI extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Inspection(#[from] InspectionError),

    #[error(transparent)]
    DuplicateFunction(#[from] DuplicateFunctionError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to serialize ABI for {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(first_unit: &str, second_unit: &str) -> DuplicateFunctionError {
        DuplicateFunctionError {
            contract: "NFTMinter".to_string(),
            name: "mint".to_string(),
            first_unit: first_unit.to_string(),
            second_unit: second_unit.to_string(),
        }
    }

    #[test]
    fn test_duplicate_across_facets_names_both() {
        assert_eq!(
            duplicate("MintFacet", "JackpotFacet").to_string(),
            "function with same name found: mint (defined by both MintFacet and JackpotFacet in NFTMinter)"
        );
    }

    #[test]
    fn test_duplicate_within_one_facet_names_it_once() {
        assert_eq!(
            duplicate("MintFacet", "MintFacet").to_string(),
            "function with same name found: mint (defined twice by MintFacet in NFTMinter)"
        );
    }

    #[test]
    fn test_transparent_wrapping_keeps_message() {
        let err = ExtractError::from(duplicate("MintFacet", "MintFacet"));
        assert!(err.to_string().ends_with("(defined twice by MintFacet in NFTMinter)"));
    }
}
