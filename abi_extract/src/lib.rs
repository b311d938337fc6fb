//! Facet ABI Extraction
//!
//! This crate inspects contract units with an external tool, merges the
//! ABIs of facets that share a proxy into a single entry list, and writes
//! one ABI artifact per logical contract listed in a manifest.

pub mod driver;
pub mod error;
pub mod inspector;
pub mod manifest;
pub mod merge;
pub mod writer;

// Re-export commonly used types at the crate root
pub use driver::{extract_contract, run, WrittenArtifact};
pub use error::{DuplicateFunctionError, ExtractError, InspectionError, ManifestError, Result};
pub use inspector::{parse_entries, ForgeInspector, Inspector, StaticInspector};
pub use manifest::{ContractSource, ContractSpec, InspectorConfig, Manifest, DEFAULT_MANIFEST};
pub use merge::{merge, merge_entries};
pub use writer::{render, AbiWriter, DEFAULT_OUTPUT_DIR};

// Re-export abi_types for convenience
pub use abi_types;
