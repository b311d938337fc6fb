use crate::error::ManifestError;
use crate::writer::DEFAULT_OUTPUT_DIR;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/* Manifest file looked up in the working directory when none is given */
pub const DEFAULT_MANIFEST: &str = "abi-manifest.yaml";

fn default_program() -> String {
    "forge".to_string()
}

fn default_args() -> Vec<String> {
    vec!["inspect".to_string(), "{unit}".to_string(), "abi".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/* ============================================================================
   Inspector Configuration
   ============================================================================ */

/* Command used to inspect a unit; `{unit}` in args is replaced by the unit name */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InspectorConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

/* ============================================================================
   Contract Entries
   ============================================================================ */

/* Where a logical contract's ABI comes from */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractSource<'a> {
    /* A single unit written unmodified */
    Passthrough(&'a str),
    /* Facets merged in order */
    Facets(&'a [String]),
}

/* One logical output of the manifest */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContractSpec {
    /* Logical name; also the artifact file stem */
    pub name: String,

    /* Unit to pass through; defaults to `name` */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /* Facet units to merge, in order */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
}

impl ContractSpec {
    pub fn passthrough(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: None,
            facets: None,
        }
    }

    pub fn merged(name: &str, facets: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            unit: None,
            facets: Some(facets.iter().map(|f| f.to_string()).collect()),
        }
    }

    pub fn source(&self) -> ContractSource<'_> {
        match &self.facets {
            Some(facets) => ContractSource::Facets(facets),
            None => ContractSource::Passthrough(self.unit.as_deref().unwrap_or(&self.name)),
        }
    }
}

/* ============================================================================
   Manifest
   ============================================================================ */

/// The list of logical contracts to extract, processed top to bottom.
///
/// Relative paths are resolved against the working directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /* Directory the inspector runs in; the working directory when absent */
    #[serde(default)]
    pub project_dir: Option<PathBuf>,

    #[serde(default)]
    pub inspector: InspectorConfig,

    #[serde(default)]
    pub contracts: Vec<ContractSpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            project_dir: None,
            inspector: InspectorConfig::default(),
            contracts: Vec::new(),
        }
    }
}

impl Manifest {
    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_yml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.inspector.program.trim().is_empty() {
            return Err(ManifestError::EmptyProgram);
        }

        let mut seen = HashSet::new();
        for contract in &self.contracts {
            if contract.name.trim().is_empty() {
                return Err(ManifestError::EmptyName);
            }
            if !seen.insert(contract.name.as_str()) {
                return Err(ManifestError::DuplicateContract(contract.name.clone()));
            }
            match (&contract.unit, &contract.facets) {
                (Some(_), Some(_)) => {
                    return Err(ManifestError::AmbiguousSource(contract.name.clone()))
                }
                (None, Some(facets)) if facets.is_empty() => {
                    return Err(ManifestError::EmptyFacets(contract.name.clone()))
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_yaml(
            r#"
output-dir: out/abis
project-dir: contracts
inspector:
  program: /usr/local/bin/forge
  args: ["inspect", "{unit}", "abi", "--json"]
contracts:
  - name: AuctionHouse
  - name: Token
    unit: ERC20Token
  - name: NFTMinter
    facets: [JackpotFacet, MinterConfigsFacet, MintFacet]
"#,
        )
        .unwrap();

        assert_eq!(manifest.output_dir, PathBuf::from("out/abis"));
        assert_eq!(manifest.project_dir, Some(PathBuf::from("contracts")));
        assert_eq!(manifest.inspector.program, "/usr/local/bin/forge");
        assert_eq!(manifest.inspector.args.len(), 4);

        let sources: Vec<_> = manifest.contracts.iter().map(|c| c.source()).collect();
        assert_eq!(sources[0], ContractSource::Passthrough("AuctionHouse"));
        assert_eq!(sources[1], ContractSource::Passthrough("ERC20Token"));
        match sources[2] {
            ContractSource::Facets(facets) => {
                assert_eq!(facets, ["JackpotFacet", "MinterConfigsFacet", "MintFacet"])
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let manifest = Manifest::from_yaml("contracts:\n  - name: NFT\n").unwrap();

        assert_eq!(manifest.output_dir, PathBuf::from("abis"));
        assert_eq!(manifest.project_dir, None);
        assert_eq!(manifest.inspector, InspectorConfig::default());
        assert_eq!(manifest.inspector.args, vec!["inspect", "{unit}", "abi"]);
    }

    #[test]
    fn test_partial_inspector_section_keeps_default_args() {
        let manifest =
            Manifest::from_yaml("inspector:\n  program: ./forge\ncontracts: []\n").unwrap();

        assert_eq!(manifest.inspector.program, "./forge");
        assert_eq!(manifest.inspector.args, default_args());
    }

    #[test]
    fn test_rejects_duplicate_contract() {
        let err = Manifest::from_yaml("contracts:\n  - name: NFT\n  - name: NFT\n").unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateContract(name) if name == "NFT"));
    }

    #[test]
    fn test_rejects_empty_facets() {
        let err = Manifest::from_yaml("contracts:\n  - name: Game\n    facets: []\n").unwrap_err();
        assert!(matches!(err, ManifestError::EmptyFacets(_)));
    }

    #[test]
    fn test_rejects_unit_and_facets() {
        let err = Manifest::from_yaml(
            "contracts:\n  - name: Game\n    unit: Game\n    facets: [CardsFacet]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::AmbiguousSource(_)));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = Manifest::from_yaml("contracts:\n  - name: \"\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::EmptyName));
    }

    #[test]
    fn test_rejects_unknown_contract_key() {
        let err =
            Manifest::from_yaml("contracts:\n  - name: Game\n    facet: [CardsFacet]\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_misspelled_top_level_key() {
        let err = Manifest::from_yaml("output_dir: build/abis\ncontracts: []\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidFormat(_)));

        let err = Manifest::from_yaml("projectdir: contracts\ncontracts: []\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_unknown_inspector_key() {
        let err = Manifest::from_yaml("inspector:\n  programme: forge\ncontracts: []\n")
            .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidFormat(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/abi-manifest.yaml")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
