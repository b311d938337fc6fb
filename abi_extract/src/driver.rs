use crate::error::Result;
use crate::inspector::Inspector;
use crate::manifest::{ContractSource, ContractSpec, Manifest};
use crate::merge::merge;
use crate::writer::AbiWriter;
use std::path::PathBuf;
use tracing::info;

/* Artifact written for one logical contract */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub name: String,
    pub path: PathBuf,
    pub entries: usize,
}

/// Extract every contract in the manifest, in order.
///
/// Stops at the first failing contract. Artifacts already written for
/// earlier contracts are left in place.
pub fn run<I>(manifest: &Manifest, inspector: &I, writer: &AbiWriter) -> Result<Vec<WrittenArtifact>>
where
    I: Inspector + ?Sized,
{
    info!(
        contracts = manifest.contracts.len(),
        out_dir = %writer.out_dir().display(),
        "extracting ABIs"
    );

    let mut written = Vec::with_capacity(manifest.contracts.len());
    for contract in &manifest.contracts {
        written.push(extract_contract(contract, inspector, writer)?);
    }
    Ok(written)
}

/// Build and write the artifact for a single logical contract.
pub fn extract_contract<I>(
    contract: &ContractSpec,
    inspector: &I,
    writer: &AbiWriter,
) -> Result<WrittenArtifact>
where
    I: Inspector + ?Sized,
{
    let entries = match contract.source() {
        ContractSource::Passthrough(unit) => {
            info!(contract = %contract.name, unit, "passing through ABI");
            inspector.inspect(unit)?
        }
        ContractSource::Facets(facets) => {
            info!(contract = %contract.name, facets = facets.len(), "merging facet ABIs");
            merge(&contract.name, facets, inspector)?.into_entries()
        }
    };

    let path = writer.write(&contract.name, &entries)?;
    Ok(WrittenArtifact {
        name: contract.name.clone(),
        path,
        entries: entries.len(),
    })
}
