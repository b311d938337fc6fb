//! Contract Inspection
//!
//! An `Inspector` turns a unit name into the list of ABI entries the unit
//! exposes. The production implementation shells out to `forge inspect`;
//! the static implementation serves fixed entry lists.

use crate::error::InspectionError;
use crate::manifest::InspectorConfig;
use abi_types::AbiEntry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/* Placeholder in inspector arguments replaced by the unit name */
pub const UNIT_PLACEHOLDER: &str = "{unit}";

/* Source of ABI entries for named units */
pub trait Inspector {
    /* Return the ABI entries of `unit` in the order the tool reports them */
    fn inspect(&self, unit: &str) -> Result<Vec<AbiEntry>, InspectionError>;
}

impl<T: Inspector + ?Sized> Inspector for &T {
    fn inspect(&self, unit: &str) -> Result<Vec<AbiEntry>, InspectionError> {
        (**self).inspect(unit)
    }
}

/* ============================================================================
   Command-backed Inspector
   ============================================================================ */

/// Runs an external inspection command once per unit and parses its stdout
/// as a JSON array of ABI entries.
pub struct ForgeInspector {
    program: String,
    args: Vec<String>,
    project_dir: Option<PathBuf>,
}

impl ForgeInspector {
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            project_dir: None,
        }
    }

    /* Run the command inside `dir` instead of the current directory */
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /* Arguments for a single unit, with every placeholder substituted */
    pub fn command_args(&self, unit: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(UNIT_PLACEHOLDER, unit))
            .collect()
    }
}

impl Default for ForgeInspector {
    fn default() -> Self {
        Self::new(&InspectorConfig::default())
    }
}

impl Inspector for ForgeInspector {
    fn inspect(&self, unit: &str) -> Result<Vec<AbiEntry>, InspectionError> {
        let args = self.command_args(unit);
        debug!(unit, program = %self.program, ?args, "inspecting unit");

        let mut command = Command::new(&self.program);
        command.args(&args);
        if let Some(dir) = &self.project_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| InspectionError::Spawn {
            unit: unit.to_string(),
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(InspectionError::Failed {
                unit: unit.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let entries = parse_entries(unit, &output.stdout)?;
        debug!(unit, entries = entries.len(), "inspected unit");
        Ok(entries)
    }
}

/// Parse raw inspector output for `unit`.
pub fn parse_entries(unit: &str, output: &[u8]) -> Result<Vec<AbiEntry>, InspectionError> {
    serde_json::from_slice(output).map_err(|source| InspectionError::Parse {
        unit: unit.to_string(),
        source,
    })
}

/* ============================================================================
   Static Inspector
   ============================================================================ */

/* Serves pre-loaded entry lists; unknown units fail like an unknown contract would */
#[derive(Debug, Clone, Default)]
pub struct StaticInspector {
    units: HashMap<String, Vec<AbiEntry>>,
}

impl StaticInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: &str, entries: Vec<AbiEntry>) -> Self {
        self.units.insert(unit.to_string(), entries);
        self
    }
}

impl Inspector for StaticInspector {
    fn inspect(&self, unit: &str) -> Result<Vec<AbiEntry>, InspectionError> {
        self.units
            .get(unit)
            .cloned()
            .ok_or_else(|| InspectionError::UnknownUnit {
                unit: unit.to_string(),
            })
    }
}
