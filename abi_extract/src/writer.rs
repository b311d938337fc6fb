use crate::error::{ExtractError, Result};
use abi_types::AbiEntry;
use std::path::{Path, PathBuf};
use tracing::info;

/* Output directory used when the manifest does not name one */
pub const DEFAULT_OUTPUT_DIR: &str = "abis";

/// Render an entry list as the artifact text: two-space indented JSON with
/// each entry's keys in inspector order.
pub fn render(name: &str, entries: &[AbiEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(|source| ExtractError::Serialize {
        name: name.to_string(),
        source,
    })
}

/// Persists ABI artifacts as `<out_dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct AbiWriter {
    out_dir: PathBuf,
}

impl AbiWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{}.json", name))
    }

    /// Write the artifact for `name`, replacing any previous one.
    ///
    /// The text is rendered fully before the file is touched.
    pub fn write(&self, name: &str, entries: &[AbiEntry]) -> Result<PathBuf> {
        let content = render(name, entries)?;

        std::fs::create_dir_all(&self.out_dir).map_err(|source| ExtractError::Io {
            path: self.out_dir.clone(),
            source,
        })?;

        let path = self.artifact_path(name);
        std::fs::write(&path, content).map_err(|source| ExtractError::Io {
            path: path.clone(),
            source,
        })?;

        info!(contract = name, entries = entries.len(), path = %path.display(), "wrote ABI");
        Ok(path)
    }
}

impl Default for AbiWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<AbiEntry> {
        vec![
            AbiEntry::function("mint")
                .with_field("inputs", json!([{"name": "to", "type": "address"}]))
                .with_field("outputs", json!([]))
                .with_field("stateMutability", json!("nonpayable")),
            AbiEntry::event("Minted").with_field("anonymous", json!(false)),
        ]
    }

    #[test]
    fn test_render_format() {
        let rendered = render("X", &[AbiEntry::function("claim")]).unwrap();
        assert_eq!(
            rendered,
            "[\n  {\n    \"type\": \"function\",\n    \"name\": \"claim\"\n  }\n]"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render("X", &[]).unwrap(), "[]");
    }

    #[test]
    fn test_render_is_deterministic() {
        let entries = sample_entries();
        assert_eq!(render("X", &entries).unwrap(), render("X", &entries).unwrap());
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let writer = AbiWriter::new(dir.path().join("nested").join("abis"));

        let path = writer.write("NFTMinter", &sample_entries()).unwrap();

        assert_eq!(path, writer.out_dir().join("NFTMinter.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render("NFTMinter", &sample_entries()).unwrap());
    }

    #[test]
    fn test_write_overwrites_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let writer = AbiWriter::new(dir.path());

        writer.write("Game", &sample_entries()).unwrap();
        let path = writer.write("Game", &[AbiEntry::function("play")]).unwrap();

        let written: Vec<AbiEntry> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, vec![AbiEntry::function("play")]);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("abis");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = AbiWriter::new(&blocker)
            .write("Game", &sample_entries())
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
