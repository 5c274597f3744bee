use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::RemapError;

pub const DEFAULT_GENOME_BUILD: &str = "GRCh38";

fn default_genome_build() -> String {
    DEFAULT_GENOME_BUILD.to_string()
}

///
/// Describes a built index: where its haplotype table lives and how it was built.
///
/// ```toml
/// version = "divref-1.0"
/// window_size = 25
/// genome_build = "GRCh38"
/// haplotypes = "haplotypes.tsv.gz"
/// ```
///
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct IndexManifest {
    pub version: String,
    /// context size the haplotype sequences were built with
    pub window_size: i64,
    #[serde(default = "default_genome_build")]
    pub genome_build: String,
    /// relative paths are resolved against the manifest's directory
    pub haplotypes: PathBuf,
}

impl TryFrom<&Path> for IndexManifest {
    type Error = RemapError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let mut manifest: IndexManifest = toml::from_str(&toml_str)?;

        if manifest.window_size < 0 {
            return Err(RemapError::InvalidValue {
                column: "window_size".to_string(),
                value: manifest.window_size.to_string(),
            });
        }

        if manifest.haplotypes.is_relative() {
            if let Some(parent) = path.parent() {
                manifest.haplotypes = parent.join(&manifest.haplotypes);
            }
        }

        Ok(manifest)
    }
}
