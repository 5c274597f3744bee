//! # Remapping divref search hits onto the reference genome
//!
//! Tools that search a divref FASTA report hits in the coordinates of the synthetic haplotype
//! sequences. This crate resolves each hit's haplotype against the divref index, translates
//! the hit into reference coordinates with [`divref_core`], and writes the hit table back out
//! with the reference coordinates, the variants each hit touches, and their population
//! frequencies.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use divref_remap::{HaplotypeIndex, RemapOptions, Remapper, Table, TableWrite};
//!
//! let index = HaplotypeIndex::from_manifest_path(Path::new("divref.index.toml")).unwrap();
//! let hits = Table::from_path(Path::new("hits.tsv"), '\t').unwrap();
//!
//! let remapped = Remapper::new(&index, RemapOptions::default()).remap(&hits).unwrap();
//! remapped.write_table_auto("hits.remapped.tsv", '\t').unwrap();
//! ```
pub mod config;
pub mod errors;
pub mod output;
pub mod remap;
pub mod store;
pub mod table;
pub mod utils;

// re-exports
pub use config::IndexManifest;
pub use errors::{RemapError, Result};
pub use output::TableWrite;
pub use remap::{InvalidIntervalPolicy, RemapOptions, Remapper, Strand};
pub use store::{HaplotypeIndex, IndexStore};
pub use table::Table;
