//! # Core models for divref
//!
//! A divref index stores synthetic haplotype sequences: stretches of reference genome with a
//! set of commonly co-occurring variants substituted in. Tools that search those sequences
//! report hits in haplotype coordinates. This crate turns such hits back into reference
//! coordinates and reports which of the haplotype's variants a hit touches, together with the
//! population frequencies of those variants.
//!
//! ```rust
//! use divref_core::models::{Haplotype, HaplotypeRecord};
//!
//! let record = HaplotypeRecord {
//!     sequence_id: "0".to_string(),
//!     n_variants: 2,
//!     variants: "chr1:500:A:T,chr1:505:CC:G".to_string(),
//!     population_frequencies: vec![("afr".to_string(), "0.1,null".to_string())],
//!     ..Default::default()
//! };
//! let haplotype = Haplotype::try_from(record).unwrap();
//!
//! // haplotype coordinate 0 sits `context_size` bases before the first variant
//! let mapping = haplotype.reference_mapping(12, 17, 10).unwrap();
//! assert_eq!((mapping.start, mapping.end), (502, 508));
//! assert_eq!(mapping.variants_involved_str(), "chr1:505:CC:G");
//! assert_eq!(mapping.population_frequencies["afr"], vec![0.0]);
//! ```
pub mod errors;
pub mod models;
pub mod sequence;
pub mod translate;

pub use errors::{DivRefError, Result};
