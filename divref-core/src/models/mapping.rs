use std::collections::BTreeMap;

use super::variant::Variant;

///
/// A haplotype-space query translated into reference coordinates
///
#[derive(PartialEq, Debug, Clone)]
pub struct ReferenceMapping {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,

    /// Contiguous run of the haplotype's variants touched by the query
    pub variants_involved: Vec<Variant>,
    pub first_variant_index: Option<usize>,
    pub last_variant_index: Option<usize>,

    /// Per-population frequencies of `variants_involved`, in the same order
    pub population_frequencies: BTreeMap<String, Vec<f64>>,
}

impl ReferenceMapping {
    pub fn n_variants_involved(&self) -> usize {
        self.variants_involved.len()
    }

    ///
    /// Comma-joined identifiers of the involved variants
    ///
    pub fn variants_involved_str(&self) -> String {
        self.variants_involved
            .iter()
            .map(Variant::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}
