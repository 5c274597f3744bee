use std::collections::BTreeMap;

use super::interval::Interval;
use super::mapping::ReferenceMapping;
use super::variant::{Variant, parse_variant_list};
use crate::errors::{DivRefError, Result};
use crate::translate::{Side, VariantIntervals};

///
/// Population-level summary statistics carried alongside a haplotype
///
#[derive(PartialEq, Debug, Clone, Default)]
pub struct HaplotypeSummary {
    pub max_pop: Option<String>,
    pub popmax_empirical_af: Option<f64>,
    pub popmax_empirical_ac: Option<i64>,
    pub estimated_gnomad_af: Option<f64>,
    pub fraction_phased: Option<f64>,
    pub source: Option<String>,
}

///
/// One unparsed row of the haplotype table, as the index store holds it
///
#[derive(PartialEq, Debug, Clone, Default)]
pub struct HaplotypeRecord {
    pub sequence_id: String,
    pub sequence: String,
    pub sequence_length: usize,
    pub n_variants: usize,
    /// comma-joined `chrom:pos:ref:alt` tokens
    pub variants: String,
    /// population code paired with its comma-joined per-variant frequencies
    pub population_frequencies: Vec<(String, String)>,
    pub summary: HaplotypeSummary,
}

///
/// A parsed haplotype: its variants and the population frequencies aligned with them.
///
/// Construction validates the record once so that every later query can rely on a
/// non-empty variant list and frequency lists of matching length.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Haplotype {
    pub sequence_id: String,
    pub sequence: String,
    pub sequence_length: usize,
    pub summary: HaplotypeSummary,

    variants: Vec<Variant>,
    population_frequencies: BTreeMap<String, Vec<f64>>,
}

///
/// Decode one frequency token; `null`, `NA` and empty tokens mean "not observed".
///
pub fn parse_frequency(token: &str) -> Result<f64> {
    match token.trim() {
        "" | "null" | "NA" => Ok(0.0),
        t => t
            .parse::<f64>()
            .map_err(|_| DivRefError::MalformedFrequency(t.to_string())),
    }
}

pub fn parse_frequency_list(s: &str) -> Result<Vec<f64>> {
    s.split(',').map(parse_frequency).collect()
}

impl Haplotype {
    pub fn new(
        sequence_id: String,
        sequence: String,
        variants: Vec<Variant>,
        population_frequencies: BTreeMap<String, Vec<f64>>,
        summary: HaplotypeSummary,
    ) -> Result<Self> {
        if variants.is_empty() {
            return Err(DivRefError::EmptyHaplotype(sequence_id));
        }

        for (population, freqs) in population_frequencies.iter() {
            if freqs.len() != variants.len() {
                return Err(DivRefError::FrequencyCountMismatch {
                    id: sequence_id,
                    population: population.clone(),
                    expected: variants.len(),
                    found: freqs.len(),
                });
            }
        }

        Ok(Haplotype {
            sequence_id,
            sequence_length: sequence.len(),
            sequence,
            summary,
            variants,
            population_frequencies,
        })
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn n_variants(&self) -> usize {
        self.variants.len()
    }

    pub fn population_frequencies(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.population_frequencies
    }

    /// Comma-joined identifiers of every variant on the haplotype
    pub fn variants_str(&self) -> String {
        self.variants
            .iter()
            .map(Variant::render)
            .collect::<Vec<_>>()
            .join(",")
    }

    ///
    /// The chromosome the haplotype lies on
    ///
    pub fn contig(&self) -> &str {
        // non-empty by construction
        &self.variants[0].chromosome
    }

    pub fn variant_intervals(&self, context_size: i64) -> Vec<Interval> {
        VariantIntervals::build(&self.variants, context_size)
            .intervals()
            .to_vec()
    }

    ///
    /// Translate a half-open haplotype-space interval into reference coordinates.
    ///
    /// # Arguments
    ///
    /// - start: first haplotype-space coordinate of the query (0-based)
    /// - end: one past the last coordinate of the query
    /// - context_size: the window size the index was built with
    ///
    pub fn reference_mapping(
        &self,
        start: i64,
        end: i64,
        context_size: i64,
    ) -> Result<ReferenceMapping> {
        if start < 0 || start >= end {
            return Err(DivRefError::InvalidQueryInterval { start, end });
        }

        let intervals = VariantIntervals::build(&self.variants, context_size);
        let overlap = intervals.overlapping(start, end);

        let (variants_involved, population_frequencies) = match overlap {
            Some((first, last)) => (
                self.variants[first..=last].to_vec(),
                self.population_frequencies
                    .iter()
                    .map(|(pop, freqs)| (pop.clone(), freqs[first..=last].to_vec()))
                    .collect(),
            ),
            None => (
                Vec::new(),
                self.population_frequencies
                    .keys()
                    .map(|pop| (pop.clone(), Vec::new()))
                    .collect(),
            ),
        };

        Ok(ReferenceMapping {
            chromosome: self.contig().to_string(),
            start: intervals.to_reference(start, Side::Start),
            end: intervals.to_reference(end, Side::End),
            variants_involved,
            first_variant_index: overlap.map(|(first, _)| first),
            last_variant_index: overlap.map(|(_, last)| last),
            population_frequencies,
        })
    }
}

impl TryFrom<HaplotypeRecord> for Haplotype {
    type Error = DivRefError;

    fn try_from(record: HaplotypeRecord) -> Result<Self> {
        let variants = parse_variant_list(&record.variants)?;
        if variants.len() != record.n_variants {
            return Err(DivRefError::VariantCountMismatch {
                id: record.sequence_id,
                expected: record.n_variants,
                found: variants.len(),
            });
        }

        let population_frequencies = record
            .population_frequencies
            .iter()
            .map(|(pop, freqs)| Ok((pop.clone(), parse_frequency_list(freqs)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut haplotype = Haplotype::new(
            record.sequence_id,
            record.sequence,
            variants,
            population_frequencies,
            record.summary,
        )?;
        // keep the length declared by the table
        haplotype.sequence_length = record.sequence_length;

        Ok(haplotype)
    }
}
