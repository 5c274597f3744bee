//! Access to the haplotype index built by the construction pipeline.
use std::path::Path;
use std::sync::Arc;

use fxhash::FxHashMap as HashMap;
use log::{debug, info};

use divref_core::models::{Haplotype, HaplotypeRecord, HaplotypeSummary};

use crate::config::IndexManifest;
use crate::errors::{RemapError, Result};
use crate::table::Table;

/// Prefix of the per-population frequency columns in the haplotype table.
pub const FREQUENCY_COLUMN_PREFIX: &str = "gnomAD_AF_";

const REQUIRED_INDEX_COLUMNS: [&str; 5] = [
    "sequence_id",
    "sequence",
    "sequence_length",
    "n_variants",
    "variants",
];

pub type HaplotypeMap = HashMap<String, Arc<Haplotype>>;

///
/// A queryable store of haplotype records.
///
/// Implementations must be shareable across the worker threads that process batches.
///
pub trait IndexStore: Send + Sync {
    /// Declared version of the index, used in diagnostics.
    fn version(&self) -> &str;

    /// Context size the index was built with. Authoritative for every translation.
    fn window_size(&self) -> i64;

    fn genome_build(&self) -> &str;

    /// Population codes with frequency evidence, sorted.
    fn populations(&self) -> &[String];

    ///
    /// Resolve a batch of haplotype ids. Ids the store does not know are left out of the
    /// returned map.
    ///
    fn fetch(&self, ids: &[&str]) -> Result<HaplotypeMap>;
}

///
/// An index held entirely in memory, keyed by sequence id.
///
#[derive(Debug, Clone)]
pub struct HaplotypeIndex {
    version: String,
    window_size: i64,
    genome_build: String,
    populations: Vec<String>,
    haplotypes: HaplotypeMap,
}

fn optional_value(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "NA" | "null" | "NaN" | "nan" => None,
        v => Some(v),
    }
}

fn parse_optional<T: std::str::FromStr>(column: &str, value: &str) -> Result<Option<T>> {
    optional_value(value)
        .map(|v| {
            v.parse::<T>().map_err(|_| RemapError::InvalidValue {
                column: column.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

fn parse_required<T: std::str::FromStr>(column: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| RemapError::InvalidValue {
        column: column.to_string(),
        value: value.to_string(),
    })
}

impl HaplotypeIndex {
    ///
    /// Build an index from already-parsed haplotypes
    ///
    pub fn from_records<I>(
        version: &str,
        window_size: i64,
        genome_build: &str,
        haplotypes: I,
    ) -> Self
    where
        I: IntoIterator<Item = Haplotype>,
    {
        let haplotypes: HaplotypeMap = haplotypes
            .into_iter()
            .map(|h| (h.sequence_id.clone(), Arc::new(h)))
            .collect();

        let mut populations: Vec<String> = haplotypes
            .values()
            .next()
            .map(|h| h.population_frequencies().keys().cloned().collect())
            .unwrap_or_default();
        populations.sort();

        HaplotypeIndex {
            version: version.to_string(),
            window_size,
            genome_build: genome_build.to_string(),
            populations,
            haplotypes,
        }
    }

    ///
    /// Load the haplotype table a manifest points at
    ///
    pub fn from_manifest(manifest: &IndexManifest) -> Result<Self> {
        info!(
            "Loading haplotype index {} from {}",
            manifest.version,
            manifest.haplotypes.display()
        );

        let table = Table::from_path(&manifest.haplotypes, '\t')?;
        let index = HaplotypeIndex::from_table(
            &table,
            &manifest.version,
            manifest.window_size,
            &manifest.genome_build,
        )?;

        info!(
            "Loaded {} haplotypes across populations [{}]",
            index.len(),
            index.populations.join(", ")
        );

        Ok(index)
    }

    ///
    /// Load the index described by the manifest at `path`
    ///
    pub fn from_manifest_path(path: &Path) -> Result<Self> {
        let manifest = IndexManifest::try_from(path)?;
        HaplotypeIndex::from_manifest(&manifest)
    }

    ///
    /// Parse every row of a haplotype table
    ///
    pub fn from_table(
        table: &Table,
        version: &str,
        window_size: i64,
        genome_build: &str,
    ) -> Result<Self> {
        let [id_col, seq_col, len_col, n_col, variants_col] = table
            .require_columns(REQUIRED_INDEX_COLUMNS)
            .map_err(RemapError::MissingIndexColumns)?;

        let population_columns: Vec<(String, usize)> = table
            .columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                c.strip_prefix(FREQUENCY_COLUMN_PREFIX)
                    .map(|pop| (pop.to_string(), i))
            })
            .collect();
        debug!(
            "Found {} population frequency columns",
            population_columns.len()
        );

        let summary_col = |name: &str| table.column_index(name);
        let max_pop_col = summary_col("max_pop");
        let af_col = summary_col("popmax_empirical_AF");
        let ac_col = summary_col("popmax_empirical_AC");
        let est_col = summary_col("estimated_gnomad_AF");
        let phased_col = summary_col("fraction_phased");
        let source_col = summary_col("source");

        let mut haplotypes = HaplotypeMap::default();
        haplotypes.reserve(table.len());

        for row in table.rows.iter() {
            let cell = |col: Option<usize>| col.map_or("", |i| row[i].as_str());

            let summary = HaplotypeSummary {
                max_pop: optional_value(cell(max_pop_col)).map(str::to_string),
                popmax_empirical_af: parse_optional("popmax_empirical_AF", cell(af_col))?,
                popmax_empirical_ac: parse_optional("popmax_empirical_AC", cell(ac_col))?,
                estimated_gnomad_af: parse_optional("estimated_gnomad_AF", cell(est_col))?,
                fraction_phased: parse_optional("fraction_phased", cell(phased_col))?,
                source: optional_value(cell(source_col)).map(str::to_string),
            };

            let record = HaplotypeRecord {
                sequence_id: row[id_col].clone(),
                sequence: row[seq_col].clone(),
                sequence_length: parse_required("sequence_length", &row[len_col])?,
                n_variants: parse_required("n_variants", &row[n_col])?,
                variants: row[variants_col].clone(),
                population_frequencies: population_columns
                    .iter()
                    .map(|(pop, i)| (pop.clone(), row[*i].clone()))
                    .collect(),
                summary,
            };

            let haplotype = Haplotype::try_from(record)?;
            haplotypes.insert(haplotype.sequence_id.clone(), Arc::new(haplotype));
        }

        let mut populations: Vec<String> =
            population_columns.into_iter().map(|(pop, _)| pop).collect();
        populations.sort();

        Ok(HaplotypeIndex {
            version: version.to_string(),
            window_size,
            genome_build: genome_build.to_string(),
            populations,
            haplotypes,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Haplotype>> {
        self.haplotypes.get(id)
    }

    pub fn len(&self) -> usize {
        self.haplotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haplotypes.is_empty()
    }
}

impl IndexStore for HaplotypeIndex {
    fn version(&self) -> &str {
        &self.version
    }

    fn window_size(&self) -> i64 {
        self.window_size
    }

    fn genome_build(&self) -> &str {
        &self.genome_build
    }

    fn populations(&self) -> &[String] {
        &self.populations
    }

    fn fetch(&self, ids: &[&str]) -> Result<HaplotypeMap> {
        Ok(ids
            .iter()
            .filter_map(|id| {
                self.haplotypes
                    .get(*id)
                    .map(|h| (id.to_string(), Arc::clone(h)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const HAPLOTYPES: &str = "\
sequence_id\tsequence\tsequence_length\tn_variants\tvariants\tmax_pop\tpopmax_empirical_AF\tpopmax_empirical_AC\tsource\tgnomAD_AF_afr\tgnomAD_AF_nfe
0\tACGTACGT\t8\t2\tchr1:500:A:T,chr1:505:C:G\tafr\t0.25\t50\tHGDP_haplotype\t0.10000,0.20000\tnull,0.01000
1\tTTTT\t4\t1\tchr2:100:G:GA\tNA\tNA\t\tgnomAD_variant\t0.30000\t0.40000
";

    #[fixture]
    fn index() -> HaplotypeIndex {
        let table = Table::from_reader(Cursor::new(HAPLOTYPES), '\t', "haplotypes").unwrap();
        HaplotypeIndex::from_table(&table, "v1", 10, "GRCh38").unwrap()
    }

    #[rstest]
    fn test_from_table(index: HaplotypeIndex) {
        assert_eq!(index.len(), 2);
        assert_eq!(index.populations(), &["afr".to_string(), "nfe".to_string()]);

        let hap = index.get("0").unwrap();
        assert_eq!(hap.n_variants(), 2);
        assert_eq!(hap.sequence_length, 8);
        assert_eq!(hap.population_frequencies()["nfe"], vec![0.0, 0.01]);
        assert_eq!(hap.summary.max_pop.as_deref(), Some("afr"));
        assert_eq!(hap.summary.popmax_empirical_af, Some(0.25));
        assert_eq!(hap.summary.popmax_empirical_ac, Some(50));
        assert_eq!(hap.summary.estimated_gnomad_af, None);

        let hap = index.get("1").unwrap();
        assert_eq!(hap.summary.max_pop, None);
        assert_eq!(hap.summary.popmax_empirical_af, None);
        assert_eq!(hap.summary.popmax_empirical_ac, None);
        assert_eq!(hap.summary.source.as_deref(), Some("gnomAD_variant"));
    }

    #[rstest]
    fn test_fetch_leaves_out_unknown_ids(index: HaplotypeIndex) {
        let found = index.fetch(&["1", "missing", "0"]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains_key("0"));
        assert!(!found.contains_key("missing"));
        assert_eq!(index.version(), "v1");
        assert_eq!(index.window_size(), 10);
        assert_eq!(index.genome_build(), "GRCh38");
    }

    #[rstest]
    fn test_missing_index_columns() {
        let table =
            Table::from_reader(Cursor::new("sequence_id\tsequence\n"), '\t', "bad").unwrap();
        let result = HaplotypeIndex::from_table(&table, "v1", 10, "GRCh38");
        match result {
            Err(RemapError::MissingIndexColumns(missing)) => {
                assert_eq!(missing, vec!["sequence_length", "n_variants", "variants"])
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    fn test_bad_summary_value() {
        let data = "sequence_id\tsequence\tsequence_length\tn_variants\tvariants\tpopmax_empirical_AC\n\
                    0\tA\t1\t1\t1:5:A:T\tmany\n";
        let table = Table::from_reader(Cursor::new(data), '\t', "bad").unwrap();
        assert!(matches!(
            HaplotypeIndex::from_table(&table, "v1", 10, "GRCh38"),
            Err(RemapError::InvalidValue { .. })
        ));
    }

    #[rstest]
    fn test_from_records() {
        let hap = Haplotype::try_from(HaplotypeRecord {
            sequence_id: "7".to_string(),
            n_variants: 1,
            variants: "1:5:A:T".to_string(),
            population_frequencies: vec![
                ("sas".to_string(), "0.1".to_string()),
                ("afr".to_string(), "0.2".to_string()),
            ],
            ..Default::default()
        })
        .unwrap();

        let index = HaplotypeIndex::from_records("v3", 5, "GRCh38", vec![hap]);
        assert_eq!(index.populations(), &["afr".to_string(), "sas".to_string()]);
        assert!(index.get("7").is_some());
    }
}
