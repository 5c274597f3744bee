//! Batch remapping of search hits from haplotype space onto the reference genome.
//!
//! Each input row names a haplotype (in its `chromosome` column) and a half-open interval in
//! that haplotype's sequence. Rows are processed in batches so the index store resolves many
//! ids per request; batch boundaries have no effect on the output.
use std::str::FromStr;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use divref_core::DivRefError;
use divref_core::models::{Haplotype, ReferenceMapping};

use crate::errors::{RemapError, Result};
use crate::store::{HaplotypeMap, IndexStore};
use crate::table::Table;

pub const CHROM_FIELD: &str = "chromosome";
pub const START_FIELD: &str = "coordinate_start";
pub const END_FIELD: &str = "coordinate_end";
pub const STRAND_FIELD: &str = "strand";
pub const PADDED_TARGET_FIELD: &str = "padded_target";
pub const TARGET_FIELD: &str = "unpadded_target_sequence";

pub const DEFAULT_BATCH_SIZE: usize = 25_000;

/// Columns appended to every remapped row, in order.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "divref_chromosome",
    "divref_start",
    "divref_end",
    "genome_build",
    "variants",
    "variants_involved",
    "n_variants_involved",
    "popmax_empirical_AF",
    "popmax_empirical_AC",
    "max_pop",
    "source",
    "population_frequencies",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(RemapError::InvalidStrand(other.to_string())),
        }
    }
}

///
/// One parsed query row
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    pub haplotype_id: &'a str,
    pub start: i64,
    pub end: i64,
    pub strand: Option<Strand>,
    /// bases the search tool reported in `padded_target` beyond the bare target
    pub padding: i64,
}

impl Query<'_> {
    ///
    /// The query interval widened by the padding.
    ///
    /// The padding always trails the target on the genomic plus strand, so it extends the end
    /// of forward hits and the start of reverse hits.
    ///
    pub fn padded_interval(&self) -> (i64, i64) {
        match self.strand {
            Some(Strand::Forward) => (self.start, self.end + self.padding),
            Some(Strand::Reverse) => (self.start - self.padding, self.end),
            None => (self.start, self.end),
        }
    }
}

/// What to do with a row whose interval is empty or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidIntervalPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone)]
pub struct RemapOptions {
    pub batch_size: usize,
    /// overrides the genome build the index declares
    pub genome_build: Option<String>,
    pub invalid_intervals: InvalidIntervalPolicy,
    pub show_progress: bool,
}

impl Default for RemapOptions {
    fn default() -> Self {
        RemapOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            genome_build: None,
            invalid_intervals: InvalidIntervalPolicy::default(),
            show_progress: false,
        }
    }
}

struct ColumnLayout {
    chrom: usize,
    start: usize,
    end: usize,
    /// strand, padded target and unpadded target, when all three are present
    padding: Option<[usize; 3]>,
    /// input columns that share a name with one of [`OUTPUT_COLUMNS`]
    outputs: [Option<usize>; OUTPUT_COLUMNS.len()],
}

fn parse_coordinate(column: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| RemapError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
}

fn parse_query<'r>(row: &'r [String], layout: &ColumnLayout) -> Result<Query<'r>> {
    let (strand, padding) = match layout.padding {
        Some([strand, padded, target]) => (
            Some(row[strand].parse::<Strand>()?),
            row[padded].len() as i64 - row[target].len() as i64,
        ),
        None => (None, 0),
    };

    Ok(Query {
        haplotype_id: row[layout.chrom].as_str(),
        start: parse_coordinate(START_FIELD, &row[layout.start])?,
        end: parse_coordinate(END_FIELD, &row[layout.end])?,
        strand,
        padding,
    })
}

fn render_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

///
/// Remaps query tables against an index store.
///
pub struct Remapper<'a, S: IndexStore + ?Sized> {
    store: &'a S,
    options: RemapOptions,
}

impl<'a, S: IndexStore + ?Sized> Remapper<'a, S> {
    pub fn new(store: &'a S, options: RemapOptions) -> Self {
        Remapper { store, options }
    }

    pub fn genome_build(&self) -> &str {
        self.options
            .genome_build
            .as_deref()
            .unwrap_or_else(|| self.store.genome_build())
    }

    ///
    /// Remap every row of `table`.
    ///
    /// Input columns are kept in place; the coordinate columns are overwritten with reference
    /// coordinates and their original values move to the `divref_*` columns appended at the
    /// end together with the rest of [`OUTPUT_COLUMNS`]. An input column already named like
    /// one of those is overwritten rather than repeated.
    ///
    pub fn remap(&self, table: &Table) -> Result<Table> {
        let [chrom, start, end] = table
            .require_columns([CHROM_FIELD, START_FIELD, END_FIELD])
            .map_err(RemapError::MissingColumns)?;

        let padding = table
            .require_columns([STRAND_FIELD, PADDED_TARGET_FIELD, TARGET_FIELD])
            .ok();
        if padding.is_none() {
            warn!(
                "Columns {}, {} and {} not all present; coordinates will not be adjusted for padding",
                STRAND_FIELD, PADDED_TARGET_FIELD, TARGET_FIELD
            );
        }

        let outputs = OUTPUT_COLUMNS.map(|name| table.column_index(name));
        for (name, slot) in OUTPUT_COLUMNS.iter().zip(&outputs) {
            if slot.is_some() {
                warn!("Input column {} will be overwritten with remapped values", name);
            }
        }

        let layout = ColumnLayout {
            chrom,
            start,
            end,
            padding,
            outputs,
        };

        info!(
            "Remapping DivRef coordinates, using window size {}",
            self.store.window_size()
        );
        info!(
            "Carrying frequencies for populations [{}]",
            self.store.populations().join(", ")
        );

        let batch_size = self.options.batch_size.max(1);
        let n_batches = table.len().div_ceil(batch_size);
        debug!("{} rows in {} batches", table.len(), n_batches);

        let pb = match self.options.show_progress {
            true => ProgressBar::new(n_batches as u64),
            false => ProgressBar::hidden(),
        };
        if let Ok(style) = ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
        ) {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.set_message("batches");

        let batches = table
            .rows
            .par_chunks(batch_size)
            .map(|batch| {
                let remapped = self.remap_batch(batch, &layout);
                pb.inc(1);
                remapped
            })
            .collect::<Result<Vec<_>>>()?;
        pb.finish_and_clear();

        let rows: Vec<Vec<String>> = batches.into_iter().flatten().collect();
        if rows.len() != table.len() {
            info!("Skipped {} rows", table.len() - rows.len());
        }

        let mut columns = table.columns.clone();
        columns.extend(
            OUTPUT_COLUMNS
                .iter()
                .zip(&layout.outputs)
                .filter(|(_, slot)| slot.is_none())
                .map(|(c, _)| c.to_string()),
        );

        Ok(Table { columns, rows })
    }

    fn resolve_batch(
        &self,
        batch: &[Vec<String>],
        layout: &ColumnLayout,
    ) -> Result<HaplotypeMap> {
        let mut ids: Vec<&str> = batch
            .iter()
            .map(|row| row[layout.chrom].as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let haplotypes = self.store.fetch(&ids)?;

        // a single unknown id means the query file and the index disagree
        if let Some(id) = batch
            .iter()
            .map(|row| row[layout.chrom].as_str())
            .find(|id| !haplotypes.contains_key(*id))
        {
            return Err(RemapError::UnresolvedHaplotype {
                id: id.to_string(),
                version: self.store.version().to_string(),
            });
        }

        Ok(haplotypes)
    }

    fn remap_batch(
        &self,
        batch: &[Vec<String>],
        layout: &ColumnLayout,
    ) -> Result<Vec<Vec<String>>> {
        let haplotypes = self.resolve_batch(batch, layout)?;

        let mut remapped = Vec::with_capacity(batch.len());
        for row in batch {
            let query = parse_query(row, layout)?;
            let haplotype = haplotypes.get(query.haplotype_id).ok_or_else(|| {
                RemapError::UnresolvedHaplotype {
                    id: query.haplotype_id.to_string(),
                    version: self.store.version().to_string(),
                }
            })?;

            let (start, end) = query.padded_interval();
            let mapping = match haplotype.reference_mapping(start, end, self.store.window_size())
            {
                Ok(mapping) => mapping,
                Err(DivRefError::InvalidQueryInterval { start, end })
                    if self.options.invalid_intervals == InvalidIntervalPolicy::Skip =>
                {
                    warn!(
                        "Skipping hit on haplotype {} with invalid interval [{}, {})",
                        query.haplotype_id, start, end
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            remapped.push(self.output_row(row, layout, haplotype, &mapping)?);
        }

        Ok(remapped)
    }

    fn output_row(
        &self,
        row: &[String],
        layout: &ColumnLayout,
        haplotype: &Haplotype,
        mapping: &ReferenceMapping,
    ) -> Result<Vec<String>> {
        let summary = &haplotype.summary;

        let mut out = row.to_vec();
        out[layout.chrom] = mapping.chromosome.clone();
        out[layout.start] = mapping.start.to_string();
        out[layout.end] = mapping.end.to_string();

        let values = [
            row[layout.chrom].clone(),
            row[layout.start].clone(),
            row[layout.end].clone(),
            self.genome_build().to_string(),
            haplotype.variants_str(),
            mapping.variants_involved_str(),
            mapping.n_variants_involved().to_string(),
            render_optional(summary.popmax_empirical_af),
            render_optional(summary.popmax_empirical_ac),
            render_optional(summary.max_pop.as_deref()),
            render_optional(summary.source.as_deref()),
            serde_json::to_string(&mapping.population_frequencies)?,
        ];

        // appended columns follow OUTPUT_COLUMNS order, clashing input columns are reused
        for (value, slot) in values.into_iter().zip(layout.outputs) {
            match slot {
                Some(i) => out[i] = value,
                None => out.push(value),
            }
        }

        Ok(out)
    }
}
