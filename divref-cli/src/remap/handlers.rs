use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use divref_remap::remap::DEFAULT_BATCH_SIZE;
use divref_remap::utils::parse_separator;
use divref_remap::{
    HaplotypeIndex, InvalidIntervalPolicy, RemapOptions, Remapper, Table, TableWrite,
};

pub fn run_remap(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an input file is required.")?;

    let output = matches
        .get_one::<String>("output")
        .context("A path to an output file is required.")?;

    let index = matches
        .get_one::<String>("index")
        .context("A path to an index manifest is required.")?;

    let sep = matches
        .get_one::<String>("sep")
        .map_or(Ok('\t'), |s| parse_separator(s))?;

    let batch_size = matches
        .get_one::<usize>("batch-size")
        .copied()
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let invalid_intervals = match matches.get_flag("skip-invalid") {
        true => InvalidIntervalPolicy::Skip,
        false => InvalidIntervalPolicy::Abort,
    };

    let options = RemapOptions {
        batch_size,
        genome_build: matches.get_one::<String>("genome-build").cloned(),
        invalid_intervals,
        show_progress: matches.get_flag("progress"),
    };

    let index = HaplotypeIndex::from_manifest_path(Path::new(index))
        .with_context(|| format!("Failed to load divref index from {}", index))?;

    let table = Table::from_path(Path::new(input), sep)
        .with_context(|| format!("Failed to read hits from {}", input))?;
    info!("Read {} hits from {}", table.len(), input);

    let remapped = Remapper::new(&index, options).remap(&table)?;

    remapped
        .write_table_auto(output, sep)
        .with_context(|| format!("Failed to write remapped hits to {}", output))?;
    info!("Wrote {} remapped hits to {}", remapped.len(), output);

    Ok(())
}
