use clap::{Command, arg, value_parser};

pub const REMAP_CMD: &str = "remap";

pub fn create_remap_cli() -> Command {
    Command::new(REMAP_CMD)
        .author("DivRef")
        .about("Remap hits on divref haplotype sequences onto the reference genome")
        .arg_required_else_help(true)
        .arg(arg!(<input> "Path to the hits file (e.g. CALITAS output)"))
        .arg(arg!(<output> "Path to the remapped output file (.gz to compress)"))
        .arg(arg!(-i --index <index> "Path to the divref index manifest (TOML)").required(true))
        .arg(arg!(-s --sep <sep> "Separator in the file").default_value("\t"))
        .arg(
            arg!(-b --"batch-size" <batch_size> "Number of rows to process in each batch [default: 25000]")
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(--"genome-build" <genome_build> "Genome build to report instead of the one recorded in the index"))
        .arg(arg!(--"skip-invalid" "Skip hits with empty or negative intervals instead of aborting"))
        .arg(arg!(--progress "Show a progress bar"))
}
