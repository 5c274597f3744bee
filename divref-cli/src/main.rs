mod remap;

use anyhow::Result;
use clap::{Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "divref";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("DivRef")
        .about("Tools for working with divref haplotype references: remap hits on synthetic haplotype sequences back onto the reference genome.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose ... "Increase logging verbosity (-v debug, -vv trace)").global(true))
        .subcommand(remap::cli::create_remap_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, refines the level chosen on the command line
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // REMAP
        //
        Some((remap::cli::REMAP_CMD, matches)) => {
            remap::handlers::run_remap(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
