use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{RemapError, Result};

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz")) || path.extension() == Some(OsStr::new("bgz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// The byte form of a field separator, as the csv reader and writer take it.
///
pub(crate) fn separator_byte(sep: char) -> Result<u8> {
    match sep.is_ascii() {
        true => Ok(sep as u8),
        false => Err(RemapError::InvalidSeparator(sep.to_string())),
    }
}

///
/// Interpret a separator given on the command line. `\t` and `tab` both mean a tab.
///
pub fn parse_separator(sep: &str) -> Result<char> {
    match sep {
        "\\t" | "tab" => Ok('\t'),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c),
                _ => Err(RemapError::InvalidSeparator(s.to_string())),
            }
        }
    }
}
