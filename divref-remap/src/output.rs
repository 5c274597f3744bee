use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::errors::Result;
use crate::table::Table;
use crate::utils::{is_gzipped, separator_byte};

pub trait TableWrite {
    ///
    /// Write the table, header first, to any writer. Fields holding the separator, quotes or
    /// newlines are quoted.
    ///
    /// # Arguments
    /// - writer: destination
    /// - sep: field separator
    fn write_table_to<W: Write>(&self, writer: &mut W, sep: char) -> Result<()>;

    ///
    /// Write the table to disk as plain text
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - sep: field separator
    fn write_table<T: AsRef<Path>>(&self, path: T, sep: char) -> Result<()>;

    ///
    /// Write the table to disk gzip-compressed
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - sep: field separator
    fn write_table_gz<T: AsRef<Path>>(&self, path: T, sep: char) -> Result<()>;

    ///
    /// Write the table, compressing when the path ends in `.gz`
    ///
    fn write_table_auto<T: AsRef<Path>>(&self, path: T, sep: char) -> Result<()> {
        match is_gzipped(path.as_ref()) {
            true => self.write_table_gz(path, sep),
            false => self.write_table(path, sep),
        }
    }
}

fn create_with_parents(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path)
}

impl TableWrite for Table {
    fn write_table_to<W: Write>(&self, writer: &mut W, sep: char) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .delimiter(separator_byte(sep)?)
            .from_writer(writer);

        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;

        Ok(())
    }

    fn write_table<T: AsRef<Path>>(&self, path: T, sep: char) -> Result<()> {
        let file = create_with_parents(path.as_ref())?;
        let mut writer = BufWriter::new(file);

        self.write_table_to(&mut writer, sep)?;

        writer.flush()?;
        Ok(())
    }

    fn write_table_gz<T: AsRef<Path>>(&self, path: T, sep: char) -> Result<()> {
        let file = create_with_parents(path.as_ref())?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

        self.write_table_to(&mut encoder, sep)?;

        encoder.finish()?.flush()?;
        Ok(())
    }
}
