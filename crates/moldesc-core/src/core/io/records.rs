use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Streams output records as a YAML block sequence, one item per molecule.
///
/// Each record is flushed as soon as it is written, so a batch that stops early
/// leaves every completed record on disk.
pub struct RecordWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Writes one record.
    ///
    /// The first field opens a new list item and the remaining fields continue it.
    /// A record without fields is written as an explicit empty map (`- {}`), so the
    /// number of items always equals the number of records written.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn write_record<K: AsRef<str>>(&mut self, fields: &[(K, f64)]) -> io::Result<()> {
        if fields.is_empty() {
            writeln!(self.writer, "- {{}}")?;
        } else {
            for (i, (key, value)) in fields.iter().enumerate() {
                let marker = if i == 0 { "- " } else { "  " };
                writeln!(
                    self.writer,
                    "{}{}: {}",
                    marker,
                    key.as_ref(),
                    format_scalar(*value)
                )?;
            }
        }
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    pub fn write_empty(&mut self) -> io::Result<()> {
        self.write_record::<&str>(&[])
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Formats a scalar for an output record.
///
/// Integral values (counts) are written without a fractional part, other finite
/// values in their shortest round-trip form. Non-finite values use the YAML float
/// literals so they still read back as floats.
pub fn format_scalar(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { ".inf" } else { "-.inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        format!("{}", value as i64)
    } else {
        format!("{:?}", value)
    }
}

/// One descriptor of an engine catalog, as written by the catalog dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub description: String,
    pub names: Vec<String>,
}

/// Appends one entry to a catalog written as a YAML block sequence.
///
/// Each call emits a one-item sequence, so consecutive calls on the same writer
/// read back as a single list.
pub fn write_catalog_entry<W: Write>(
    writer: &mut W,
    entry: &CatalogEntry,
) -> Result<(), serde_yaml::Error> {
    serde_yaml::to_writer(writer, std::slice::from_ref(entry))
}
