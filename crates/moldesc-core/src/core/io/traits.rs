use crate::core::models::molecule::Molecule;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading multi-record structure files.
///
/// A structure file is an ordered sequence of molecules consumed once, forward
/// only. Implementors expose it as an iterator of per-record results so that a
/// malformed record can be reported without ending the iteration.
pub trait StructureFile {
    /// The error type for a single record or an underlying I/O failure.
    type Error: Error + From<io::Error>;

    /// The record iterator produced over a buffered reader.
    type Records<R: BufRead>: Iterator<Item = Result<Molecule, Self::Error>>;

    /// Creates a record iterator over a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read records from.
    ///
    /// # Return
    ///
    /// Returns an iterator yielding one `Result` per record, in file order.
    fn records<R: BufRead>(reader: R) -> Self::Records<R>;

    /// Opens a file and creates a record iterator over it.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the structure file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened. Per-record parse failures are
    /// reported later, by the iterator.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self::Records<BufReader<File>>, Self::Error> {
        let file = File::open(path)?;
        Ok(Self::records(BufReader::new(file)))
    }
}
