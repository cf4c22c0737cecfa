use crate::core::models::system::MolecularSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;

/// A structure file format that can be loaded into a [`MolecularSystem`].
///
/// Only [`read_from`](MolecularFile::read_from) has to be implemented; the path and
/// string entry points forward to it. Readers never write structures back out.
pub trait MolecularFile {
    /// Format-specific information that does not fit the structure model.
    type Metadata;

    /// Failure type of the reader. I/O errors must convert into it.
    type Error: Error + From<io::Error>;

    /// Parses a complete structure from `reader`.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error>;

    /// Opens and parses the file at `path`.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    /// Parses a structure held in memory.
    fn read_from_str(content: &str) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        Self::read_from(&mut Cursor::new(content.as_bytes()))
    }
}
