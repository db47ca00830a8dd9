//! API for reading asset pack files

mod cache;
mod errors;
mod read_steps;
mod utils;

pub use cache::*;
pub use errors::*;

use crate::pack_io::codec;
use crate::pack_io::format::{CompressionKind, EntryHeader};
use crate::pack_io::reading::read_steps::{
    read_entry_count, read_header_table, validate_version,
};
use indexmap::IndexMap;
use std::fmt::Debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Create an instance of this struct to read an asset pack.
///
/// Opening validates the format version and parses the whole header table
/// once; every lookup afterwards is a map hit that never re-reads the
/// table.
///
/// # Examples
/// * Extract an entry from an archive on disk:
/// ```no_run
/// use yep_asset_pack::pack_io::reading::AssetPackReader;
///
/// # fn foo() -> yep_asset_pack::pack_io::reading::ReadResult<()> {
/// let mut reader = AssetPackReader::new_from_path("./resources.yep")?;
/// let bytes = reader.extract("images/player.png")?;
/// # Ok(()) }
/// ```
/// * Read an archive already in memory:
/// ```no_run
/// use yep_asset_pack::pack_io::reading::AssetPackReader;
/// use std::io::Cursor;
///
/// # fn foo() -> yep_asset_pack::pack_io::reading::ReadResult<()> {
/// # let archive_bytes: Vec<u8> = vec![];
/// let mut reader = AssetPackReader::new(Cursor::new(archive_bytes))?;
/// # Ok(()) }
/// ```
///
/// See also [`PackCache`] for the engine-facing reuse of open readers.
#[non_exhaustive]
pub struct AssetPackReader<R: Read + Seek> {
    reader: R,
    headers: IndexMap<String, EntryHeader>,
    entry_count: u16,
    version: u8,
}

impl<R: Read + Seek> Debug for AssetPackReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPackReader")
            .field("version", &self.version)
            .field("entry_count", &self.entry_count)
            .finish()
    }
}

impl AssetPackReader<BufReader<File>> {
    /// Opens an archive file and validates it.
    ///
    /// # Parameters
    /// - `pack_path`: Path to the asset pack file
    ///
    /// # Errors
    /// Will fail if the file cannot be opened, if the version of the
    /// format is incompatible, or if the header table cannot be parsed.
    ///
    /// See [`ReadError`].
    pub fn new_from_path(pack_path: impl AsRef<Path>) -> ReadResult<Self> {
        let file = File::open(pack_path.as_ref())?;

        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> AssetPackReader<R> {
    /// Creates a reader over any seekable byte source containing an
    /// archive and validates it.
    ///
    /// # Errors
    /// Will fail if the version of the format is incompatible or if the
    /// header table cannot be parsed. No partial state is kept on failure.
    ///
    /// See [`ReadError`].
    pub fn new(mut reader: R) -> ReadResult<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let version = validate_version(&mut reader)?;
        let entry_count = read_entry_count(&mut reader)?;
        let headers = read_header_table(&mut reader, entry_count)?;

        Ok(Self {
            reader,
            headers,
            entry_count,
            version,
        })
    }

    /// Gets the format version of the archive.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Entry count from the archive header.
    ///
    /// Can exceed [`entry_names`](Self::entry_names) when the table holds
    /// duplicate names, since only the first record of a name is
    /// reachable.
    pub fn entry_count(&self) -> u16 {
        self.entry_count
    }

    /// Names of every reachable entry, in header-table order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// Every reachable entry name with its parsed record, in header-table
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &EntryHeader)> {
        self.headers
            .iter()
            .map(|(name, header)| (name.as_str(), header))
    }

    /// Looks up the parsed record for `name`.
    pub fn header(&self, name: &str) -> Option<&EntryHeader> {
        self.headers.get(name)
    }

    /// Checks if an entry exists in the archive.
    pub fn has_entry(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Extracts one entry's original bytes.
    ///
    /// The returned buffer holds exactly the entry's uncompressed length;
    /// a stored deflate stream is inflated and length-checked against the
    /// record. The archive itself is never mutated.
    ///
    /// # Parameters
    /// - `name`: Path of the entry relative to the packed root (without
    ///   `./`)
    ///
    /// # Errors
    /// [`ReadError::EntryNotFound`] if no record carries `name`, otherwise
    /// IO or decompression failures. See [`ReadError`].
    pub fn extract(&mut self, name: &str) -> ReadResult<Vec<u8>> {
        let header = *self
            .headers
            .get(name)
            .ok_or_else(|| ReadError::EntryNotFound(name.to_owned()))?;

        self.reader.seek(SeekFrom::Start(header.offset as u64))?;
        let mut stored = vec![0u8; header.size as usize];
        self.reader.read_exact(&mut stored)?;

        match header.compression {
            CompressionKind::None => Ok(stored),
            CompressionKind::Deflate => {
                Ok(codec::decompress(&stored, header.uncompressed_size as usize)?)
            }
        }
    }
}
