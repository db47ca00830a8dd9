use crate::pack_io::codec::DecompressError;
use thiserror::Error;

/// Error raised from reading an asset pack.
#[derive(Error, Debug)]
pub enum ReadError {
    /// IO error from file operations
    #[error("IO error: {source}")]
    Io {
        #[from]
        /// The [`std::io::Error`].
        source: std::io::Error,
    },
    /// The archive is encoded in a format version this reader does not
    /// support.
    #[error("version {0} is not supported! This reader only supports version 1.")]
    IncompatibleVersion(u8),
    /// The requested entry does not exist in the archive.
    #[error("requested entry {0} does not exist in the archive!")]
    EntryNotFound(String),
    /// A record's compression kind byte is not one the format defines.
    #[error("record for {name} carries unknown compression kind {kind}")]
    UnknownCompression {
        /// Name of the record with the unreadable byte.
        name: String,
        /// The byte found in the compression kind field.
        kind: u8,
    },
    /// Errors during conversion of a stored entry name into a rust UTF-8
    /// string.
    #[error("entry name {name:?} could not be converted to UTF-8! {source}")]
    Utf8Error {
        /// The origin error
        source: std::str::Utf8Error,
        /// The exact name bytes that failed to convert
        name: Box<[u8]>,
    },
    /// An entry's deflate stream failed to restore the original bytes.
    #[error("{source}")]
    Decompress {
        #[from]
        /// The codec failure, including declared-length mismatches.
        source: DecompressError,
    },
}

/// Shorthand type for [`Result<T, ReadError>`]
pub type ReadResult<T> = Result<T, ReadError>;
