use std::path::PathBuf;
use thiserror::Error;

/// Errors raised from compiling asset packs
#[derive(Error, Debug)]
pub enum CompileError {
    /// The `asset_dir` passed in is not a directory
    #[error("{} is not a directory!", .0.display())]
    NotADirectory(PathBuf),
    /// More files were found than the archive's u16 entry count can describe
    #[error("{0} entries exceed the 65535 the entry count field can hold")]
    TooManyEntries(usize),
    /// A source file's stored or original length left the u32 range of the
    /// record fields
    #[error("{} does not fit the record's 32-bit size fields", .0.display())]
    EntryTooLarge(PathBuf),
    /// The data region grew past what the u32 offset field can address
    #[error("archive data exceeds the 4 GiB the offset field can address")]
    ArchiveTooLarge,
    /// The deflate codec failed on an entry's data
    #[error("compression failed for {}: {source}", .path.display())]
    Compress {
        /// Source file whose data was being compressed.
        path: PathBuf,
        /// The codec error.
        source: std::io::Error,
    },
    /// IO errors from file operations
    #[error("IO error: {source}")]
    Io {
        #[from]
        /// The IO error itself (See [`std::io::Error`])
        source: std::io::Error,
    },
}

/// Shorthand type for [`Result<T, CompileError>`]
pub type CompileResult<T> = Result<T, CompileError>;
