//! On-disk layout of a `.yep` archive.
//!
//! An archive is an archive header (format version and entry count), a
//! table of fixed-width entry records, then the data region holding the
//! concatenated payloads. Every multi-byte integer is little-endian, so
//! archives are portable resource bundles.

use std::path::Path;

/// Current archive format version. Readers reject every other value.
pub const FORMAT_VERSION: u8 = 1;

/// Width of the archive header: the version byte plus the u16 entry count.
pub const ARCHIVE_HEADER_WIDTH: u64 = 3;

/// Width of a record's name field, including its NUL terminator.
pub const NAME_WIDTH: usize = 64;

/// Width of a record's metadata fields: offset, stored size, compression
/// kind, uncompressed size and data kind.
pub const RECORD_FIELDS_WIDTH: usize = 4 + 4 + 1 + 4 + 1;

/// Width of one entry record in the header table.
pub const ENTRY_RECORD_WIDTH: u64 = (NAME_WIDTH + RECORD_FIELDS_WIDTH) as u64;

/// Longest entry name that still fits the name field with its terminator.
pub const MAX_NAME_LEN: usize = NAME_WIDTH - 1;

/// How an entry's payload is stored in the data region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionKind {
    /// The payload is the entry's bytes, unmodified.
    None = 0,
    /// The payload is a zlib deflate stream of the entry's bytes.
    Deflate = 1,
}

impl TryFrom<u8> for CompressionKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Deflate),
            other => Err(other),
        }
    }
}

/// Content tag the packer stamps on each record.
///
/// Readers hand the byte through untouched; only engine-side loaders give
/// it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataKind {
    /// Anything without a more specific tag.
    Misc = 0,
    /// Texture or sprite source images.
    Image = 1,
    /// Sound effects and music.
    Audio = 2,
    /// Font faces.
    Font = 3,
    /// Scripts for the engine's scripting bridge.
    Script = 4,
    /// Plain-text data and configuration.
    Text = 5,
}

impl DataKind {
    /// Picks the tag for a source file from its extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("png" | "jpg" | "jpeg" | "bmp" | "gif" | "webp") => Self::Image,
            Some("wav" | "ogg" | "mp3" | "flac") => Self::Audio,
            Some("ttf" | "otf") => Self::Font,
            Some("lua") => Self::Script,
            Some("txt" | "json" | "toml" | "ini") => Self::Text,
            _ => Self::Misc,
        }
    }
}

/// One parsed record from the header table.
#[derive(Debug, Clone, Copy)]
pub struct EntryHeader {
    /// Absolute byte offset of the payload from the start of the archive.
    pub offset: u32,
    /// Stored (possibly compressed) payload length in bytes.
    pub size: u32,
    /// How the payload is stored.
    pub compression: CompressionKind,
    /// Original byte length of the entry, used to size and verify
    /// decompression output.
    pub uncompressed_size: u32,
    /// Caller-defined tag. Not interpreted by this subsystem.
    pub data_kind: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_width_matches_the_layout() {
        assert_eq!(ENTRY_RECORD_WIDTH, 78);
    }

    #[test]
    fn data_kind_follows_the_extension() {
        assert_eq!(DataKind::from_path(Path::new("img/player.png")), DataKind::Image);
        assert_eq!(DataKind::from_path(Path::new("scripts/init.lua")), DataKind::Script);
        assert_eq!(DataKind::from_path(Path::new("a.weird")), DataKind::Misc);
        assert_eq!(DataKind::from_path(Path::new("no_extension")), DataKind::Misc);
    }

    #[test]
    fn unknown_compression_bytes_are_rejected() {
        assert_eq!(CompressionKind::try_from(1), Ok(CompressionKind::Deflate));
        assert_eq!(CompressionKind::try_from(7), Err(7));
    }
}
