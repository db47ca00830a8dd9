use crate::pack_io::format::{CompressionKind, EntryHeader, FORMAT_VERSION, NAME_WIDTH};
use crate::pack_io::reading::utils::read_bytes;
use crate::pack_io::reading::{ReadError, ReadResult};
use indexmap::IndexMap;
use std::io::Read;
use tracing::warn;

/// Reads the version byte, rejecting archives this reader cannot decode.
pub fn validate_version(reader: &mut impl Read) -> ReadResult<u8> {
    let version = read_bytes!(reader, 1)?[0];

    if version != FORMAT_VERSION {
        return Err(ReadError::IncompatibleVersion(version));
    }

    Ok(version)
}

/// Reads the entry count that sizes the header table.
pub fn read_entry_count(reader: &mut impl Read) -> ReadResult<u16> {
    Ok(u16::from_le_bytes(read_bytes!(reader, 2)?))
}

/// Parses the whole header table into a name-keyed map.
///
/// The first record under a given name wins; a duplicate further down the
/// table is unreachable, exactly as it would be for a front-to-back scan
/// of the table.
pub fn read_header_table(
    reader: &mut impl Read,
    entry_count: u16,
) -> ReadResult<IndexMap<String, EntryHeader>> {
    let mut headers = IndexMap::with_capacity(entry_count as usize);

    for _ in 0..entry_count {
        let (name, header) = read_entry_record(reader)?;

        if headers.contains_key(&name) {
            warn!("Duplicate entry name {name}; keeping the first record");
            continue;
        }
        headers.insert(name, header);
    }

    Ok(headers)
}

/// Reads one fixed-width record: the NUL-padded name field, then the
/// metadata fields.
fn read_entry_record(reader: &mut impl Read) -> ReadResult<(String, EntryHeader)> {
    let name_field = read_bytes!(reader, NAME_WIDTH)?;

    let name_len = name_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(NAME_WIDTH);
    let name = std::str::from_utf8(&name_field[..name_len])
        .map_err(|source| ReadError::Utf8Error {
            source,
            name: name_field[..name_len].into(),
        })?
        .to_owned();

    let offset = u32::from_le_bytes(read_bytes!(reader, 4)?);
    let size = u32::from_le_bytes(read_bytes!(reader, 4)?);
    let compression_byte = read_bytes!(reader, 1)?[0];
    let uncompressed_size = u32::from_le_bytes(read_bytes!(reader, 4)?);
    let data_kind = read_bytes!(reader, 1)?[0];

    let compression =
        CompressionKind::try_from(compression_byte).map_err(|kind| {
            ReadError::UnknownCompression {
                name: name.clone(),
                kind,
            }
        })?;

    Ok((
        name,
        EntryHeader {
            offset,
            size,
            compression,
            uncompressed_size,
            data_kind,
        },
    ))
}
