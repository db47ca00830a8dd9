use crate::pack_io::codec;
use crate::pack_io::compiling::walk::WorklistEntry;
use crate::pack_io::compiling::{CompileError, CompileResult};
use crate::pack_io::format::{
    CompressionKind, DataKind, EntryHeader, ARCHIVE_HEADER_WIDTH, ENTRY_RECORD_WIDTH,
    FORMAT_VERSION, NAME_WIDTH, RECORD_FIELDS_WIDTH,
};
use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

pub fn validate_asset_dir(asset_dir: &Path) -> CompileResult<()> {
    if !asset_dir.is_dir() {
        return Err(CompileError::NotADirectory(asset_dir.to_path_buf()));
    }

    Ok(())
}

/// # Archive header
pub fn write_archive_header(output: &mut File, worklist: &[WorklistEntry]) -> CompileResult<()> {
    if worklist.len() > u16::MAX as usize {
        return Err(CompileError::TooManyEntries(worklist.len()));
    }

    // ## Format version
    output.write_all(&[FORMAT_VERSION])?;
    // ## Entry count
    output.write_all(&(worklist.len() as u16).to_le_bytes())?;

    Ok(())
}

/// Reserves the header table: every record gets its real name now and
/// zeroed metadata fields, which fixes each record's file position for the
/// backpatch in the payload pass.
pub fn write_placeholder_records(
    output: &mut File,
    worklist: &[WorklistEntry],
) -> CompileResult<()> {
    for entry in worklist {
        let mut name_field = [0u8; NAME_WIDTH];
        // The walker already rejected names that don't leave room for the
        // NUL, which the zero fill provides.
        name_field[..entry.name.len()].copy_from_slice(entry.name.as_bytes());

        // ## Name
        output.write_all(&name_field)?;
        // ## Offset, stored size, compression kind, uncompressed size, data kind
        output.write_all(&[0u8; RECORD_FIELDS_WIDTH])?;
    }

    Ok(())
}

/// Streams every source file into the data region and backpatches its
/// record with the final offset, stored size and compression metadata.
///
/// A source file failing to read here is fatal for the whole pack.
pub fn write_entry_payloads(
    output: &mut File,
    worklist: &[WorklistEntry],
    compression_threshold: u64,
) -> CompileResult<()> {
    let mut data_cursor = ARCHIVE_HEADER_WIDTH + worklist.len() as u64 * ENTRY_RECORD_WIDTH;

    for (index, entry) in worklist.iter().enumerate() {
        let data = fs::read(&entry.source)?;

        let uncompressed_size = u32::try_from(data.len())
            .map_err(|_| CompileError::EntryTooLarge(entry.source.clone()))?;

        let (payload, compression) = if data.len() as u64 > compression_threshold {
            let compressed = codec::compress(&data).map_err(|source| CompileError::Compress {
                path: entry.source.clone(),
                source,
            })?;
            debug!(
                "Deflated {} from {uncompressed_size} to {} bytes",
                entry.name,
                compressed.len()
            );
            (compressed, CompressionKind::Deflate)
        } else {
            (data, CompressionKind::None)
        };

        let offset = u32::try_from(data_cursor).map_err(|_| CompileError::ArchiveTooLarge)?;
        let size = u32::try_from(payload.len())
            .map_err(|_| CompileError::EntryTooLarge(entry.source.clone()))?;

        output.seek(SeekFrom::Start(data_cursor))?;
        output.write_all(&payload)?;

        let header = EntryHeader {
            offset,
            size,
            compression,
            uncompressed_size,
            data_kind: DataKind::from_path(&entry.source) as u8,
        };
        patch_record(output, index, &header)?;

        data_cursor += payload.len() as u64;
    }

    Ok(())
}

/// Rewrites the metadata fields of record `index`. The name field from the
/// reserve pass is left untouched.
fn patch_record(output: &mut File, index: usize, header: &EntryHeader) -> CompileResult<()> {
    let field_start =
        ARCHIVE_HEADER_WIDTH + index as u64 * ENTRY_RECORD_WIDTH + NAME_WIDTH as u64;
    output.seek(SeekFrom::Start(field_start))?;

    output.write_all(&header.offset.to_le_bytes())?;
    output.write_all(&header.size.to_le_bytes())?;
    output.write_all(&[header.compression as u8])?;
    output.write_all(&header.uncompressed_size.to_le_bytes())?;
    output.write_all(&[header.data_kind])?;

    Ok(())
}
