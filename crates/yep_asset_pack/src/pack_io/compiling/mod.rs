//! API for compiling asset pack files

mod compile_steps;
mod errors;
mod walk;

pub use errors::*;

use crate::pack_io::compiling::compile_steps::{
    validate_asset_dir, write_archive_header, write_entry_payloads, write_placeholder_records,
};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Default minimum byte length at which an entry's data is stored deflated.
///
/// Data at or below this length tends to compress poorly enough that it is
/// stored raw instead.
pub const DEFAULT_COMPRESSION_THRESHOLD: u64 = 256;

/// Create an instance of this struct to compile an asset pack.
///
/// # Example
/// ```no_run
/// use yep_asset_pack::pack_io::compiling::AssetPackCompiler;
///
/// // Packs everything under ./resources into ./resources.yep
/// AssetPackCompiler::new()
///     .compile("./resources", "./resources.yep").unwrap();
/// ```
#[non_exhaustive]
pub struct AssetPackCompiler {
    compression_threshold: u64,
}

impl Default for AssetPackCompiler {
    fn default() -> Self {
        Self {
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
        }
    }
}

impl AssetPackCompiler {
    /// Create a new [`AssetPackCompiler`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum byte length at which an entry's data is deflated
    /// rather than stored raw.
    ///
    /// The threshold is a layout tunable, not a format property: readers
    /// follow each record's compression kind and never consult it.
    pub fn compression_threshold(&mut self, threshold: u64) -> &mut Self {
        self.compression_threshold = threshold;
        self
    }

    /// Compile an asset pack file from every regular file under `asset_dir`.
    ///
    /// The archive is assembled in a temporary file next to `pack_output`
    /// and only renamed over it once both write passes have succeeded, so
    /// a failed compile never leaves a partial archive behind.
    ///
    /// # Parameters
    /// `asset_dir`: Path to the directory containing the assets
    /// `pack_output`: Path to the output asset pack file
    ///
    /// # Errors
    /// See [`CompileError`] for more information.
    pub fn compile(
        &self,
        asset_dir: impl AsRef<Path>,
        pack_output: impl AsRef<Path>,
    ) -> CompileResult<()> {
        let asset_dir = asset_dir.as_ref();
        let pack_output = pack_output.as_ref();

        validate_asset_dir(asset_dir)?;

        let worklist = walk::build_worklist(asset_dir);
        debug!(
            "Packing {} entries from {}",
            worklist.len(),
            asset_dir.display()
        );

        let staging_dir = pack_output
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut staging = NamedTempFile::new_in(staging_dir)?;

        write_archive_header(staging.as_file_mut(), &worklist)?;
        write_placeholder_records(staging.as_file_mut(), &worklist)?;
        write_entry_payloads(staging.as_file_mut(), &worklist, self.compression_threshold)?;

        staging
            .persist(pack_output)
            .map_err(|e| CompileError::from(e.error))?;

        Ok(())
    }
}
