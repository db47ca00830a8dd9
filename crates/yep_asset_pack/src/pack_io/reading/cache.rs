use crate::pack_io::reading::{AssetPackReader, ReadResult};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Caches the most recently opened archive so repeated lookups against the
/// same pack reuse one open handle and one parsed header table.
///
/// This is the engine-facing entry point for resource fetches: the engine
/// owns one `PackCache` for its lifetime (construct at startup,
/// [`clear`](Self::clear) at shutdown) and funnels every lookup through
/// [`extract`](Self::extract). The cache is not synchronized; callers
/// sharing one across threads must serialize access, or hold one cache
/// per thread.
///
/// # Example
/// ```no_run
/// use yep_asset_pack::pack_io::reading::PackCache;
///
/// # fn foo() -> yep_asset_pack::pack_io::reading::ReadResult<()> {
/// let mut cache = PackCache::new();
/// let script = cache.extract("./resources.yep", "scripts/init.lua")?;
/// // Reuses the open handle, no reopen or re-parse:
/// let sprite = cache.extract("./resources.yep", "images/player.png")?;
/// # Ok(()) }
/// ```
#[derive(Default)]
pub struct PackCache {
    open_pack: Option<OpenPack>,
}

struct OpenPack {
    path: PathBuf,
    reader: AssetPackReader<BufReader<File>>,
}

impl PackCache {
    /// Creates an empty cache with no archive open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts `entry_name` from the archive at `archive_path`.
    ///
    /// A lookup against the cached archive's path reuses the open
    /// session. Any other path opens a new session, which replaces the
    /// cached one only once the open succeeds. A failed open (missing
    /// file, bad version) leaves the previously cached archive usable,
    /// and a failed lookup never disturbs the cached handle.
    ///
    /// # Errors
    /// See [`ReadError`](super::ReadError).
    pub fn extract(
        &mut self,
        archive_path: impl AsRef<Path>,
        entry_name: &str,
    ) -> ReadResult<Vec<u8>> {
        let archive_path = archive_path.as_ref();

        if !matches!(&self.open_pack, Some(open) if open.path == archive_path) {
            // A failed open must not clobber the previous session.
            let reader = AssetPackReader::new_from_path(archive_path)?;
            self.open_pack = Some(OpenPack {
                path: archive_path.to_path_buf(),
                reader,
            });
        }

        let open_pack = self
            .open_pack
            .as_mut()
            .expect("A session should be open at this point.");

        open_pack.reader.extract(entry_name)
    }

    /// Path of the archive currently held open, if any.
    pub fn cached_path(&self) -> Option<&Path> {
        self.open_pack.as_ref().map(|open| open.path.as_path())
    }

    /// Closes the cached archive handle and drops its parsed header
    /// table.
    pub fn clear(&mut self) {
        self.open_pack = None;
    }
}
