//! Async atomic writes for per-entity files.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use super::atomic_toml::temp_path_for;

/// Replaces the file at `path` with `contents`: tmp file, fsync, rename.
///
/// Readers see either the old or the new content, never a torn write.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp_path = temp_path_for(path)?;
    let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
    tmp_file.write_all(contents).await?;
    tmp_file.sync_all().await?;
    drop(tmp_file);

    tokio::fs::rename(&tmp_path, path).await
}
