//! File system utilities for bundling.
//!
//! Idempotent directory operations, file copies with automatic parent
//! creation, and text writers for generated installer inputs.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::{fs, io::AsyncWriteExt};

/// UTF-8 byte order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Removes every entry inside `path`, keeping the directory itself.
///
/// A missing directory is left missing.
pub async fn clear_dir(path: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist, nothing to clear", path.display());
            return Ok(());
        }
        Err(e) => return Err(e).fs_context("reading directory", path),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading directory", path)?
    {
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .fs_context("inspecting", &entry_path)?;
        if file_type.is_dir() {
            remove_dir_all(&entry_path).await?;
        } else {
            remove_file(&entry_path).await?;
        }
    }

    Ok(())
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await.fs_context("copying to", to)?;
    Ok(())
}

/// Writes a text file, creating parent directories.
///
/// With `bom`, the contents are preceded by the UTF-8 byte order mark
/// (EF BB BF) which Inno Setup needs to read non-ASCII scripts as UTF-8.
pub async fn write_text(path: &Path, contents: &str, bom: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(path)
        .await
        .fs_context("creating file", path)?;
    if bom {
        file.write_all(&UTF8_BOM)
            .await
            .fs_context("writing UTF-8 BOM", path)?;
    }
    file.write_all(contents.as_bytes())
        .await
        .fs_context("writing", path)?;
    file.flush().await.fs_context("flushing", path)?;

    Ok(())
}

/// Adds execute permission for everyone (`chmod +x`). No-op off Unix.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)
            .await
            .fs_context("reading permissions", path)?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        fs::set_permissions(path, permissions)
            .await
            .fs_context("setting permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
