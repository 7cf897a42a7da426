//! Zip archive helpers.
//!
//! Archive work is blocking, so it runs on tokio's blocking pool.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

/// Extracts every entry of `archive` into `dest`.
pub async fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    blocking(move || {
        let file = File::open(&archive).fs_context("opening archive", &archive)?;
        let mut zip = ZipArchive::new(BufReader::new(file))?;
        std::fs::create_dir_all(&dest).fs_context("creating extraction directory", &dest)?;
        zip.extract(&dest)?;
        log::info!(
            "Extracted {} entries from {} into {}",
            zip.len(),
            archive.display(),
            dest.display()
        );
        Ok(())
    })
    .await
}

/// Creates `dest` containing the single file `source`, stored under its file name.
pub async fn compress_file(source: &Path, dest: &Path) -> Result<()> {
    let source = source.to_path_buf();
    let dest = dest.to_path_buf();

    blocking(move || {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("invalid file name: {}", source.display()))?
            .to_string();

        let mut input = File::open(&source).fs_context("opening", &source)?;
        let output = File::create(&dest).fs_context("creating archive", &dest)?;

        let mut zip = ZipWriter::new(output);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name, options)?;
        io::copy(&mut input, &mut zip).fs_context("compressing", &source)?;
        zip.finish()?;

        log::info!("Archived {} as {}", source.display(), dest.display());
        Ok(())
    })
    .await
}

async fn blocking<F>(task: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
}
