//! Memory file writer.
//!
//! Images are written to a sibling staging file and renamed over the destination once
//! complete, so a destination is either the previous file, absent, or the full new image.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image::MemoryImage;

/// Write a memory image to `path`.
pub fn write_image(path: &Path, image: &MemoryImage) -> Result<()> {
    let staging = staging_path(path);
    let output_error = |source| Error::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = write_staged(&staging, image) {
        let _ = fs::remove_file(&staging);
        return Err(output_error(source));
    }
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        output_error(source)
    })?;

    tracing::debug!("Wrote {} words to {}", image.word_count(), path.display());
    Ok(())
}

fn write_staged(staging: &Path, image: &MemoryImage) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(staging)?);
    image.write_to(&mut out)?;
    out.flush()?;
    out.get_ref().sync_all()
}

/// Remove outputs left behind by an earlier run.
pub fn discard_stale<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<()> {
    for path in paths {
        for stale in [path.to_path_buf(), staging_path(path)] {
            match fs::remove_file(&stale) {
                Ok(()) => tracing::debug!("Removed stale {}", stale.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(Error::Output { path: stale, source }),
            }
        }
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
