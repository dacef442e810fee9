//! ZIP packaging of rendered card images.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// Bundle every PNG one folder deep under `cards_dir` into a deflated ZIP,
/// keeping the `folder/file.png` layout. Returns the number of entries
/// written.
///
/// Only depth-2 files are taken, so the archive itself (written at the
/// directory root) is never swallowed on a re-run.
pub fn write_archive(cards_dir: &Path, zip_path: &Path) -> Result<usize> {
    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(cards_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|e| e == "png").unwrap_or(false) {
            let folder = path
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = format!("{}/{}", folder, entry.file_name().to_string_lossy());
            entries.push((name, path.to_path_buf()));
        }
    }

    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut buf = Vec::new();
    for (name, path) in &entries {
        zip.start_file(name.clone(), options)?;
        buf.clear();
        File::open(path)?.read_to_end(&mut buf)?;
        zip.write_all(&buf)?;
    }
    zip.finish()?;

    Ok(entries.len())
}
