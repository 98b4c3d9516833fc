use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use log::info;
use tempfile::NamedTempFile;

use crate::metadata::PostMetadata;

pub(crate) fn load_manifest(manifest_path: &Path) -> anyhow::Result<Option<Vec<PostMetadata>>> {
    if !manifest_path.exists() {
        info!("Manifest({manifest_path:?}) does not exist. ignoring...");
        return Ok(None);
    }
    let fd = File::open(manifest_path).with_context(|| format!("opening {manifest_path:?}"))?;
    let reader = BufReader::new(fd);
    let posts = serde_json::from_reader(reader)
        .with_context(|| format!("{manifest_path:?} is not a valid manifest"))?;
    Ok(Some(posts))
}

pub(crate) fn save_manifest(manifest_path: &Path, posts: &[PostMetadata]) -> anyhow::Result<()> {
    write_atomically(manifest_path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, posts)?;
        writer.write_all(b"\n")?;
        Ok(())
    })
}

pub(crate) fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    write_atomically(path, |writer| {
        writer.write_all(contents.as_bytes())?;
        Ok(())
    })
}

/// Writes into a temporary file next to `path` and renames it over `path`,
/// so readers never observe a partially written file.
fn write_atomically<F>(path: &Path, fill: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> anyhow::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp =
        NamedTempFile::new_in(dir).with_context(|| format!("creating temporary file in {dir:?}"))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer).with_context(|| format!("while writing {path:?}"))?;
        writer.flush()?;
    }
    tmp.persist(path)
        .with_context(|| format!("while replacing {path:?}"))?;
    Ok(())
}
