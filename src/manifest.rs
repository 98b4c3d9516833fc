use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context as _};
use log::{debug, error, info, warn};

use crate::{context::Context, date::parse_post_date, metadata::PostMetadata, store};

mod extract;

pub(crate) use extract::extract_metadata;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ManifestOutcome {
    Written { path: PathBuf, posts: usize },
    /// No markdown files: nothing was written and a previous manifest is kept.
    NoPosts,
}

pub(crate) fn collect_markdown_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in std::fs::read_dir(dir).with_context(|| format!("while listing {dir:?}"))? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn preprocess_file(path: &Path, default_author: &str) -> anyhow::Result<PostMetadata> {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let content = std::fs::read_to_string(path)?;
    Ok(extract_metadata(&id, &content, default_author))
}

/// Newest first by comparing the raw `date` strings.
fn sort_lexical(a: &PostMetadata, b: &PostMetadata) -> Ordering {
    b.date.cmp(&a.date)
}

/// Newest first by calendar date; posts whose date does not parse go last.
fn sort_calendar(a: &PostMetadata, b: &PostMetadata) -> Ordering {
    match (parse_post_date(&a.date), parse_post_date(&b.date)) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => sort_lexical(a, b),
    }
}

pub(crate) fn build_manifest(ctx: &Context) -> anyhow::Result<ManifestOutcome> {
    let content_dir = &ctx.content_dir;
    if !content_dir.is_dir() {
        bail!("Content directory not found: {content_dir:?}");
    }

    let md_files = collect_markdown_files(content_dir)?;
    if md_files.is_empty() {
        warn!("No markdown files found in {content_dir:?}");
        return Ok(ManifestOutcome::NoPosts);
    }
    info!("Found {} markdown file(s)", md_files.len());

    let mut posts = vec![];
    for md_file in md_files.iter() {
        let name = md_file.file_name().unwrap_or_default().to_string_lossy();
        info!("Processing: {name}");
        match preprocess_file(md_file, &ctx.default_author) {
            Ok(metadata) => {
                info!("  Title: {}", metadata.title);
                debug!("{metadata:?}");
                posts.push(metadata);
            }
            Err(e) => error!("  Error processing {name}: {e:#}"),
        }
    }

    if ctx.calendar_sort {
        posts.sort_by(sort_calendar);
    } else {
        posts.sort_by(sort_lexical);
    }

    store::save_manifest(&ctx.manifest_path, &posts)?;
    info!("Blog manifest generated: {:?}", ctx.manifest_path);
    info!("Total posts: {}", posts.len());

    Ok(ManifestOutcome::Written {
        path: ctx.manifest_path.clone(),
        posts: posts.len(),
    })
}
