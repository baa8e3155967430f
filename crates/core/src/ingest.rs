use crate::chunking::chunk_text;
use crate::dedup::existing_sources;
use crate::extractor::{extract_text_best_effort, PdfExtractor};
use crate::traits::MemoryStore;
use crate::{ChunkMetadata, LoadOutcome, LoadReport, LoaderError, LoaderOptions, Message};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Lists the `*.pdf` files directly inside `folder`, sorted by path.
pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "pdf");

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub fn digest_file(path: &Path) -> Result<String, LoaderError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// The file name used as the dedup key for a source file.
pub fn source_name(path: &Path) -> Result<String, LoaderError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| LoaderError::MissingFileName(path.display().to_string()))
}

/// Uploads every not-yet-stored PDF in the knowledge directory.
///
/// Nothing is rolled back: a file counts as processed as soon as one of its
/// chunks is stored.
pub async fn load_folder<S, E>(store: &S, extractor: &E, options: &LoaderOptions) -> LoadOutcome
where
    S: MemoryStore + ?Sized,
    E: PdfExtractor + ?Sized,
{
    let folder = options.knowledge_dir.as_path();
    if !folder.is_dir() {
        warn!(folder = %folder.display(), "knowledge directory not found");
        return LoadOutcome::MissingDirectory(folder.to_path_buf());
    }

    let files = discover_pdf_files(folder);
    if files.is_empty() {
        warn!(folder = %folder.display(), "no pdf files found in the knowledge directory");
        return LoadOutcome::NoPdfFiles(folder.to_path_buf());
    }
    info!(file_count = files.len(), "found pdf files to process");

    let existing = existing_sources(store, &options.user_id).await;
    if !existing.is_empty() {
        let sources = existing.iter().cloned().collect::<Vec<_>>().join(", ");
        info!(count = existing.len(), sources = %sources, "files already uploaded");
    }

    let mut report = LoadReport::default();

    for path in files {
        let source = match source_name(&path) {
            Ok(source) => source,
            Err(error) => {
                warn!(%error, "skipping pdf without a usable name");
                continue;
            }
        };
        info!(source = %source, "processing pdf");

        if existing.contains(&source) {
            info!(source = %source, "already uploaded, skipping");
            report.skipped += 1;
            continue;
        }

        let text = extract_text_best_effort(extractor, &path);
        if text.trim().is_empty() {
            warn!(source = %source, "no text content extracted");
            report.empty += 1;
            continue;
        }

        let chunks = chunk_text(&text, options.chunk_size);
        info!(source = %source, chunk_count = chunks.len(), "split into chunks");

        let checksum = match digest_file(&path) {
            Ok(checksum) => Some(checksum),
            Err(error) => {
                warn!(source = %source, %error, "unable to checksum pdf");
                None
            }
        };

        let uploaded = upload_chunks(store, &source, &chunks, checksum, options).await;
        report.chunks_uploaded += uploaded;
        report.chunks_failed += chunks.len() - uploaded;

        if uploaded > 0 {
            report.processed += 1;
            info!(
                source = %source,
                uploaded,
                total = chunks.len(),
                "uploaded chunks"
            );
        } else {
            report.failed += 1;
            warn!(source = %source, total = chunks.len(), "no chunks were uploaded");
        }
    }

    report.finished_at = Some(Utc::now());
    info!(
        processed = report.processed,
        skipped = report.skipped,
        empty = report.empty,
        failed = report.failed,
        "pdf loading completed"
    );

    LoadOutcome::Completed(report)
}

/// Returns how many chunks were stored; failures are logged per chunk.
async fn upload_chunks<S>(
    store: &S,
    source: &str,
    chunks: &[String],
    checksum: Option<String>,
    options: &LoaderOptions,
) -> usize
where
    S: MemoryStore + ?Sized,
{
    let total_chunks = chunks.len();
    let mut uploaded = 0;

    for (chunk_index, chunk) in chunks.iter().enumerate() {
        let metadata = ChunkMetadata {
            source: source.to_string(),
            chunk_index,
            total_chunks,
            file_type: options.file_type.clone(),
            project: options.project.clone(),
            checksum: checksum.clone(),
        };
        let messages = [Message::user(chunk.as_str())];

        match store.add(&messages, &options.user_id, &metadata).await {
            Ok(()) => {
                info!(source, chunk = chunk_index + 1, total_chunks, "chunk added");
                uploaded += 1;
            }
            Err(error) => {
                warn!(source, chunk = chunk_index + 1, total_chunks, %error, "error adding chunk");
            }
        }
    }

    uploaded
}
