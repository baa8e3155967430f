use crate::traits::MemoryStore;
use crate::{MemoryRecord, StoreError, UNKNOWN_SOURCE};
use std::collections::BTreeMap;
use std::fmt::Write;

pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTally {
    pub total: usize,
    pub by_source: BTreeMap<String, usize>,
}

pub async fn search_memories<S>(
    store: &S,
    query: &str,
    user_id: &str,
    limit: usize,
) -> Result<Vec<MemoryRecord>, StoreError>
where
    S: MemoryStore + ?Sized,
{
    store.search(query, user_id, limit).await
}

/// Counts stored records per source; records without one land under `Unknown`.
pub async fn source_tally<S>(store: &S, user_id: &str) -> Result<SourceTally, StoreError>
where
    S: MemoryStore + ?Sized,
{
    let records = store.get_all(user_id).await?;
    Ok(tally_records(&records))
}

pub fn tally_records(records: &[MemoryRecord]) -> SourceTally {
    let mut by_source = BTreeMap::new();
    for record in records {
        let source = record.source().unwrap_or(UNKNOWN_SOURCE).to_string();
        *by_source.entry(source).or_insert(0) += 1;
    }

    SourceTally {
        total: records.len(),
        by_source,
    }
}

pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

pub fn render_search_results(query: &str, hits: &[MemoryRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search results for: '{query}'");
    let _ = writeln!(out, "{}", "=".repeat(50));

    for (index, hit) in hits.iter().enumerate() {
        let score = hit
            .score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let content = hit.memory.as_deref().unwrap_or("No content");

        let _ = writeln!(out, "\nResult {}:", index + 1);
        let _ = writeln!(out, "Score: {score}");
        let _ = writeln!(out, "Source: {}", hit.source().unwrap_or(UNKNOWN_SOURCE));
        let _ = writeln!(out, "Content: {}...", preview(content));
        let _ = writeln!(out, "{}", "-".repeat(30));
    }

    out
}

pub fn render_source_tally(user_id: &str, tally: &SourceTally) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total memories for {user_id}: {}", tally.total);
    let _ = writeln!(out, "{}", "=".repeat(50));
    for (source, count) in &tally.by_source {
        let _ = writeln!(out, "{source}: {count} chunks");
    }
    out
}
