pub mod chunking;
pub mod dedup;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod inspector;
pub mod models;
pub mod stores;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use chunking::{chunk_text, DEFAULT_CHUNK_SIZE};
pub use dedup::existing_sources;
pub use error::{LoaderError, StoreError};
pub use extractor::{extract_text_best_effort, LopdfExtractor, PdfExtractor};
pub use ingest::{digest_file, discover_pdf_files, load_folder, source_name};
pub use inspector::{
    render_search_results, render_source_tally, search_memories, source_tally, tally_records,
    SourceTally,
};
pub use models::{
    ChunkMetadata, LoadOutcome, LoadReport, LoaderOptions, MemoryRecord, Message,
    DEFAULT_KNOWLEDGE_DIR, DEFAULT_NAMESPACE, UNKNOWN_SOURCE,
};
pub use stores::{Mem0Client, DEFAULT_MEM0_BASE_URL};
pub use traits::MemoryStore;
