//! Document sources for the search engine: a directory crawler that turns HTML
//! pages and JSON/JSONL feeds into `(id, title, text)` documents.

pub mod feed;
pub mod html;

use anyhow::{anyhow, Context, Result};
use search_core::{IndexBuilder, SearchIndex};
use std::fs;
use std::path::Path;
use url::Url;
use walkdir::WalkDir;

pub use html::extract_html;

/// A document ready for indexing. `title` is `None` when the source had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub id: String,
    pub title: Option<String>,
    pub text: String,
}

/// Walk `dir` recursively in file-name order and collect every document.
///
/// `.html`/`.htm` files become one document each, identified by their
/// `file://` URL. `.jsonl` and `.json` files are read as feeds. Other files
/// are ignored. Any read or parse failure aborts the crawl.
pub fn crawl_directory(dir: &Path) -> Result<Vec<RawDocument>> {
    let root = fs::canonicalize(dir).with_context(|| format!("input directory {}", dir.display()))?;
    tracing::info!(dir = %root.display(), "crawling directory");

    let mut docs = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let p = entry.path();
        if !entry.file_type().is_file() { continue; }
        let ext = p.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("html" | "htm") => docs.push(read_html(p)?),
            Some("jsonl") => docs.extend(feed::read_jsonl(p)?),
            Some("json") => docs.extend(feed::read_json(p)?),
            _ => tracing::trace!(path = %p.display(), "skipping"),
        }
    }
    tracing::info!(num_docs = docs.len(), "crawl complete");
    Ok(docs)
}

fn read_html(path: &Path) -> Result<RawDocument> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let body = String::from_utf8_lossy(&bytes);
    let (title, text) = extract_html(&body);
    let id = Url::from_file_path(path)
        .map_err(|_| anyhow!("cannot form a file URL for {}", path.display()))?
        .to_string();
    Ok(RawDocument { id, title, text })
}

/// Build an index from already collected documents.
pub fn index_documents<I>(docs: I) -> SearchIndex
where
    I: IntoIterator<Item = RawDocument>,
{
    let mut builder = IndexBuilder::new();
    for doc in docs {
        builder.add_document(&doc.id, doc.title.as_deref(), &doc.text);
    }
    builder.finish()
}

/// Crawl `dir` and build an index from everything found. Nothing is indexed
/// unless the whole crawl succeeds.
pub fn index_directory(dir: &Path) -> Result<SearchIndex> {
    let docs = crawl_directory(dir)?;
    Ok(index_documents(docs))
}
