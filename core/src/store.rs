use crate::DocId;
use serde::Serialize;
use std::collections::HashMap;

/// A single ingested document. Immutable once added to the store.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub external_id: String,
    pub title: String,
    /// Occurrence count of every term present in the document; all counts are >= 1.
    pub term_frequencies: HashMap<String, u32>,
}

impl Document {
    pub fn frequency_of(&self, term: &str) -> u32 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn num_terms(&self) -> usize { self.term_frequencies.len() }
}

/// Per-document titles and term frequency tables, addressed by dense [`DocId`].
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    docs: Vec<Document>,
    by_external_id: HashMap<String, DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Store a document and return its id, or `None` if `external_id` is already present.
    /// A missing or blank title falls back to [`fallback_title`].
    pub(crate) fn add(&mut self, external_id: &str, title: Option<&str>, term_frequencies: HashMap<String, u32>) -> Option<DocId> {
        if self.by_external_id.contains_key(external_id) {
            return None;
        }
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => fallback_title(external_id),
        };
        let id = self.docs.len() as DocId;
        self.docs.push(Document { external_id: external_id.to_string(), title, term_frequencies });
        self.by_external_id.insert(external_id.to_string(), id);
        Some(id)
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(id as usize) }

    pub fn title_of(&self, id: DocId) -> Option<&str> { self.get(id).map(|d| d.title.as_str()) }

    /// Occurrences of `term` in document `id`; 0 for absent terms and unknown ids.
    pub fn frequency_of(&self, id: DocId, term: &str) -> u32 {
        self.get(id).map_or(0, |d| d.frequency_of(term))
    }

    pub fn id_of(&self, external_id: &str) -> Option<DocId> { self.by_external_id.get(external_id).copied() }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> + '_ {
        self.docs.iter().enumerate().map(|(i, d)| (i as DocId, d))
    }
}

/// Title used when a document supplies none: the last non-empty path segment of its id.
pub fn fallback_title(external_id: &str) -> String {
    external_id
        .rsplit('/')
        .find(|seg| !seg.is_empty())
        .unwrap_or(external_id)
        .to_string()
}
