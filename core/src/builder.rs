use crate::index::SearchIndex;
use crate::postings::PostingsTable;
use crate::store::DocumentStore;
use crate::tokenizer::tokenize;
use crate::trie::Trie;
use crate::DocId;
use std::collections::HashMap;

/// Accumulates documents, then freezes them into an immutable [`SearchIndex`].
///
/// The term -> documents accumulator only exists inside the builder; `finish`
/// consumes it to produce the trie and postings table in one pass.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    store: DocumentStore,
    postings_raw: HashMap<String, Vec<DocId>>,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and record the document. Returns the assigned id, or
    /// `None` when `external_id` was already ingested (the later copy is dropped).
    pub fn add_document(&mut self, external_id: &str, title: Option<&str>, text: &str) -> Option<DocId> {
        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for term in tokenize(text) {
            *tf_counts.entry(term).or_insert(0) += 1;
        }
        // Distinct terms only, so each document lands in a term's list at most once.
        let terms: Vec<String> = tf_counts.keys().cloned().collect();

        let Some(doc_id) = self.store.add(external_id, title, tf_counts) else {
            tracing::warn!(external_id, "duplicate document id, skipping");
            return None;
        };
        for term in terms {
            self.postings_raw.entry(term).or_default().push(doc_id);
        }
        tracing::trace!(external_id, doc_id, "ingested document");
        Some(doc_id)
    }

    pub fn num_docs(&self) -> usize { self.store.len() }

    /// Assign term ids in lexicographic order, sort each postings list and
    /// insert every term into the trie.
    pub fn finish(self) -> SearchIndex {
        let IndexBuilder { store, postings_raw } = self;

        let mut vocabulary: Vec<(String, Vec<DocId>)> = postings_raw.into_iter().collect();
        vocabulary.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut trie = Trie::new();
        let mut postings = PostingsTable::new();
        for (term, mut docs) in vocabulary {
            docs.sort_unstable();
            let term_id = postings.push(docs);
            trie.insert(&term, term_id);
        }

        let index = SearchIndex::from_parts(trie, postings, store);
        let stats = index.stats();
        tracing::info!(
            num_docs = stats.num_docs,
            num_terms = stats.num_terms,
            num_postings = stats.num_postings,
            "index build complete"
        );
        index
    }
}
