use crate::postings::{intersect_all, PostingsTable};
use crate::store::{Document, DocumentStore};
use crate::tokenizer::tokenize;
use crate::trie::Trie;
use crate::DocId;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Score added for every distinct query term found inside a document title.
pub const TITLE_BONUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    /// Number of (document, term) pairs across all postings lists.
    pub num_postings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedDoc {
    pub doc_id: DocId,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

/// A ranked result hydrated with what a caller needs to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub external_id: String,
    pub title: String,
    pub score: u32,
    /// Frequency of each distinct query term in the document, in query order.
    pub term_frequencies: Vec<TermCount>,
}

/// Immutable inverted index: term dictionary, postings and document store.
///
/// Built once by [`IndexBuilder`](crate::IndexBuilder) and never mutated, so a
/// shared reference can serve any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    trie: Trie,
    postings: PostingsTable,
    store: DocumentStore,
}

impl SearchIndex {
    pub(crate) fn from_parts(trie: Trie, postings: PostingsTable, store: DocumentStore) -> Self {
        Self { trie, postings, store }
    }

    pub fn trie(&self) -> &Trie { &self.trie }

    pub fn postings(&self) -> &PostingsTable { &self.postings }

    pub fn store(&self) -> &DocumentStore { &self.store }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.store.len(),
            num_terms: self.postings.len(),
            num_postings: self.postings.total_entries(),
        }
    }

    pub fn document(&self, doc_id: DocId) -> Option<&Document> { self.store.get(doc_id) }

    pub fn doc_id_of(&self, external_id: &str) -> Option<DocId> { self.store.id_of(external_id) }

    /// Postings list for an already-normalized term.
    pub fn postings_for(&self, term: &str) -> Option<&[DocId]> {
        self.trie.lookup(term).and_then(|id| self.postings.get(id))
    }

    /// Conjunctive query: ids of documents containing every query term, ascending.
    ///
    /// Returns nothing when the query has no index terms or when any term is
    /// missing from the dictionary.
    pub fn search(&self, query: &str) -> Vec<DocId> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut lists = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.postings_for(term) {
                Some(list) => lists.push(list),
                None => {
                    tracing::debug!(query, term = term.as_str(), "term not in dictionary");
                    return Vec::new();
                }
            }
        }

        let result = if let [single] = lists.as_slice() {
            single.to_vec()
        } else {
            intersect_all(lists)
        };
        tracing::debug!(query, terms = terms.len(), hits = result.len(), "search");
        result
    }

    /// Score `candidates` against `query` and order them by descending score,
    /// breaking ties by ascending doc id.
    ///
    /// score = sum over distinct query terms of (frequency in document
    /// + [`TITLE_BONUS`] if the term occurs in the lowercased title).
    pub fn rank(&self, query: &str, candidates: &[DocId]) -> Vec<RankedDoc> {
        let terms = query_terms(query);
        let mut ranked: Vec<RankedDoc> = candidates
            .iter()
            .filter_map(|&doc_id| {
                let doc = self.store.get(doc_id)?;
                let title = doc.title.to_lowercase();
                let score = terms
                    .iter()
                    .map(|t| {
                        let bonus = if title.contains(t.as_str()) { TITLE_BONUS } else { 0 };
                        doc.frequency_of(t) + bonus
                    })
                    .sum();
                Some(RankedDoc { doc_id, score })
            })
            .collect();
        ranked.sort_by_key(|r| (Reverse(r.score), r.doc_id));
        ranked
    }

    /// Search, rank and hydrate results for display. An empty vector is a valid answer.
    pub fn query(&self, query: &str) -> Vec<SearchHit> {
        let candidates = self.search(query);
        if candidates.is_empty() {
            return Vec::new();
        }
        let terms = query_terms(query);
        self.rank(query, &candidates)
            .into_iter()
            .filter_map(|r| {
                let doc = self.store.get(r.doc_id)?;
                let term_frequencies = terms
                    .iter()
                    .map(|t| TermCount { term: t.clone(), count: doc.frequency_of(t) })
                    .filter(|tc| tc.count > 0)
                    .collect();
                Some(SearchHit {
                    doc_id: r.doc_id,
                    external_id: doc.external_id.clone(),
                    title: doc.title.clone(),
                    score: r.score,
                    term_frequencies,
                })
            })
            .collect()
    }
}

/// Distinct index terms of a query, in first-occurrence order.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(query).into_iter().filter(|t| seen.insert(t.clone())).collect()
}
