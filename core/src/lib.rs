//! In-memory inverted index answering conjunctive (AND) queries with
//! frequency-based ranking.
//!
//! Documents are fed to an [`IndexBuilder`]; `finish` freezes them into a
//! read-only [`SearchIndex`] holding a trie term dictionary, a table of sorted
//! postings lists and the per-document term frequencies used for ranking.

pub mod builder;
pub mod index;
pub mod postings;
pub mod store;
pub mod tokenizer;
pub mod trie;

pub type TermId = u32;
pub type DocId = u32;

pub use builder::IndexBuilder;
pub use index::{IndexStats, RankedDoc, SearchHit, SearchIndex, TermCount};
pub use store::{Document, DocumentStore};
