//! Term dictionary: a prefix tree mapping each index term to its postings list.
//!
//! Nodes live in a single arena and refer to their children by position. Each
//! node keeps its outgoing edges in a small vector sorted by character, so an
//! exact lookup costs one binary search per character of the term, independent
//! of vocabulary size.

use crate::TermId;

type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug, Default, Clone)]
struct Node {
    /// Outgoing edges sorted by character.
    children: Vec<(char, NodeId)>,
    /// Set only on nodes that terminate an inserted term; prefix-only nodes keep `None`.
    term: Option<TermId>,
}

impl Node {
    fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&c, |&(edge, _)| edge)
            .ok()
            .map(|i| self.children[i].1)
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self { Self::new() }
}

impl Trie {
    pub fn new() -> Self {
        Self { nodes: vec![Node::default()], len: 0 }
    }

    /// Insert `term`, creating intermediate nodes as needed, and mark its final
    /// node with `id`. Re-inserting an existing term replaces its id.
    pub fn insert(&mut self, term: &str, id: TermId) {
        let mut node = ROOT;
        for c in term.chars() {
            node = match self.nodes[node as usize].child(c) {
                Some(next) => next,
                None => self.push_child(node, c),
            };
        }
        let slot = &mut self.nodes[node as usize].term;
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(id);
    }

    fn push_child(&mut self, parent: NodeId, c: char) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::default());
        let edges = &mut self.nodes[parent as usize].children;
        let pos = edges.partition_point(|&(edge, _)| edge < c);
        edges.insert(pos, (c, id));
        id
    }

    /// Exact-match lookup. A string that is only a prefix of indexed terms is a miss.
    pub fn lookup(&self, term: &str) -> Option<TermId> {
        let mut node = ROOT;
        for c in term.chars() {
            node = self.nodes[node as usize].child(c)?;
        }
        self.nodes[node as usize].term
    }

    pub fn contains(&self, term: &str) -> bool { self.lookup(term).is_some() }

    /// Number of distinct terms stored.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// All stored terms with their ids, in lexicographic (char) order.
    pub fn terms(&self) -> Vec<(String, TermId)> {
        let mut out = Vec::with_capacity(self.len);
        let mut prefix = String::new();
        self.collect(ROOT, &mut prefix, &mut out);
        out
    }

    fn collect(&self, node: NodeId, prefix: &mut String, out: &mut Vec<(String, TermId)>) {
        let node = &self.nodes[node as usize];
        if let Some(id) = node.term {
            out.push((prefix.clone(), id));
        }
        for &(c, child) in &node.children {
            prefix.push(c);
            self.collect(child, prefix, out);
            prefix.pop();
        }
    }
}
