use crate::{DocId, TermId};

/// Contiguous array of postings lists addressed by [`TermId`]. Each list is
/// sorted ascending and free of duplicates.
#[derive(Debug, Default, Clone)]
pub struct PostingsTable {
    lists: Vec<Vec<DocId>>,
}

impl PostingsTable {
    pub fn new() -> Self { Self::default() }

    /// Append `list` and return the id it is stored under. Callers hand in
    /// lists that are already sorted and deduplicated.
    pub(crate) fn push(&mut self, list: Vec<DocId>) -> TermId {
        debug_assert!(list.windows(2).all(|w| w[0] < w[1]), "postings must be strictly ascending");
        let id = self.lists.len() as TermId;
        self.lists.push(list);
        id
    }

    pub fn get(&self, id: TermId) -> Option<&[DocId]> {
        self.lists.get(id as usize).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize { self.lists.len() }

    pub fn is_empty(&self) -> bool { self.lists.is_empty() }

    /// Total number of (term, document) entries across all lists.
    pub fn total_entries(&self) -> usize { self.lists.iter().map(Vec::len).sum() }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &[DocId])> + '_ {
        self.lists.iter().enumerate().map(|(i, l)| (i as TermId, l.as_slice()))
    }
}

/// Intersect two ascending lists by merging.
pub fn intersect_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() && j < b.len() {
        let x = a[i];
        let y = b[j];
        if x == y {
            out.push(x);
            i += 1;
            j += 1;
        } else if x < y {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Intersect any number of ascending lists, shortest first so the running
/// result never grows. An empty input yields an empty result.
pub fn intersect_all(mut lists: Vec<&[DocId]>) -> Vec<DocId> {
    lists.sort_by_key(|l| l.len());
    let mut iter = lists.into_iter();
    let mut acc = match iter.next() {
        Some(first) => first.to_vec(),
        None => return Vec::new(),
    };
    for list in iter {
        if acc.is_empty() {
            break;
        }
        acc = intersect_sorted(&acc, list);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_two() {
        assert_eq!(intersect_sorted(&[1, 3, 5, 7], &[2, 3, 4, 7, 9]), vec![3, 7]);
        assert!(intersect_sorted(&[], &[1, 2]).is_empty());
    }

    #[test]
    fn intersect_many_and_self() {
        let a = [0, 2, 4, 6, 8];
        let b = [2, 3, 4, 8];
        let c = [4, 8, 10];
        assert_eq!(intersect_all(vec![&a, &b, &c]), vec![4, 8]);
        assert_eq!(intersect_all(vec![&a, &a]), a.to_vec());
        assert!(intersect_all(Vec::new()).is_empty());
    }

    #[test]
    fn table_addressing() {
        let mut table = PostingsTable::new();
        assert_eq!(table.push(vec![0, 1]), 0);
        assert_eq!(table.push(vec![2]), 1);
        assert_eq!(table.get(1), Some(&[2][..]));
        assert_eq!(table.get(2), None);
        assert_eq!(table.total_entries(), 3);
    }
}
