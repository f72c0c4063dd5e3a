//! Skip-augmented posting lists.
//!
//! A [`PostingList`] is a strictly ascending, duplicate-free sequence of document
//! ids in which every ⌊√L⌋-th entry carries a forward pointer to the entry one
//! stride further along. The pointers let the set operations in
//! [`set_ops`](crate::set_ops) jump over runs of ids that cannot match.
//!
//! Skip layout for a list of length `L`:
//! - `L <= 3`: no pointers.
//! - otherwise, with `stride = ⌊√L⌋`, entries `0, stride, 2·stride, …` point at
//!   `index + stride` as long as that target is still inside the list; the
//!   final partial group carries no pointer.

use bincode::{Decode, Encode};
use boolir_common::{Result, verify_data};

/// Document identifier. Document ids are taken from the file names of the
/// indexed collection.
pub type DocId = u32;

/// Lists of this length or shorter carry no skip pointers.
pub const MIN_SKIP_LIST_LEN: usize = 3;

/// One element of a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct PostingEntry {
    pub doc_id: DocId,
    /// Index of the entry this one can jump to, if any.
    pub skip: Option<u32>,
}

impl PostingEntry {
    pub fn bare(doc_id: DocId) -> PostingEntry {
        PostingEntry { doc_id, skip: None }
    }
}

/// Sorted, duplicate-free document ids with embedded skip pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct PostingList {
    entries: Vec<PostingEntry>,
}

impl PostingList {
    pub fn new() -> PostingList {
        PostingList::default()
    }

    /// Builds a skip-encoded list from ids that are already strictly ascending.
    pub fn from_sorted(doc_ids: Vec<DocId>) -> PostingList {
        debug_assert!(
            doc_ids.windows(2).all(|w| w[0] < w[1]),
            "doc ids must be strictly ascending"
        );
        let mut entries: Vec<PostingEntry> = doc_ids.into_iter().map(PostingEntry::bare).collect();
        encode_skips(&mut entries);
        PostingList { entries }
    }

    /// Sorts and deduplicates `doc_ids` before building the list.
    pub fn from_unsorted(mut doc_ids: Vec<DocId>) -> PostingList {
        doc_ids.sort_unstable();
        doc_ids.dedup();
        PostingList::from_sorted(doc_ids)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PostingEntry] {
        &self.entries
    }

    #[inline]
    pub fn doc_id(&self, index: usize) -> DocId {
        self.entries[index].doc_id
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.entries.iter().map(|e| e.doc_id)
    }

    pub fn to_doc_ids(&self) -> Vec<DocId> {
        self.doc_ids().collect()
    }

    /// Returns the position to continue from when the entry at `index` is known
    /// to be smaller than `bound`: the skip target if its id does not exceed
    /// `bound`, otherwise the next entry.
    #[inline]
    pub fn advance(&self, index: usize, bound: DocId) -> usize {
        match self.entries[index].skip {
            Some(target) if self.entries[target as usize].doc_id <= bound => target as usize,
            _ => index + 1,
        }
    }

    /// Checks the structural invariants of a list read from storage.
    pub fn validate(&self) -> Result<()> {
        verify_data!(
            posting_list,
            self.entries.windows(2).all(|w| w[0].doc_id < w[1].doc_id)
        );
        let len = self.entries.len();
        verify_data!(
            posting_list,
            self.entries.iter().enumerate().all(|(i, e)| match e.skip {
                Some(target) => (target as usize) > i && (target as usize) < len,
                None => true,
            })
        );
        Ok(())
    }
}

impl FromIterator<DocId> for PostingList {
    fn from_iter<T: IntoIterator<Item = DocId>>(iter: T) -> Self {
        PostingList::from_sorted(iter.into_iter().collect())
    }
}

/// Returns the skip stride for a list of `len` entries, or `None` when the
/// list is too short to carry skips.
pub fn skip_stride(len: usize) -> Option<usize> {
    (len > MIN_SKIP_LIST_LEN).then(|| len.isqrt())
}

/// Rewrites the skip pointers of `entries` in place.
pub fn encode_skips(entries: &mut [PostingEntry]) {
    let len = entries.len();
    let Some(stride) = skip_stride(len) else {
        entries.iter_mut().for_each(|e| e.skip = None);
        return;
    };

    for (index, entry) in entries.iter_mut().enumerate() {
        let target = index + stride;
        entry.skip = (index % stride == 0 && target < len).then_some(target as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skips(list: &PostingList) -> Vec<Option<u32>> {
        list.entries().iter().map(|e| e.skip).collect()
    }

    #[test]
    fn test_short_lists_have_no_skips() {
        for len in 0..=3u32 {
            let list = PostingList::from_sorted((1..=len).collect());
            assert!(skips(&list).iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_skip_layout() {
        // len 4: stride 2, entries 0 -> 2; entry 2 would target 4 (out of range)
        let list = PostingList::from_sorted(vec![1, 2, 3, 4]);
        assert_eq!(skips(&list), vec![Some(2), None, None, None]);

        // len 10: stride 3, entries 0 -> 3, 3 -> 6, 6 -> 9; entry 9 has no target
        let list = PostingList::from_sorted((0..10).collect());
        assert_eq!(
            skips(&list),
            vec![
                Some(3),
                None,
                None,
                Some(6),
                None,
                None,
                Some(9),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn test_skip_targets_are_increasing_and_in_range() {
        for len in 4..200usize {
            let list = PostingList::from_sorted((0..len as u32).map(|v| v * 3).collect());
            let targets: Vec<usize> = list
                .entries()
                .iter()
                .enumerate()
                .filter_map(|(i, e)| e.skip.map(|t| (i, t as usize)))
                .map(|(i, t)| {
                    assert!(t > i);
                    assert!(t < len);
                    t
                })
                .collect();
            assert!(!targets.is_empty());
            assert!(targets.windows(2).all(|w| w[0] < w[1]));
            list.validate().unwrap();
        }
    }

    #[test]
    fn test_from_unsorted() {
        let list = PostingList::from_unsorted(vec![9, 1, 5, 1, 7]);
        assert_eq!(list.to_doc_ids(), vec![1, 5, 7, 9]);
        assert_eq!(list.entries()[0].skip, Some(2));
    }

    #[test]
    fn test_advance() {
        let list = PostingList::from_sorted(vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
        // stride 3: 0 -> 3 (40)
        assert_eq!(list.advance(0, 45), 3);
        assert_eq!(list.advance(0, 40), 3);
        assert_eq!(list.advance(0, 39), 1);
        assert_eq!(list.advance(1, 100), 2);
    }

    #[test]
    fn test_validate_rejects_corruption() {
        let list = PostingList {
            entries: vec![PostingEntry::bare(3), PostingEntry::bare(2)],
        };
        assert!(list.validate().is_err());

        let list = PostingList {
            entries: vec![
                PostingEntry {
                    doc_id: 1,
                    skip: Some(5),
                },
                PostingEntry::bare(2),
            ],
        };
        assert!(list.validate().is_err());
    }
}
