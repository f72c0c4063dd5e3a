use std::cmp::Ordering;

use crate::skip_list::PostingList;

/// Computes `a \ b`.
///
/// When `a`'s head is smaller than `b`'s, it belongs to the result; if `a` can
/// skip to an entry that still does not exceed `b`'s head, the whole run up to
/// the target is below `b`'s head as well and is copied in one go. `b` skips
/// forward towards `a`'s head the same way [`intersect`](super::intersect) does.
pub fn subtract(a: &PostingList, b: &PostingList) -> PostingList {
    let mut result = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (x, y) = (a.doc_id(i), b.doc_id(j));
        match x.cmp(&y) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                let next = a.advance(i, y);
                result.extend(a.entries()[i..next].iter().map(|e| e.doc_id));
                i = next;
            }
            Ordering::Greater => j = b.advance(j, x),
        }
    }

    result.extend(a.entries()[i..].iter().map(|e| e.doc_id));

    PostingList::from_sorted(result)
}
