use std::cmp::Ordering;

use crate::skip_list::PostingList;

/// Computes `a ∩ b`.
///
/// Two-pointer merge. Whenever the heads differ, the lagging side follows its
/// skip pointer if the target id does not overshoot the other head, and
/// otherwise steps by one.
pub fn intersect(a: &PostingList, b: &PostingList) -> PostingList {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (x, y) = (a.doc_id(i), b.doc_id(j));
        match x.cmp(&y) {
            Ordering::Equal => {
                result.push(x);
                i += 1;
                j += 1;
            }
            Ordering::Less => i = a.advance(i, y),
            Ordering::Greater => j = b.advance(j, x),
        }
    }

    PostingList::from_sorted(result)
}
