use std::cmp::Ordering;

use crate::skip_list::PostingList;

/// Computes `a ∪ b`.
///
/// Every element ends up in the output, so skip pointers are not consulted.
pub fn union(a: &PostingList, b: &PostingList) -> PostingList {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (x, y) = (a.doc_id(i), b.doc_id(j));
        match x.cmp(&y) {
            Ordering::Equal => {
                result.push(x);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(x);
                i += 1;
            }
            Ordering::Greater => {
                result.push(y);
                j += 1;
            }
        }
    }

    result.extend(a.entries()[i..].iter().map(|e| e.doc_id));
    result.extend(b.entries()[j..].iter().map(|e| e.doc_id));

    PostingList::from_sorted(result)
}
