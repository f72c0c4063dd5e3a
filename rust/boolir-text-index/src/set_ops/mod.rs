//! Set algebra over skip-augmented posting lists.
//!
//! All three primitives take two strictly ascending lists and produce a new
//! strictly ascending list, re-encoded with fresh skip pointers so that the
//! output of one operation is as cheap to traverse as a stored list when it
//! feeds the next one.
//!
//! - [`intersect`]: `A ∩ B`, uses skips on both sides.
//! - [`union`]: `A ∪ B`, plain merge (no element can be skipped).
//! - [`subtract`]: `A \ B`, uses skips on both sides.

mod difference;
mod intersection;
mod union;

pub use difference::subtract;
pub use intersection::intersect;
pub use union::union;
