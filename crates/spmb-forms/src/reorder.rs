//! The single-element move used by drag-reordering.

/// Moves the element at `from` so that it ends up at index `to`.
///
/// All other elements keep their relative order. Returns `false` and leaves
/// the vector untouched if either index is out of bounds.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

/// Returns a copy of `items` with the element at `from` moved to `to`.
///
/// # Examples
///
/// ```
/// use spmb_forms::reorder;
///
/// let moved = reorder(&["A", "B", "C", "D"], 0, 2).unwrap();
/// assert_eq!(moved, ["B", "C", "A", "D"]);
/// ```
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    let mut out = items.to_vec();
    move_item(&mut out, from, to).then_some(out)
}
