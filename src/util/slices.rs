use std::collections::HashSet;
use std::hash::Hash;

/// True if `list` holds an element equal to `elem`.
pub fn contains<T: PartialEq>(list: &[T], elem: &T) -> bool {
    list.iter().any(|item| item == elem)
}

/// Elements of `a` that do not appear in `b`, in `a`'s order.
///
/// Duplicates in `a` are kept.
pub fn subtract<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let exclude: HashSet<&T> = b.iter().collect();
    a.iter().filter(|x| !exclude.contains(x)).cloned().collect()
}
