//! Dependency-keyed memoization for pipeline stages.

use std::fmt;
use std::sync::Arc;

/// Compares an `Arc` by pointer identity instead of by value.
///
/// Use for inputs that are expensive to compare or that hold closures.
pub struct ByPtr<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> ByPtr<T> {
    pub fn new(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }
}

impl<T: ?Sized> Clone for ByPtr<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ByPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> fmt::Debug for ByPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByPtr({:p})", Arc::as_ptr(&self.0))
    }
}

/// Caches the last value computed for a set of dependencies.
///
/// The value is recomputed only when the dependencies differ from the ones it
/// was computed with.
pub struct Memo<D, V> {
    slot: Option<(D, V)>,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<D: PartialEq, V: Clone> Memo<D, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, deps: D, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_deps, value)) = &self.slot {
            if *cached_deps == deps {
                return value.clone();
            }
        }

        let value = compute();
        self.slot = Some((deps, value.clone()));
        value
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_only_on_changed_deps() {
        let mut memo: Memo<(u32, bool), u32> = Memo::new();
        let mut calls = 0;

        let a = memo.get_or_compute((1, true), || {
            calls += 1;
            10
        });
        let b = memo.get_or_compute((1, true), || {
            calls += 1;
            20
        });
        assert_eq!((a, b), (10, 10));
        assert_eq!(calls, 1);

        let c = memo.get_or_compute((2, true), || {
            calls += 1;
            30
        });
        assert_eq!(c, 30);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_by_ptr_ignores_equal_values() {
        let a = Arc::new(vec![1, 2, 3]);
        let b = Arc::new(vec![1, 2, 3]);
        assert_eq!(ByPtr::new(&a), ByPtr::new(&a));
        assert_ne!(ByPtr::new(&a), ByPtr::new(&b));
    }
}
